use std::net::SocketAddr;

use chrono::Utc;
use meet_server::index::ConnectionIndex;
use meet_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Day offsets are anchored at today's midnight UTC.
    let start_date = Utc::now().date_naive();
    let state = AppState::new(ConnectionIndex::new(start_date));
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
