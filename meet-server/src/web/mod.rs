//! Web layer for the meeting-destination planner.
//!
//! Provides HTTP endpoints for feeding the connection index and ranking
//! destinations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
