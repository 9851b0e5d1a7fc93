//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::index::ConnectionIndex;

/// Shared application state.
///
/// The connection index is a single-writer structure; the lock provides
/// the single-writer / multi-reader discipline it requires. Rankings run
/// under a read lock, mutations under the write lock.
#[derive(Clone)]
pub struct AppState {
    /// The connection index behind a reader-writer lock
    pub index: Arc<RwLock<ConnectionIndex>>,
}

impl AppState {
    /// Create a new app state around an index.
    pub fn new(index: ConnectionIndex) -> Self {
        Self {
            index: Arc::new(RwLock::new(index)),
        }
    }
}
