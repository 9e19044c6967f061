//! Application state for the web layer.

use std::sync::Arc;

use crate::lookup::RouteManager;

/// Shared application state.
///
/// The route manager is built once before the server starts and only read
/// afterwards, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Direct route lookup
    pub routes: Arc<dyn RouteManager>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(routes: impl RouteManager + 'static) -> Self {
        Self {
            routes: Arc::new(routes),
        }
    }
}
