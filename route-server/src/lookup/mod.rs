//! Direct route lookup.
//!
//! Answers whether a single route visits both a departure and an arrival
//! stop. The relative order of the two stops along the route does not matter,
//! so every lookup is symmetric in its arguments.

mod file;
mod memory;

pub use file::FileRouteManager;
pub use memory::{MemoryRouteManager, direct_route_exists};

use crate::dataset::StopId;

/// Answers direct route queries.
///
/// Implementations must be safe to query concurrently from many callers.
pub trait RouteManager: Send + Sync {
    /// Check if a direct route is available between two stops.
    fn is_direct_route_available(&self, departure: StopId, arrival: StopId) -> bool;
}
