//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query parameters of a direct route lookup.
#[derive(Debug, Deserialize)]
pub struct DirectRouteRequest {
    /// Departure stop id
    pub dep_sid: i64,

    /// Arrival stop id
    pub arr_sid: i64,
}

/// Result of a direct route lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectRouteResponse {
    /// Departure stop id, as requested
    pub dep_sid: i64,

    /// Arrival stop id, as requested
    pub arr_sid: i64,

    /// Whether a single route serves both stops
    pub direct_bus_route: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
