//! Loader configuration.

/// Default ceiling on the number of routes in one data source.
pub const DEFAULT_MAX_ROUTES: usize = 100_000;

/// Default ceiling on the number of stops in one route.
pub const DEFAULT_MAX_STOPS_PER_ROUTE: usize = 1_000;

/// Platform limits a route data source must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Maximum number of routes a source may declare.
    pub max_routes: usize,

    /// Maximum number of stops on a single route.
    pub max_stops_per_route: usize,
}

impl LoaderConfig {
    /// Create a new configuration with the given ceilings.
    pub fn new(max_routes: usize, max_stops_per_route: usize) -> Self {
        Self {
            max_routes,
            max_stops_per_route,
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_routes: DEFAULT_MAX_ROUTES,
            max_stops_per_route: DEFAULT_MAX_STOPS_PER_ROUTE,
        }
    }
}
