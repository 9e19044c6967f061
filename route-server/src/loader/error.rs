//! Loader error types.
//!
//! These never reach callers of [`load`](super::Loader::load): they are logged
//! and the load degrades to an empty dataset. [`try_load`](super::Loader::try_load)
//! exposes them for callers that need the reason.

use crate::dataset::RouteId;

/// Ways in which a route data source can violate the file format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatViolation {
    /// A byte that is not allowed at this position
    #[error("unexpected byte {byte:#04x}")]
    UnexpectedByte { byte: u8 },

    /// The header declares zero routes (or the source is empty)
    #[error("route data is empty")]
    EmptyDataset,

    /// A route line has fewer than two stops
    #[error("route {route_id} has {found} stops, at least 2 are required")]
    TooFewStops { route_id: RouteId, found: usize },

    /// A route line has more stops than the per-route ceiling
    #[error("route {route_id} exceeds the limit of {limit} stops")]
    TooManyStops { route_id: RouteId, limit: usize },

    /// The header declares more routes than the route ceiling
    #[error("{declared} routes declared, the limit is {limit}")]
    TooManyRoutes { declared: u32, limit: usize },

    /// A number does not fit in 32 bits
    #[error("identifier does not fit in 32 bits")]
    IdOverflow,

    /// The source ended before every declared route was read
    #[error("source ends before all declared routes were read")]
    MissingRoute,
}

/// Format violation together with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {violation}")]
pub struct FormatError {
    pub line: usize,
    pub violation: FormatViolation,
}

/// Errors that can occur when loading a route data source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened, mapped or read
    #[error("route data source '{source_name}' is unavailable: {error}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The source is not valid route data
    #[error("route data source '{source_name}' is corrupted: {error}")]
    Format {
        source_name: String,
        #[source]
        error: FormatError,
    },
}

impl LoadError {
    /// The format violation behind this error, if any.
    pub fn violation(&self) -> Option<&FormatViolation> {
        match self {
            LoadError::Format { error, .. } => Some(&error.violation),
            LoadError::SourceUnavailable { .. } => None,
        }
    }
}
