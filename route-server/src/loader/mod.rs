//! Route data loader.
//!
//! Turns a route data source into a [`RouteDataset`]. The format is
//! line oriented:
//!
//! ```text
//! <route count N>
//! <route id> <stop id> <stop id> ...     (N lines, at least 2 stops each)
//! ```
//!
//! Files are memory-mapped and scanned in one forward pass. Any violation
//! aborts the whole load; [`Loader::load`] then logs the reason and returns
//! an empty dataset, so a bad source means "no route information" rather
//! than a failure of the caller. Lines after the N declared routes are not
//! read.

mod capacity;
mod config;
mod error;
mod scan;
mod source;

use std::path::Path;

use tracing::{error, info};

pub use capacity::CapacityPolicy;
pub use config::{DEFAULT_MAX_ROUTES, DEFAULT_MAX_STOPS_PER_ROUTE, LoaderConfig};
pub use error::{FormatError, FormatViolation, LoadError};

use crate::dataset::{DatasetBuilder, RouteDataset};
use scan::RouteScanner;
use source::MappedSource;

/// Name used in diagnostics for in-memory sources.
const MEMORY_SOURCE: &str = "<memory>";

/// Builds route datasets from files or byte slices.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoaderConfig,
    policy: CapacityPolicy,
}

impl Loader {
    /// Create a loader enforcing the given ceilings.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            policy: CapacityPolicy::new(&config),
        }
    }

    /// The ceilings this loader enforces.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the route data file at `path`.
    ///
    /// Returns an empty dataset if the file cannot be read or is not valid
    /// route data; the reason is logged.
    pub fn load(&self, path: impl AsRef<Path>) -> RouteDataset {
        let path = path.as_ref();
        self.try_load(path).unwrap_or_else(|e| {
            error!(path = %path.display(), error = %e, "route data file cannot be processed, skipping");
            RouteDataset::empty()
        })
    }

    /// Load route data held in memory.
    ///
    /// Returns an empty dataset if the bytes are not valid route data.
    pub fn load_bytes(&self, bytes: &[u8]) -> RouteDataset {
        self.try_load_bytes(bytes).unwrap_or_else(|e| {
            error!(error = %e, "route data cannot be processed, skipping");
            RouteDataset::empty()
        })
    }

    /// Load the route data file at `path`, reporting why it failed.
    pub fn try_load(&self, path: impl AsRef<Path>) -> Result<RouteDataset, LoadError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        info!(path = %source_name, "route data file processing started");

        let source = MappedSource::open(path).map_err(|error| LoadError::SourceUnavailable {
            source_name: source_name.clone(),
            error,
        })?;
        let parsed = self.parse(&source);
        // Release the mapping before the dataset is handed out.
        drop(source);

        let dataset = parsed.map_err(|error| LoadError::Format {
            source_name: source_name.clone(),
            error,
        })?;
        info!(
            path = %source_name,
            routes = dataset.route_count(),
            "route data file processing finished"
        );
        Ok(dataset)
    }

    /// Load route data held in memory, reporting why it failed.
    pub fn try_load_bytes(&self, bytes: &[u8]) -> Result<RouteDataset, LoadError> {
        self.parse(bytes).map_err(|error| LoadError::Format {
            source_name: MEMORY_SOURCE.to_string(),
            error,
        })
    }

    fn parse(&self, bytes: &[u8]) -> Result<RouteDataset, FormatError> {
        let mut scanner = RouteScanner::new(bytes);

        let header_line = scanner.line();
        let declared = scanner.read_header()?;
        let header_error = |violation| FormatError {
            line: header_line,
            violation,
        };
        if declared == 0 {
            return Err(header_error(FormatViolation::EmptyDataset));
        }
        if declared as usize > self.config.max_routes {
            return Err(header_error(FormatViolation::TooManyRoutes {
                declared,
                limit: self.config.max_routes,
            }));
        }

        let capacity = self.policy.preallocation(declared as usize, bytes.len());
        let mut builder = DatasetBuilder::with_capacity(declared, capacity);
        for _ in 0..declared {
            scanner.read_route(&mut builder, self.config.max_stops_per_route)?;
        }

        let shrink = self.policy.should_shrink(builder.len());
        Ok(builder.finish(shrink))
    }
}
