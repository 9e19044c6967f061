//! Lookup that re-reads the route data file on every query.
//!
//! No index is built and nothing is kept in memory between queries, so this
//! is only suitable for small files. It answers the same question as
//! [`MemoryRouteManager`](super::MemoryRouteManager) and is used to cross-check it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::dataset::StopId;

use super::RouteManager;

/// Route manager that scans the route data file per query.
#[derive(Debug, Clone)]
pub struct FileRouteManager {
    path: PathBuf,
}

impl FileRouteManager {
    /// Create a manager reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the route data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn scan(&self, departure: StopId, arrival: StopId) -> io::Result<bool> {
        let reader = BufReader::new(File::open(&self.path)?);

        // The declared route count is not needed to answer a query.
        for line in reader.lines().skip(1) {
            if self.line_serves(&line?, departure, arrival) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check if a route line contains both stops.
    fn line_serves(&self, line: &str, departure: StopId, arrival: StopId) -> bool {
        let mut tokens = line.split_ascii_whitespace();
        if tokens.next().and_then(|t| t.parse::<u32>().ok()).is_none() {
            warn!(
                path = %self.path.display(),
                "route data file contains corrupted entries that were skipped"
            );
            return false;
        }

        let mut departure_found = false;
        let mut arrival_found = false;
        for stop in tokens.map_while(|t| t.parse::<StopId>().ok()) {
            departure_found |= stop == departure;
            arrival_found |= stop == arrival;
            if departure_found && arrival_found {
                return true;
            }
        }
        false
    }
}

impl RouteManager for FileRouteManager {
    fn is_direct_route_available(&self, departure: StopId, arrival: StopId) -> bool {
        self.scan(departure, arrival).unwrap_or_else(|e| {
            error!(
                path = %self.path.display(),
                error = %e,
                "route data file is not available or invalid"
            );
            false
        })
    }
}
