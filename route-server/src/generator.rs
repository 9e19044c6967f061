//! Synthetic route data generator.
//!
//! Produces files in the route data format with random stops, for load and
//! performance testing of the loader and lookup.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{MIN_STOPS_PER_ROUTE, RouteId, StopId};
use crate::loader::LoaderConfig;

/// Default number of routes to generate.
pub const DEFAULT_ROUTE_COUNT: u32 = 100_000;

/// Default size of the stop id universe.
pub const DEFAULT_STOP_COUNT: u32 = 1_000_000;

/// Default maximum number of stops per route.
pub const DEFAULT_STOPS_PER_ROUTE: u32 = 1_000;

/// Errors that can occur when generating route data.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parameters cannot produce loadable route data
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),
}

/// Parameters of a generated route data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorParams {
    /// Number of routes.
    pub route_count: u32,

    /// Stop ids are drawn from `0..stop_count`.
    pub stop_count: u32,

    /// Maximum number of stops on one route.
    pub stops_per_route: u32,
}

impl GeneratorParams {
    /// Create parameters with the given values.
    pub fn new(route_count: u32, stop_count: u32, stops_per_route: u32) -> Self {
        Self {
            route_count,
            stop_count,
            stops_per_route,
        }
    }

    /// Check that the output loads with the default loader ceilings.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        self.validate_for(&LoaderConfig::default())
    }

    /// Check that the output loads under `config`: at least one route, every
    /// route able to have two distinct stops, and no ceiling exceeded.
    pub fn validate_for(&self, config: &LoaderConfig) -> Result<(), GeneratorError> {
        if self.route_count == 0 {
            return Err(GeneratorError::InvalidParameters(
                "route count must be at least 1",
            ));
        }
        if self.route_count as usize > config.max_routes {
            return Err(GeneratorError::InvalidParameters(
                "route count exceeds the loader route ceiling",
            ));
        }
        if (self.stop_count as usize) < MIN_STOPS_PER_ROUTE {
            return Err(GeneratorError::InvalidParameters(
                "stop count must be at least 2",
            ));
        }
        if (self.stops_per_route as usize) < MIN_STOPS_PER_ROUTE {
            return Err(GeneratorError::InvalidParameters(
                "stops per route must be at least 2",
            ));
        }
        if self.stops_per_route as usize > config.max_stops_per_route {
            return Err(GeneratorError::InvalidParameters(
                "stops per route exceeds the loader stop ceiling",
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            route_count: DEFAULT_ROUTE_COUNT,
            stop_count: DEFAULT_STOP_COUNT,
            stops_per_route: DEFAULT_STOPS_PER_ROUTE,
        }
    }
}

/// Writes random route data.
pub struct RouteDataGenerator<R = StdRng> {
    rng: R,
}

impl RouteDataGenerator<StdRng> {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a generator with a fixed seed, for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RouteDataGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RouteDataGenerator<R> {
    /// Create a generator drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Write route data to `writer`.
    ///
    /// Route ids run from 0 to `route_count - 1`. Each route draws
    /// `stops_per_route` stop ids and keeps the distinct ones in draw order;
    /// a route that ends up with fewer than two stops is drawn again.
    pub fn generate<W: Write>(
        &mut self,
        params: &GeneratorParams,
        writer: W,
    ) -> Result<(), GeneratorError> {
        params.validate()?;

        let mut writer = BufWriter::new(writer);
        writeln!(writer, "{}", params.route_count)?;
        for route_id in 0..params.route_count {
            let stops = self.route_stops(params);
            write_route(&mut writer, route_id, &stops)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write route data to `path`, or to a new temporary file if `path` is `None`.
    ///
    /// Returns the path written. A temporary file is kept after the call.
    pub fn generate_file(
        &mut self,
        params: &GeneratorParams,
        path: Option<&Path>,
    ) -> Result<PathBuf, GeneratorError> {
        params.validate()?;

        let (file, path) = match path {
            Some(path) => (File::create(path)?, path.to_path_buf()),
            None => tempfile::Builder::new()
                .prefix("routes")
                .suffix(".tmp")
                .tempfile()?
                .keep()
                .map_err(io::Error::from)?,
        };
        self.generate(params, file)?;
        Ok(path)
    }

    fn route_stops(&mut self, params: &GeneratorParams) -> Vec<StopId> {
        loop {
            let mut seen = HashSet::new();
            let stops: Vec<StopId> = (0..params.stops_per_route)
                .map(|_| self.rng.random_range(0..params.stop_count))
                .filter(|stop| seen.insert(*stop))
                .collect();
            if stops.len() >= MIN_STOPS_PER_ROUTE {
                return stops;
            }
        }
    }
}

fn write_route<W: Write>(writer: &mut W, route_id: RouteId, stops: &[StopId]) -> io::Result<()> {
    write!(writer, "{route_id}")?;
    for stop in stops {
        write!(writer, " {stop}")?;
    }
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Loader, LoaderConfig};
    use tempfile::tempdir;

    fn generate(params: &GeneratorParams, seed: u64) -> Vec<u8> {
        let mut out = Vec::new();
        RouteDataGenerator::seeded(seed)
            .generate(params, &mut out)
            .unwrap();
        out
    }

    #[test]
    fn header_and_route_ids() {
        let text = String::from_utf8(generate(&GeneratorParams::new(3, 50, 5), 1)).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "3");
        for (id, line) in lines[1..].iter().enumerate() {
            let mut tokens = line.split(' ');
            assert_eq!(tokens.next(), Some(id.to_string().as_str()));
        }
    }

    #[test]
    fn stops_are_distinct_and_in_range() {
        let params = GeneratorParams::new(20, 10, 8);
        let text = String::from_utf8(generate(&params, 2)).unwrap();

        for line in text.lines().skip(1) {
            let stops: Vec<u32> = line
                .split(' ')
                .skip(1)
                .map(|s| s.parse().unwrap())
                .collect();
            let distinct: HashSet<_> = stops.iter().collect();

            assert!(stops.len() >= 2);
            assert!(stops.len() <= 8);
            assert_eq!(distinct.len(), stops.len());
            assert!(stops.iter().all(|s| *s < 10));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let params = GeneratorParams::new(5, 100, 10);
        assert_eq!(generate(&params, 7), generate(&params, 7));
    }

    #[test]
    fn output_loads_within_ceilings() {
        let params = GeneratorParams::new(50, 30, 12);
        let data = generate(&params, 3);

        let loader = Loader::new(LoaderConfig::new(50, 12));
        let dataset = loader.try_load_bytes(&data).unwrap();

        assert_eq!(dataset.route_count(), 50);
        assert!(dataset.routes().all(|r| r.stops.len() <= 12));
    }

    #[test]
    fn rejects_unloadable_parameters() {
        let mut out = Vec::new();
        let mut generator = RouteDataGenerator::seeded(0);

        let err = generator
            .generate(&GeneratorParams::new(1, 1, 10), &mut out)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid parameters: stop count must be at least 2");

        let err = generator
            .generate(&GeneratorParams::new(1, 10, 1), &mut out)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidParameters(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn rejects_empty_output() {
        let mut out = Vec::new();
        let err = RouteDataGenerator::seeded(0)
            .generate(&GeneratorParams::new(0, 10, 5), &mut out)
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid parameters: route count must be at least 1");
        assert!(out.is_empty());
    }

    #[test]
    fn rejects_parameters_above_loader_ceilings() {
        let mut out = Vec::new();
        let mut generator = RouteDataGenerator::seeded(0);

        let err = generator
            .generate(&GeneratorParams::new(1, 5_000, 1_500), &mut out)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameters: stops per route exceeds the loader stop ceiling"
        );

        let err = generator
            .generate(&GeneratorParams::new(100_001, 50, 5), &mut out)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameters: route count exceeds the loader route ceiling"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn ceilings_follow_loader_config() {
        let params = GeneratorParams::new(3, 50, 5);

        assert!(params.validate_for(&LoaderConfig::new(3, 5)).is_ok());
        assert!(params.validate_for(&LoaderConfig::new(2, 5)).is_err());
        assert!(params.validate_for(&LoaderConfig::new(3, 4)).is_err());
    }

    #[test]
    fn default_parameters_are_loadable() {
        assert!(GeneratorParams::default().validate().is_ok());
    }

    #[test]
    fn writes_to_given_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routes.txt");

        let written = RouteDataGenerator::seeded(4)
            .generate_file(&GeneratorParams::new(4, 20, 5), Some(&path))
            .unwrap();

        assert_eq!(written, path);
        let dataset = Loader::default().load(&path);
        assert_eq!(dataset.route_count(), 4);
    }

    #[test]
    fn writes_to_temporary_file() {
        let path = RouteDataGenerator::seeded(5)
            .generate_file(&GeneratorParams::new(2, 20, 5), None)
            .unwrap();

        assert!(path.exists());
        assert_eq!(Loader::default().load(&path).route_count(), 2);
        std::fs::remove_file(path).unwrap();
    }
}
