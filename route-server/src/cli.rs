//! Command-line configuration of the binaries.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::generator::{
    DEFAULT_ROUTE_COUNT, DEFAULT_STOP_COUNT, DEFAULT_STOPS_PER_ROUTE, GeneratorParams,
};
use crate::loader::{DEFAULT_MAX_ROUTES, DEFAULT_MAX_STOPS_PER_ROUTE, LoaderConfig};

/// Default address the server listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:8088";

/// Serve direct route lookups over HTTP.
#[derive(Debug, Parser)]
#[command(name = "route-server", version)]
pub struct ServerArgs {
    /// Route data file to load at start-up
    pub route_data: PathBuf,

    /// Address to listen on
    #[arg(long, env = "ROUTE_SERVER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Maximum number of routes in the route data file
    #[arg(long, env = "ROUTE_SERVER_MAX_ROUTES", default_value_t = DEFAULT_MAX_ROUTES)]
    pub max_routes: usize,

    /// Maximum number of stops on one route
    #[arg(long, env = "ROUTE_SERVER_MAX_STOPS_PER_ROUTE", default_value_t = DEFAULT_MAX_STOPS_PER_ROUTE)]
    pub max_stops_per_route: usize,
}

impl ServerArgs {
    /// Loader ceilings selected on the command line.
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new(self.max_routes, self.max_stops_per_route)
    }
}

/// Generate a random route data file.
#[derive(Debug, Parser)]
#[command(name = "generate-routes", version)]
pub struct GeneratorArgs {
    /// Number of routes
    #[arg(default_value_t = DEFAULT_ROUTE_COUNT)]
    pub route_count: u32,

    /// Size of the stop id universe
    #[arg(default_value_t = DEFAULT_STOP_COUNT)]
    pub stop_count: u32,

    /// Maximum number of stops on one route
    #[arg(default_value_t = DEFAULT_STOPS_PER_ROUTE)]
    pub stops_per_route: u32,

    /// Output file (a new temporary file if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GeneratorArgs {
    /// Generator parameters selected on the command line.
    pub fn params(&self) -> GeneratorParams {
        GeneratorParams::new(self.route_count, self.stop_count, self.stops_per_route)
    }
}
