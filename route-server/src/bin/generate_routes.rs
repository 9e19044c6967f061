use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use route_server::cli::GeneratorArgs;
use route_server::generator::RouteDataGenerator;
use route_server::logging;

fn main() -> ExitCode {
    let args = GeneratorArgs::parse();
    logging::init();

    let params = args.params();
    info!(
        routes = params.route_count,
        stops = params.stop_count,
        stops_per_route = params.stops_per_route,
        "generating route data"
    );

    let mut generator = match args.seed {
        Some(seed) => RouteDataGenerator::seeded(seed),
        None => RouteDataGenerator::new(),
    };

    match generator.generate_file(&params, args.output.as_deref()) {
        Ok(path) => {
            info!(path = %path.display(), "generated route data file");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "unable to generate route data file");
            ExitCode::FAILURE
        }
    }
}
