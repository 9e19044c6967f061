use clap::Parser;
use tracing::{info, warn};

use route_server::cli::ServerArgs;
use route_server::loader::Loader;
use route_server::logging;
use route_server::lookup::MemoryRouteManager;
use route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = ServerArgs::parse();
    logging::init();

    // The dataset is complete before the listener binds
    let loader = Loader::new(args.loader_config());
    let dataset = loader.load(&args.route_data);
    if dataset.is_empty() {
        warn!(
            path = %args.route_data.display(),
            "no route information loaded, every lookup will report no direct route"
        );
    } else {
        info!(routes = dataset.route_count(), "route data loaded");
    }

    let state = AppState::new(MemoryRouteManager::new(dataset));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, "route server listening");
    info!("  GET /health                          - Health check");
    info!("  GET /api/direct?dep_sid=..&arr_sid=.. - Direct route lookup");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
