//! Tracing subscriber set-up for the binaries.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// An invalid `RUST_LOG` falls back to the default level.
pub fn init() {
    let default_level = LevelFilter::INFO;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            eprintln!(
                "invalid {}, falling back to level '{}' - {}",
                EnvFilter::DEFAULT_ENV,
                default_level,
                err
            );
        }
        EnvFilter::new(default_level.to_string())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
