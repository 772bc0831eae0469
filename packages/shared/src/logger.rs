//! Logging setup for Parley binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the calling binary and the Parley
/// crates log at `default_level`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let bin_target = bin_name.replace('-', "_");
    [
        bin_target.as_str(),
        "parley_client",
        "parley_server",
        "parley_shared",
        "tower_http",
    ]
    .iter()
    .map(|target| format!("{target}={default_level}"))
    .collect::<Vec<_>>()
    .join(",")
}
