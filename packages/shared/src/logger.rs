//! Tracing subscriber setup for Hiroba binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, the binary's own crate logs at
/// `default_level` and `tower_http` at `debug`.
///
/// # Arguments
///
/// * `bin_name` - Binary name (e.g. `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Level used when `RUST_LOG` is not set
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(bin_name, default_level).into());

    // try_init so that a second call (e.g. from tests) is a no-op
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}

/// Build the fallback filter directive string.
fn default_filter(bin_name: &str, default_level: &str) -> String {
    let crate_name = bin_name.replace('-', "_");
    format!("{crate_name}={default_level},hiroba_server={default_level},tower_http=debug")
}
