// src/logging.rs
// =============================================================================
// Installs the global tracing subscriber.
//
// - Logs go to stderr, so stdout can carry the report (or pure JSON)
// - RUST_LOG wins when set, e.g. RUST_LOG=site_crawler=trace
// - Otherwise: info, or debug for this crate with --verbose
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "info,site_crawler=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
