//! Logging configuration
//!
//! Stdout-only tracing output. Set `DEBUG_LOGGING=1` to enable debug output
//! for tickdown crates.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(debug_logging: bool) {
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(true);

    let filter_directive = if debug_logging {
        "info,tickdown_core=debug,tickdown_cli=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(EnvFilter::new(filter_directive))
        .init();
}
