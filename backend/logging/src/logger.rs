//! Global logger setup.
//!
//! All failure signals in this process go to the operator stream only, never
//! to the chat channel, so the logger carries two sinks: a human-readable
//! console layer and a daily-rolling NDJSON file for later inspection.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger. `RUST_LOG` wins when set; otherwise
/// `fallback_level` applies. Safe to call more than once; later calls are
/// no-ops.
pub fn init_logger(log_dir: impl AsRef<Path>, fallback_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    // `<log_dir>/chairspot.log.YYYY-MM-DD`, one JSON object per line.
    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(RollingFileAppender::new(
            Rotation::DAILY,
            log_dir,
            "chairspot.log",
        ));

    let console_layer = fmt::layer().with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
