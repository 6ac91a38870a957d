//! Tracing subscriber setup
//!
//! Log output goes to standard error so that it never mixes with the views
//! printed on standard output. Filtering follows `RUST_LOG`, defaulting to
//! `info`.

use crate::config::LogFormat;
use std::io;
use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global tracing subscriber with human-readable output.
///
/// Subsequent calls, to this or `init_tracing_json`, are ignored.
pub fn init_tracing() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(true)
            .with_thread_names(true);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .init();

        debug!("tracing initialized");
    });
}

/// Initialize the global tracing subscriber with one JSON object per event.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .with_current_span(true);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(fmt_layer)
            .init();

        debug!("tracing initialized (JSON mode)");
    });
}

pub fn init(format: LogFormat) {
    match format {
        LogFormat::Text => init_tracing(),
        LogFormat::Json => init_tracing_json(),
    }
}
