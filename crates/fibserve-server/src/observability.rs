//! Tracing setup for the server binary.
//!
//! The filter level is reloadable so the configured `logging.level`
//! can be applied after the config file is read, without reinstalling
//! the subscriber. `RUST_LOG` takes precedence at startup.

use std::sync::OnceLock;

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter};

static RELOAD_HANDLE: OnceLock<reload::Handle<EnvFilter, tracing_subscriber::Registry>> =
    OnceLock::new();

/// Install the global subscriber with an `info` default level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (filter, handle) = reload::Layer::new(filter);
    let _ = RELOAD_HANDLE.set(handle);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}

/// Swap in the level from configuration once it is known. No-op if the
/// subscriber was never installed (tests, embedded use).
pub fn apply_logging_level(level: &str) {
    if let Some(handle) = RELOAD_HANDLE.get() {
        let _ = handle.modify(|f| {
            *f = EnvFilter::new(level);
        });
    }
}

/// Counterpart to [`init_tracing`]; nothing buffers today, but the
/// binary calls it on the way out so a flushing backend can slot in.
pub fn shutdown_tracing() {}
