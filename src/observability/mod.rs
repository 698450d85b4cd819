//! # Observability Infrastructure
//!
//! Structured logging for the confstore server via the `tracing` ecosystem.
//! The server only needs a subscriber installed before the first request is
//! served.

use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::Result;

/// Initialize the global tracing subscriber.
///
/// Log level comes from `RUST_LOG` (default `info`); set
/// `CONFSTORE_LOG_FORMAT=json` for machine-readable output. Safe to call
/// once per process; a second call reports the error instead of panicking.
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_output = std::env::var("CONFSTORE_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json_output {
        fmt().with_env_filter(filter).json().with_current_span(true).try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber was already installed");
    }

    Ok(())
}
