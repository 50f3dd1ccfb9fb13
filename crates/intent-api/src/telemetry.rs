//! # Telemetry
//!
//! JSON log lines on stdout. Outside production everything down to `debug`
//! is written (queued webhook events included); production keeps `info` and
//! above. `RUST_LOG` overrides both.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default level for the given environment
pub fn default_level(is_production: bool) -> Level {
    if is_production {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

/// Install the global subscriber
pub fn init_tracing(is_production: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level(is_production).into())
                .from_env_lossy(),
        )
        .init();
}
