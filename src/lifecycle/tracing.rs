//! # Tracing
//!
//! Structured logging with `tracing`. Every actor request runs in a span carrying the
//! entity type and id, and the clients log their payloads at `debug` once per call.
//!
//! ```bash
//! RUST_LOG=info  cargo run
//! RUST_LOG=debug cargo run                       # payloads
//! RUST_LOG=storefront=debug,tower_http=info cargo run
//! ```
//!
//! `RUST_LOG` wins over the `log_level` from the configuration file.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. A second call is a no-op.
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
