pub mod app;
pub mod config;
mod error;
pub mod form;
pub mod provider;
mod utils;
pub mod web;

pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use provider::ListClient;

use tracing_subscriber::{fmt, EnvFilter};

/// Human readable console logging, used for debug builds and tests.
/// Defaults to `debug` for this crate when `RUST_LOG` is not set.
pub fn init_dbg_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("newsletter_signup=debug,tower_http=info"));

    // `try_init` so that calling this more than once (e.g. from tests) is harmless.
    let _ = fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .try_init();
}

/// JSON formatted logging for production builds.
pub fn init_production_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init();
}
