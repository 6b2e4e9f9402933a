#![warn(
    unused,
    clippy::cast_possible_truncation,
    clippy::unused_self,
    missing_debug_implementations,
    rust_2018_idioms
)]

//! # Perpcorr-Server
//! HTTP front end over [`perpcorr_data`]: lists the USDT perpetual universe, ranks pairs by
//! correlation against a base pair and exports the last ranking as CSV.

/// [`ServerConfig`](config::ServerConfig) read from the environment.
pub mod config;

/// [`ApiError`](error::ApiError) and its HTTP rendering.
pub mod error;

/// Shared [`AppState`](state::AppState).
pub mod state;

/// Route handlers.
pub mod routes;

pub use routes::router;

/// Initialise the global `tracing` subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
