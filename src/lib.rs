pub mod config;
pub mod console;
pub mod controller;
pub mod db;
pub mod error;
pub mod format;
pub mod handlers;
pub mod models;
pub mod validate;


use tracing_subscriber::EnvFilter;

/// Message printed when the start-up connection attempt fails.
pub const STARTUP_FAILURE: &str = "Database access attempt failed, please contact the system administrator.";

/// Diagnostics go to stderr so they never interleave with the menus.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
