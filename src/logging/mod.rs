use std::error::Error;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the stderr reporter. Warnings and errors are always shown,
/// `--debug` adds this crate's debug messages.
pub fn init_logging(debug: bool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let directives = if debug {
        format!("{},{}={}", Level::WARN, env!("CARGO_CRATE_NAME"), Level::DEBUG)
    } else {
        Level::WARN.to_string()
    };

    // Allow RUST_LOG env var to override the debug flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(debug)
        .without_time()
        .compact()
        .try_init()
}
