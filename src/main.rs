use std::process::ExitCode;

use clap::Parser;
use rosa_regions::cli::Args;
use rosa_regions::logging::init_logging;
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.debug) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match args.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_warning() => {
            warn!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
