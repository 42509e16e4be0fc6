use clap::Parser;
use ripper_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.log_file {
        if let Err(err) = logging::init_logging() {
            logging::init_logging_stderr();
            tracing::warn!("file logging unavailable, using stderr: {:#}", err);
        }
    } else {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run().await {
        eprintln!("ripper error: {:#}", err);
        std::process::exit(1);
    }
}
