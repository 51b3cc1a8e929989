use xena_fetch::cli::CliCommand;
use xena_fetch::logging;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("xena-fetch error: {:#}", err);
        std::process::exit(1);
    }
}
