//! Entry point for the `confsync` CLI. It parses arguments, sets up logging,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

use confsync::cli::Cli;
use confsync::logging::init_logging;
use confsync::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let result =
        init_logging(cli.verbose, cli.log_format).and_then(|()| commands::dispatch(cli.command));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
