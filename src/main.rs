//! mesos-fetcher: populate a task work directory from the environment.
//!
//! Decodes the fetch request the agent placed in the environment, fetches
//! every descriptor in order, and exits with a code describing the first
//! failure.

mod cli;

use cli::Cli;
use sandbox_fetcher::protocol::FetchRequest;
use sandbox_fetcher::{executor, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported on stdout and are not failures.
            let code = if err.use_stderr() {
                exit_codes::CONFIGURATION_ERROR
            } else {
                exit_codes::SUCCESS
            };
            return ExitCode::from(code as u8);
        }
    };
    logging::init(logging::level_for(cli.verbose, cli.quiet));

    match FetchRequest::from_env().and_then(|request| executor::run(&request)) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
