//! CLI argument parsing for mesos-fetcher.
//!
//! The fetcher takes its real input from the environment; the flags only tune
//! log verbosity.

use clap::{ArgAction, Parser};

/// Fetch the resources listed in MESOS_EXECUTOR_URIS into
/// MESOS_WORK_DIRECTORY.
///
/// Optional inputs: MESOS_USER, MESOS_FRAMEWORKS_HOME, HADOOP_HOME.
#[derive(Parser, Debug)]
#[command(name = "mesos-fetcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments, leaving usage errors to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}
