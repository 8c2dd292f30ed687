//! Helpers shared by the process-level tests.

#![allow(dead_code)]

#[path = "../../src/test_support.rs"]
mod test_support;

pub use test_support::*;

use sandbox_fetcher::FetcherConfig;
use std::path::PathBuf;

/// Path of the `mesos-fetcher` binary built for this test run.
pub fn fetcher_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mesos-fetcher"))
}

/// Config whose launcher directory holds the real fetcher binary.
pub fn launcher_config() -> FetcherConfig {
    let binary = fetcher_binary();
    let launcher_dir = binary.parent().unwrap();
    FetcherConfig::with_launcher_dir(launcher_dir)
}
