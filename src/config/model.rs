//! FetcherConfig struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name of the fetcher executable inside `launcher_dir`.
pub const FETCHER_BINARY: &str = "mesos-fetcher";

/// Configuration threaded into the orchestrator and, through the encoded
/// environment, into the fetcher process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Directory containing the `mesos-fetcher` binary.
    #[serde(default = "default_launcher_dir")]
    pub launcher_dir: PathBuf,

    /// Base directory for resource paths given relative to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks_home: Option<String>,

    /// Hadoop installation used for distributed-filesystem URIs.
    /// When unset, `hadoop` is looked up on `PATH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hadoop_home: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            launcher_dir: default_launcher_dir(),
            frameworks_home: None,
            hadoop_home: None,
        }
    }
}

/// The directory of the running executable, or `.` if it cannot be determined.
fn default_launcher_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
