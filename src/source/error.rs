//! Failure causes for resource acquisition.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single descriptor could not be acquired.
///
/// The fetcher collapses all of these into one `FetcherError::Fetch`, but keeps
/// the cause attached as its source.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("source '{}' does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to read source '{}': {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("distributed filesystem client '{}' not found", .0.display())]
    ClientMissing(PathBuf),

    #[error("distributed filesystem client failed: {0}")]
    ClientFailed(String),

    #[error("failed to write '{}': {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot derive a safe file name from '{0}'")]
    InvalidName(String),

    #[error("unsupported URI scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("relative path '{0}' requires MESOS_FRAMEWORKS_HOME to be set")]
    RelativePathWithoutHome(String),
}
