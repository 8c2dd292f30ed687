//! Error types for the sandbox fetcher.
//!
//! Uses thiserror for derive macros. Every variant maps to a distinct exit code
//! so the agent can tell configuration mistakes from genuine fetch failures.

use crate::exit_codes;
use crate::source::AcquireError;
use thiserror::Error;

/// Main error type for fetcher operations.
#[derive(Error, Debug)]
pub enum FetcherError {
    /// A required environment variable is missing or malformed, or the
    /// configuration file is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single descriptor could not be acquired.
    #[error("failed to fetch '{uri}': {source}")]
    Fetch {
        uri: String,
        #[source]
        source: AcquireError,
    },

    /// The fetcher for a container exited abnormally or with a non-zero code.
    #[error(
        "failed to fetch URIs for container '{container_id}': exit status {}",
        describe_status(.status)
    )]
    ContainerFetch {
        container_id: String,
        status: Option<i32>,
    },

    /// A fetched archive could not be unpacked.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Execute bit or ownership could not be applied.
    #[error("permission change failed: {0}")]
    Permission(String),

    /// The fetcher process could not be started at all.
    #[error("failed to spawn fetcher: {0}")]
    Spawn(String),

    /// The fetcher was started but its exit status could not be collected.
    #[error("lost track of fetcher process: {0}")]
    Wait(String),
}

impl FetcherError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetcherError::Configuration(_) => exit_codes::CONFIGURATION_ERROR,
            FetcherError::Fetch { .. } | FetcherError::ContainerFetch { .. } => {
                exit_codes::FETCH_FAILURE
            }
            FetcherError::Extraction(_) => exit_codes::EXTRACTION_FAILURE,
            FetcherError::Permission(_) => exit_codes::PERMISSION_FAILURE,
            FetcherError::Spawn(_) | FetcherError::Wait(_) => exit_codes::SPAWN_FAILURE,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

/// Result type alias for fetcher operations.
pub type Result<T> = std::result::Result<T, FetcherError>;
