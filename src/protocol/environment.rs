//! Encoder and validating decoder for the fetcher environment block.

use super::descriptor::FetchRequest;
use super::token::{decode_tokens, encode_tokens};
use crate::error::{FetcherError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Space-separated descriptor tokens. Always present.
pub const ENV_EXECUTOR_URIS: &str = "MESOS_EXECUTOR_URIS";
/// Absolute path of the work directory. Always present.
pub const ENV_WORK_DIRECTORY: &str = "MESOS_WORK_DIRECTORY";
/// Task user. Present only if a user was supplied.
pub const ENV_USER: &str = "MESOS_USER";
/// Base for relative resource paths. Present only if non-empty.
pub const ENV_FRAMEWORKS_HOME: &str = "MESOS_FRAMEWORKS_HOME";
/// Hadoop installation used for distributed-filesystem URIs. Present only if non-empty.
pub const ENV_HADOOP_HOME: &str = "HADOOP_HOME";

/// Every key the protocol may set.
pub const PROTOCOL_KEYS: [&str; 5] = [
    ENV_EXECUTOR_URIS,
    ENV_WORK_DIRECTORY,
    ENV_USER,
    ENV_FRAMEWORKS_HOME,
    ENV_HADOOP_HOME,
];

/// Encoded environment: variable name to value.
pub type Environment = BTreeMap<String, String>;

/// Flatten a fetch request into the fetcher's environment block.
///
/// The result holds the two mandatory keys plus one key per present optional
/// field; absent or empty optional fields produce no key at all.
pub fn encode(request: &FetchRequest) -> Result<Environment> {
    let mut environment = Environment::new();

    environment.insert(
        ENV_EXECUTOR_URIS.to_string(),
        encode_tokens(&request.descriptors)?,
    );

    let work_directory = request.work_directory.to_str().ok_or_else(|| {
        FetcherError::Configuration(format!(
            "work directory '{}' is not valid UTF-8",
            request.work_directory.display()
        ))
    })?;
    environment.insert(ENV_WORK_DIRECTORY.to_string(), work_directory.to_string());

    if let Some(user) = request.user() {
        environment.insert(ENV_USER.to_string(), user.to_string());
    }
    if let Some(home) = request.frameworks_home() {
        environment.insert(ENV_FRAMEWORKS_HOME.to_string(), home.to_string());
    }
    if let Some(home) = request.hadoop_home() {
        environment.insert(ENV_HADOOP_HOME.to_string(), home.to_string());
    }

    Ok(environment)
}

/// Rebuild a fetch request from an environment lookup.
///
/// `lookup` returns the value of a variable, or `None` when it is unset.
pub fn decode<F>(lookup: F) -> Result<FetchRequest>
where
    F: Fn(&str) -> Option<String>,
{
    let uris = lookup(ENV_EXECUTOR_URIS).ok_or_else(|| missing(ENV_EXECUTOR_URIS))?;
    let work_directory = lookup(ENV_WORK_DIRECTORY)
        .filter(|dir| !dir.is_empty())
        .ok_or_else(|| missing(ENV_WORK_DIRECTORY))?;

    let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());

    Ok(FetchRequest {
        descriptors: decode_tokens(&uris)?,
        work_directory: PathBuf::from(work_directory),
        user: optional(ENV_USER),
        frameworks_home: optional(ENV_FRAMEWORKS_HOME),
        hadoop_home: optional(ENV_HADOOP_HOME),
    })
}

impl FetchRequest {
    /// Decode the request from the current process environment.
    pub fn from_env() -> Result<Self> {
        decode(|key| std::env::var(key).ok())
    }
}

fn missing(key: &str) -> FetcherError {
    FetcherError::Configuration(format!("environment variable {} is not set", key))
}
