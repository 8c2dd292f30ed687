//! Sandbox artifact fetcher.
//!
//! The agent side ([`orchestrator`], [`sandbox`]) encodes a [`FetchRequest`]
//! into environment variables and launches the `mesos-fetcher` binary, which
//! decodes it and populates the task's work directory ([`executor`]).
//!
//! [`FetchRequest`]: protocol::FetchRequest

pub mod config;
pub mod error;
pub mod executor;
pub mod exit_codes;
pub mod extract;
pub mod fs;
pub mod logging;
pub mod orchestrator;
pub mod permissions;
pub mod protocol;
pub mod sandbox;
pub mod source;

#[cfg(test)]
mod test_support;

pub use config::FetcherConfig;
pub use error::{FetcherError, Result};
pub use orchestrator::FetchHandle;
pub use protocol::{FetchRequest, ResourceDescriptor};
