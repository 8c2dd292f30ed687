//! Agent-side configuration for the sandbox fetcher.
//!
//! This module defines the [`FetcherConfig`] struct, normally read from a YAML
//! file alongside the rest of the agent settings. It supports forward-compatible
//! parsing (unknown fields are ignored) and sensible defaults.

mod model;
mod operations;


pub use model::{FETCHER_BINARY, FetcherConfig};
