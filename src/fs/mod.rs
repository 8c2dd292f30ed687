//! Filesystem utilities for the fetcher.
//!
//! Artifacts are written through a hidden temporary file in the work directory
//! and renamed into place, so a failed fetch never leaves a truncated file under
//! the artifact's final name.

pub mod atomic;

pub use atomic::{atomic_write_with, staging_path};
