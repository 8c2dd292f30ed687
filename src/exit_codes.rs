//! Exit code constants for the `mesos-fetcher` binary.
//!
//! - 0: Every descriptor was fetched (and extracted/chmod'ed as requested)
//! - 1: Configuration error (missing or malformed environment)
//! - 2: Fetch failure (missing source, network, distributed-filesystem client)
//! - 3: Extraction failure (corrupt archive, traversal entry)
//! - 4: Permission failure (chmod/chown)
//! - 5: Spawn failure (agent side only, never returned by the fetcher itself)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Missing or malformed environment variable.
pub const CONFIGURATION_ERROR: i32 = 1;

/// A descriptor could not be acquired.
pub const FETCH_FAILURE: i32 = 2;

/// A fetched archive could not be extracted.
pub const EXTRACTION_FAILURE: i32 = 3;

/// Execute bit or ownership could not be applied.
pub const PERMISSION_FAILURE: i32 = 4;

/// The fetcher process could not be started or supervised.
pub const SPAWN_FAILURE: i32 = 5;
