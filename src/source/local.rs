//! Local filesystem sources (bare paths and `file://` URIs).

use super::error::AcquireError;
use crate::fs::atomic_write_with;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Resolve a bare path against `frameworks_home` when it is relative.
pub fn resolve(path: &Path, frameworks_home: Option<&str>) -> Result<PathBuf, AcquireError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    match frameworks_home {
        Some(home) => Ok(Path::new(home).join(path)),
        None => Err(AcquireError::RelativePathWithoutHome(
            path.display().to_string(),
        )),
    }
}

/// Copy `source` into `destination`, replacing any previous file there.
pub fn copy(source: &Path, destination: &Path) -> Result<u64, AcquireError> {
    if !source.exists() {
        return Err(AcquireError::SourceNotFound(source.to_path_buf()));
    }
    if source.is_dir() {
        return Err(AcquireError::SourceRead {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source is a directory"),
        });
    }

    if is_same_file(source, destination) {
        log::debug!(
            "'{}' is already in place, skipping copy",
            destination.display()
        );
        return Ok(0);
    }

    let mut input = File::open(source).map_err(|e| AcquireError::SourceRead {
        path: source.to_path_buf(),
        source: e,
    })?;

    atomic_write_with(destination, |output| io::copy(&mut input, output)).map_err(|e| {
        AcquireError::Destination {
            path: destination.to_path_buf(),
            source: e,
        }
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
