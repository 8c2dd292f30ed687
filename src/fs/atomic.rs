//! Atomic artifact writes.
//!
//! All writes follow this pattern:
//! 1. Stream content into `.{filename}.tmp` next to the target
//! 2. Sync the file to disk
//! 3. `rename()` it over the target
//!
//! On crash a temporary file may remain in the work directory. Concurrent
//! fetchers writing the same name race on the final rename; the last one wins.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Temporary path used while `target` is being written.
pub fn staging_path(target: &Path) -> io::Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid file path '{}'", target.display()),
            )
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Atomically create `target` with whatever `write` puts into the file.
///
/// The temporary file is removed if `write` fails, so the target is either the
/// complete new content or untouched.
pub fn atomic_write_with<F>(target: &Path, write: F) -> io::Result<u64>
where
    F: FnOnce(&mut File) -> io::Result<u64>,
{
    let temp_path = staging_path(target)?;

    let written = match write_and_sync(&temp_path, write) {
        Ok(written) => written,
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&temp_path, target) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(written)
}

fn write_and_sync<F>(path: &Path, write: F) -> io::Result<u64>
where
    F: FnOnce(&mut File) -> io::Result<u64>,
{
    let mut file = File::create(path)?;
    let written = write(&mut file)?;
    file.sync_all()?;
    Ok(written)
}
