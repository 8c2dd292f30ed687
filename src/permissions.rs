//! Execute bits and ownership for fetched artifacts.

use crate::error::{FetcherError, Result};
use nix::unistd::User;
use std::fs;
use std::os::unix::fs::{PermissionsExt, lchown};
use std::path::Path;
use walkdir::WalkDir;

/// Execute permission for owner, group and others.
const EXECUTE_BITS: u32 = 0o111;

/// Add execute permission for owner, group and others, keeping the existing
/// read/write bits.
pub fn grant_execute(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        FetcherError::Permission(format!("failed to stat '{}': {}", path.display(), e))
    })?;

    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | EXECUTE_BITS);

    fs::set_permissions(path, permissions).map_err(|e| {
        FetcherError::Permission(format!(
            "failed to make '{}' executable: {}",
            path.display(),
            e
        ))
    })?;

    log::debug!("granted execute permission on '{}'", path.display());
    Ok(())
}

/// Hand `path` (and, when `recursive`, everything below it) to `user`.
///
/// Symbolic links are re-owned themselves, never their targets.
pub fn chown_to_user(path: &Path, user: &str, recursive: bool) -> Result<()> {
    let account = User::from_name(user)
        .map_err(|e| FetcherError::Permission(format!("failed to look up user '{}': {}", user, e)))?
        .ok_or_else(|| FetcherError::Permission(format!("unknown user '{}'", user)))?;
    let uid = account.uid.as_raw();
    let gid = account.gid.as_raw();

    let chown = |target: &Path| {
        lchown(target, Some(uid), Some(gid)).map_err(|e| {
            FetcherError::Permission(format!(
                "failed to chown '{}' to '{}': {}",
                target.display(),
                user,
                e
            ))
        })
    };

    if !recursive {
        return chown(path);
    }

    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            FetcherError::Permission(format!(
                "failed to walk '{}' for chown: {}",
                path.display(),
                e
            ))
        })?;
        chown(entry.path())?;
    }

    Ok(())
}
