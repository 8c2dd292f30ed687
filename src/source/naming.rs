//! Destination file names for fetched artifacts.

use super::error::AcquireError;

/// Final `/`-separated component of `location`, the name the artifact gets in
/// the work directory.
///
/// Empty components (trailing slash), `.` and `..` are rejected so the
/// destination always stays directly inside the work directory.
pub fn artifact_name(location: &str) -> Result<String, AcquireError> {
    let name = location.rsplit('/').next().unwrap_or(location);

    match name {
        "" | "." | ".." => Err(AcquireError::InvalidName(location.to_string())),
        _ => Ok(name.to_string()),
    }
}
