//! Container-side staging of a sandbox before the task starts.
//!
//! Prepares the sandbox log files, runs the fetcher into the work directory
//! and, once everything is in place, hands the sandbox to the task user.

use crate::config::FetcherConfig;
use crate::error::{FetcherError, Result};
use crate::orchestrator;
use crate::permissions::chown_to_user;
use crate::protocol::FetchRequest;
use std::fs::File;
use std::path::Path;

/// Fetch every descriptor of `request` into its work directory for
/// `container_id`.
///
/// The fetcher's output lands in `<work_dir>/stdout` and `<work_dir>/stderr`.
/// Any exit other than `Some(0)` is reported as a failure naming the container.
pub async fn stage(
    container_id: &str,
    request: &FetchRequest,
    config: &FetcherConfig,
) -> Result<()> {
    let user = request.user();

    let stdout = create_log(&request.work_directory, "stdout", user)?;
    let stderr = create_log(&request.work_directory, "stderr", user)?;

    log::info!(
        "fetching {} URI(s) for container '{}' into '{}'",
        request.descriptors.len(),
        container_id,
        request.work_directory.display()
    );

    let mut handle = orchestrator::run(request, config, Some(stdout), Some(stderr))?;
    let status = handle.wait().await?;

    if status != Some(0) {
        return Err(FetcherError::ContainerFetch {
            container_id: container_id.to_string(),
            status,
        });
    }

    if let Some(user) = user {
        chown_to_user(&request.work_directory, user, true)?;
    }

    log::info!("fetched URIs for container '{}'", container_id);
    Ok(())
}

/// Create (or truncate) a sandbox log file, owned by `user` when given.
fn create_log(work_directory: &Path, name: &str, user: Option<&str>) -> Result<File> {
    let path = work_directory.join(name);
    let file = File::create(&path).map_err(|e| {
        FetcherError::Configuration(format!(
            "failed to create sandbox log '{}': {}",
            path.display(),
            e
        ))
    })?;

    if let Some(user) = user {
        chown_to_user(&path, user, false)?;
    }

    Ok(file)
}
