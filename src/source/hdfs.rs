//! Distributed-filesystem sources, fetched through the Hadoop client.

use super::error::AcquireError;
use crate::fs::staging_path;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// URI schemes handed to the Hadoop client.
pub const SCHEMES: [&str; 4] = ["hdfs", "hftp", "s3", "s3n"];

/// The `hadoop` executable: `<hadoop_home>/bin/hadoop`, or `hadoop` from `PATH`.
pub fn client_path(hadoop_home: Option<&str>) -> PathBuf {
    match hadoop_home {
        Some(home) => Path::new(home).join("bin").join("hadoop"),
        None => PathBuf::from("hadoop"),
    }
}

/// Run `hadoop fs -copyToLocal <uri> <destination>`.
///
/// The client writes into a staging name first so an interrupted copy never
/// appears under the artifact's final name.
pub fn copy_to_local(
    uri: &str,
    destination: &Path,
    hadoop_home: Option<&str>,
) -> Result<(), AcquireError> {
    let client = client_path(hadoop_home);
    if hadoop_home.is_some() && !client.exists() {
        return Err(AcquireError::ClientMissing(client));
    }

    let destination_error = |e: io::Error| AcquireError::Destination {
        path: destination.to_path_buf(),
        source: e,
    };

    let staging = staging_path(destination).map_err(destination_error)?;
    // copyToLocal refuses to overwrite, so clear any leftover from a crash.
    if staging.exists() {
        fs::remove_file(&staging).map_err(destination_error)?;
    }

    log::debug!(
        "running {} fs -copyToLocal {} {}",
        client.display(),
        uri,
        staging.display()
    );

    let output = Command::new(&client)
        .arg("fs")
        .arg("-copyToLocal")
        .arg(uri)
        .arg(&staging)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AcquireError::ClientMissing(client.clone()),
            _ => AcquireError::ClientFailed(format!(
                "failed to execute '{}': {}",
                client.display(),
                e
            )),
        })?;

    if !output.status.success() {
        let _ = fs::remove_file(&staging);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AcquireError::ClientFailed(format!(
            "'{} fs -copyToLocal {}' exited with {:?}: {}",
            client.display(),
            uri,
            output.status.code(),
            stderr.trim()
        )));
    }

    fs::rename(&staging, destination).map_err(|e| {
        let _ = fs::remove_file(&staging);
        destination_error(e)
    })
}
