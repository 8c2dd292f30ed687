//! Agent-side launcher for the fetcher process.
//!
//! Encodes a [`FetchRequest`] into the child's environment, starts
//! `<launcher_dir>/mesos-fetcher` without blocking, and hands back a
//! [`FetchHandle`] that resolves to the child's exit status.

use crate::config::FetcherConfig;
use crate::error::{FetcherError, Result};
use crate::protocol::{FetchRequest, PROTOCOL_KEYS, encode};
use std::fs::File;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::sync::oneshot;


/// A running (or finished) fetcher process.
///
/// Dropping the handle leaves the child running; only [`FetchHandle::kill`]
/// terminates it.
#[derive(Debug)]
pub struct FetchHandle {
    pid: Option<u32>,
    status: oneshot::Receiver<io::Result<ExitStatus>>,
    kill: Option<oneshot::Sender<()>>,
    outcome: Option<Option<i32>>,
}

impl FetchHandle {
    /// OS process id of the child, if it was still known at spawn time.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Ask the supervising task to kill the child.
    ///
    /// Returns `false` if the child had already been reaped or a kill was
    /// already requested.
    pub fn kill(&mut self) -> bool {
        match self.kill.take() {
            Some(sender) => sender.send(()).is_ok(),
            None => false,
        }
    }

    /// Wait for the child to terminate.
    ///
    /// Yields `Some(code)` on a normal exit and `None` when the child was
    /// terminated by a signal. A non-zero code is not an error here.
    /// Cancel-safe: a timed-out wait can be retried or followed by `kill`.
    pub async fn wait(&mut self) -> Result<Option<i32>> {
        if let Some(code) = self.outcome {
            return Ok(code);
        }

        let status = (&mut self.status)
            .await
            .map_err(|_| FetcherError::Wait("supervisor task exited without a status".into()))?
            .map_err(|e| FetcherError::Wait(format!("failed to wait for fetcher: {}", e)))?;

        let code = status.code();
        self.outcome = Some(code);
        self.kill = None;
        Ok(code)
    }
}

/// Launch the fetcher for `request` and return immediately.
///
/// The child inherits the agent's environment minus any stale protocol keys,
/// with the encoded request laid on top. Home paths set in `config` take
/// precedence over the request's; unset ones keep the request's values.
/// `stdout`/`stderr` default to the null device; stdin is always null.
///
/// Must be called from within a tokio runtime.
pub fn run(
    request: &FetchRequest,
    config: &FetcherConfig,
    stdout: Option<File>,
    stderr: Option<File>,
) -> Result<FetchHandle> {
    let program = config.fetcher_path();
    let request = request.clone().with_config(config);
    let environment = encode(&request)?;

    let mut command = Command::new(&program);
    for key in PROTOCOL_KEYS {
        command.env_remove(key);
    }
    command
        .envs(&environment)
        .stdin(Stdio::null())
        .stdout(stdout.map(Stdio::from).unwrap_or_else(Stdio::null))
        .stderr(stderr.map(Stdio::from).unwrap_or_else(Stdio::null));

    let mut child = command.spawn().map_err(|e| {
        FetcherError::Spawn(format!(
            "failed to execute '{}': {}",
            program.display(),
            e
        ))
    })?;

    let pid = child.id();
    log::info!(
        "started fetcher '{}' (pid {:?}) for {} descriptor(s) into '{}'",
        program.display(),
        pid,
        request.descriptors.len(),
        request.work_directory.display()
    );

    let (status_sender, status) = oneshot::channel();
    let (kill, kill_receiver) = oneshot::channel::<()>();

    tokio::spawn(async move {
        // A dropped kill sender disables the second branch instead of
        // firing it, so losing the handle never kills the child.
        let status = tokio::select! {
            status = child.wait() => status,
            Ok(()) = kill_receiver => {
                log::warn!("killing fetcher (pid {:?})", pid);
                if let Err(e) = child.start_kill() {
                    log::warn!("failed to signal fetcher (pid {:?}): {}", pid, e);
                }
                child.wait().await
            }
        };

        match &status {
            Ok(exit) => log::debug!("fetcher (pid {:?}) exited: {}", pid, exit),
            Err(e) => log::warn!("failed to wait for fetcher (pid {:?}): {}", pid, e),
        }
        let _ = status_sender.send(status);
    });

    Ok(FetchHandle {
        pid,
        status,
        kill: Some(kill),
        outcome: None,
    })
}
