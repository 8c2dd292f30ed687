//! HTTP(S) sources.

use super::error::AcquireError;
use crate::fs::atomic_write_with;
use reqwest::Url;
use reqwest::blocking::Client;
use std::io::{self, Read, Write};
use std::path::Path;
use std::time::Duration;

const BUFFER_SIZE: usize = 64 * 1024;

/// Stream the body of `url` into `destination`.
///
/// Non-2xx responses are network errors. Read failures while streaming are
/// reported as network errors; write failures as destination errors.
pub fn download(url: &Url, destination: &Path) -> Result<u64, AcquireError> {
    // No overall timeout: large artifacts may legitimately take a long time.
    let client = Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| AcquireError::Network(format!("failed to build HTTP client: {}", e)))?;

    let mut response = client
        .get(url.clone())
        .send()
        .map_err(|e| AcquireError::Network(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Network(format!(
            "HTTP {} downloading {}",
            status, url
        )));
    }

    let mut read_error = None;
    let result = atomic_write_with(destination, |file| {
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut total = 0u64;
        loop {
            let n = match response.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    let message = e.to_string();
                    read_error = Some(message.clone());
                    return Err(io::Error::other(message));
                }
            };
            file.write_all(&buffer[..n])?;
            total += n as u64;
        }
        Ok(total)
    });

    result.map_err(|e| match read_error {
        Some(message) => AcquireError::Network(format!(
            "connection failed while downloading {}: {}",
            url, message
        )),
        None => AcquireError::Destination {
            path: destination.to_path_buf(),
            source: e,
        },
    })
}
