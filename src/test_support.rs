//! Fixtures shared by the unit tests and the process-level tests.
//!
//! Only depends on std and dev tooling so `tests/` can include it too.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use tempfile::TempDir;

/// A `from` directory holding source files and an empty `work` directory.
pub struct Sandbox {
    _root: TempDir,
    pub from: PathBuf,
    pub work: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        let from = root.path().join("from");
        let work = root.path().join("work");
        fs::create_dir_all(&from).unwrap();
        fs::create_dir_all(&work).unwrap();
        Self {
            _root: root,
            from,
            work,
        }
    }

    /// Write a 0644 source file under `from`, creating parent directories.
    pub fn source_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.from.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        path
    }
}

pub fn mode(path: &Path) -> u32 {
    fs::metadata(path).unwrap().permissions().mode() & 0o777
}

/// A gzip-compressed tarball holding a single file.
pub fn tar_gz(name: &str, content: &[u8]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    let mut header = tar::Header::new_gnu();
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    builder.append_data(&mut header, name, content).unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

/// Install `body` as a shell script named `mesos-fetcher` in `<root>/bin` and
/// return that directory.
pub fn fake_launcher_dir(root: &Path, body: &str) -> PathBuf {
    let bin = root.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let script = bin.join("mesos-fetcher");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

/// Serve `count` requests with the given status line and body, then stop.
/// Returns the base URL (`http://127.0.0.1:<port>`) and the server thread.
pub fn serve(status: &'static str, body: &'static [u8], count: usize) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        for stream in listener.incoming().take(count) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
            stream.flush().unwrap();
        }
    });

    (format!("http://{}", address), handle)
}
