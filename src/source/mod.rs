//! Resource acquisition: one descriptor value in, one local artifact out.
//!
//! Every supported kind of source is a case of [`Source`]; supporting a new
//! scheme means adding a variant and a match arm, nothing else.
//!
//! | Value                                  | Variant          |
//! |----------------------------------------|------------------|
//! | `/abs/path`, `relative/path`           | `Local`          |
//! | `file:///path`, `file://localhost/path`| `File`           |
//! | `http://…`, `https://…`                | `Http`           |
//! | `hdfs://…`, `hftp://…`, `s3://…`, `s3n://…` | `DistributedFs` |

mod error;
mod hdfs;
mod http;
mod local;
mod naming;

pub use error::AcquireError;
pub use naming::artifact_name;

use crate::protocol::FetchRequest;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Where a descriptor's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Bare filesystem path, possibly relative to the frameworks home.
    Local(PathBuf),
    /// `file://` URI, already stripped to an absolute path.
    File(PathBuf),
    /// `http://` or `https://` URL.
    Http(Url),
    /// URI handled by the Hadoop client.
    DistributedFs(String),
}

/// Per-invocation settings every source may need.
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    pub work_directory: &'a Path,
    pub frameworks_home: Option<&'a str>,
    pub hadoop_home: Option<&'a str>,
}

impl<'a> FetchContext<'a> {
    pub fn from_request(request: &'a FetchRequest) -> Self {
        Self {
            work_directory: &request.work_directory,
            frameworks_home: request.frameworks_home(),
            hadoop_home: request.hadoop_home(),
        }
    }
}

impl Source {
    /// Classify a descriptor value.
    pub fn classify(value: &str) -> Result<Self, AcquireError> {
        let Some((scheme, rest)) = value.split_once("://") else {
            return Ok(Source::Local(PathBuf::from(value)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "file" => file_path(value, rest).map(Source::File),
            "http" | "https" => Url::parse(value)
                .map(Source::Http)
                .map_err(|e| AcquireError::InvalidUri {
                    uri: value.to_string(),
                    reason: e.to_string(),
                }),
            s if hdfs::SCHEMES.contains(&s) => Ok(Source::DistributedFs(value.to_string())),
            _ => Err(AcquireError::UnsupportedScheme(scheme.to_string())),
        }
    }

    /// Name of the artifact this source produces in the work directory.
    pub fn artifact_name(&self) -> Result<String, AcquireError> {
        match self {
            Source::Local(path) | Source::File(path) => {
                artifact_name(&path.to_string_lossy())
            }
            Source::Http(url) => {
                let segment = url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default();
                let decoded = urlencoding::decode(segment)
                    .map_err(|_| AcquireError::InvalidName(url.to_string()))?;
                artifact_name(&decoded)
            }
            Source::DistributedFs(uri) => artifact_name(uri),
        }
    }

    /// Fetch into the work directory and return the artifact path.
    pub fn fetch(&self, ctx: &FetchContext<'_>) -> Result<PathBuf, AcquireError> {
        let destination = ctx.work_directory.join(self.artifact_name()?);

        match self {
            Source::Local(path) => {
                let source = local::resolve(path, ctx.frameworks_home)?;
                log::info!(
                    "copying '{}' to '{}'",
                    source.display(),
                    destination.display()
                );
                local::copy(&source, &destination)?;
            }
            Source::File(path) => {
                log::info!(
                    "copying '{}' to '{}'",
                    path.display(),
                    destination.display()
                );
                local::copy(path, &destination)?;
            }
            Source::Http(url) => {
                log::info!("downloading '{}' to '{}'", url, destination.display());
                let bytes = http::download(url, &destination)?;
                log::debug!("downloaded {} bytes from '{}'", bytes, url);
            }
            Source::DistributedFs(uri) => {
                log::info!(
                    "copying '{}' to '{}' with the hadoop client",
                    uri,
                    destination.display()
                );
                hdfs::copy_to_local(uri, &destination, ctx.hadoop_home)?;
            }
        }

        Ok(destination)
    }
}

/// Path portion of a `file://` URI. Only the empty host and `localhost` are
/// accepted.
fn file_path(uri: &str, rest: &str) -> Result<PathBuf, AcquireError> {
    let path = if rest.starts_with('/') {
        rest
    } else if let Some(path) = rest.strip_prefix("localhost") {
        path
    } else {
        return Err(AcquireError::InvalidUri {
            uri: uri.to_string(),
            reason: "file URIs must name a local path".to_string(),
        });
    };

    if !path.starts_with('/') {
        return Err(AcquireError::InvalidUri {
            uri: uri.to_string(),
            reason: "file URIs must carry an absolute path".to_string(),
        });
    }

    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ctx(work_directory: &Path) -> FetchContext<'_> {
        FetchContext {
            work_directory,
            frameworks_home: None,
            hadoop_home: None,
        }
    }

    #[test]
    fn test_classify_bare_paths() {
        assert_eq!(
            Source::classify("/opt/app").unwrap(),
            Source::Local(PathBuf::from("/opt/app"))
        );
        assert_eq!(
            Source::classify("bin/app").unwrap(),
            Source::Local(PathBuf::from("bin/app"))
        );
    }

    #[test]
    fn test_classify_file_uris() {
        assert_eq!(
            Source::classify("file:///tmp/from/test").unwrap(),
            Source::File(PathBuf::from("/tmp/from/test"))
        );
        assert_eq!(
            Source::classify("file://localhost/tmp/from/test").unwrap(),
            Source::File(PathBuf::from("/tmp/from/test"))
        );
        assert!(matches!(
            Source::classify("file://otherhost/tmp/test"),
            Err(AcquireError::InvalidUri { .. })
        ));
        assert!(matches!(
            Source::classify("file://localhostrelative"),
            Err(AcquireError::InvalidUri { .. })
        ));
    }

    #[test]
    fn test_classify_http_and_distributed_fs() {
        assert!(matches!(
            Source::classify("http://example.com/help").unwrap(),
            Source::Http(_)
        ));
        assert!(matches!(
            Source::classify("HTTPS://example.com/help").unwrap(),
            Source::Http(_)
        ));
        for uri in ["hdfs:///uri", "hftp://nn/a", "s3://bucket/a", "s3n://bucket/a"] {
            assert_eq!(
                Source::classify(uri).unwrap(),
                Source::DistributedFs(uri.to_string())
            );
        }
    }

    #[test]
    fn test_classify_unknown_scheme() {
        let err = Source::classify("gopher://example.com/file").unwrap_err();
        assert!(matches!(err, AcquireError::UnsupportedScheme(ref s) if s == "gopher"));
    }

    #[test]
    fn test_artifact_names() {
        let cases = [
            ("/opt/bundles/app.tar.gz", "app.tar.gz"),
            ("file://localhost/tmp/test", "test"),
            ("http://example.com/dist/tool?version=2", "tool"),
            ("hdfs://nn:8020/jobs/job.jar", "job.jar"),
        ];
        for (value, expected) in cases {
            let source = Source::classify(value).unwrap();
            assert_eq!(source.artifact_name().unwrap(), expected);
        }
    }

    #[test]
    fn test_http_artifact_name_is_percent_decoded() {
        let source = Source::classify("http://example.com/dist/my%20tool").unwrap();
        assert_eq!(source.artifact_name().unwrap(), "my tool");

        let source = Source::classify("https://example.com/caf%C3%A9.tgz").unwrap();
        assert_eq!(source.artifact_name().unwrap(), "café.tgz");
    }

    #[test]
    fn test_http_encoded_separators_cannot_escape() {
        let source = Source::classify("http://example.com/dist/a%2F..").unwrap();
        assert!(matches!(
            source.artifact_name(),
            Err(AcquireError::InvalidName(_))
        ));

        let source = Source::classify("http://example.com/dist/x%2Fpayload").unwrap();
        assert_eq!(source.artifact_name().unwrap(), "payload");
    }

    #[test]
    fn test_artifact_name_without_path_is_rejected() {
        let source = Source::classify("http://example.com/").unwrap();
        assert!(matches!(
            source.artifact_name(),
            Err(AcquireError::InvalidName(_))
        ));

        let source = Source::classify("/opt/..").unwrap();
        assert!(matches!(
            source.artifact_name(),
            Err(AcquireError::InvalidName(_))
        ));
    }

    #[test]
    fn test_fetch_file_uri_copies_into_work_directory() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("from");
        let work = temp_dir.path().join("work");
        fs::create_dir_all(&from).unwrap();
        fs::create_dir_all(&work).unwrap();
        fs::write(from.join("test"), "data").unwrap();

        let value = format!("file://{}", from.join("test").display());
        let path = Source::classify(&value).unwrap().fetch(&ctx(&work)).unwrap();

        assert_eq!(path, work.join("test"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "data");
    }

    #[test]
    fn test_fetch_relative_path_uses_frameworks_home() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("frameworks");
        let work = temp_dir.path().join("work");
        fs::create_dir_all(home.join("spark")).unwrap();
        fs::create_dir_all(&work).unwrap();
        fs::write(home.join("spark").join("runner"), "#!/bin/sh\n").unwrap();

        let home_str = home.to_str().unwrap();
        let ctx = FetchContext {
            work_directory: &work,
            frameworks_home: Some(home_str),
            hadoop_home: None,
        };
        let path = Source::classify("spark/runner").unwrap().fetch(&ctx).unwrap();

        assert_eq!(path, work.join("runner"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "#!/bin/sh\n");
    }

    #[test]
    fn test_fetch_http_uses_final_path_segment() {
        let (base, server) = crate::test_support::serve("200 OK", b"ok", 1);
        let temp_dir = TempDir::new().unwrap();

        let source = Source::classify(&format!("{}/docs/help", base)).unwrap();
        let path = source.fetch(&ctx(temp_dir.path())).unwrap();

        server.join().unwrap();
        assert_eq!(path, temp_dir.path().join("help"));
        assert_eq!(fs::read(&path).unwrap(), b"ok");
    }
}
