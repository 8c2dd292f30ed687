//! Resource descriptors and the per-task fetch request.

use crate::config::FetcherConfig;
use std::path::{Path, PathBuf};

/// One resource reference plus its post-fetch flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Scheme-qualified URI or bare filesystem path.
    pub value: String,
    /// Grant execute permission to the fetched file.
    pub executable: bool,
    /// Extract the fetched file if it is a recognized archive.
    /// `None` means "not specified" and is treated as `true`.
    pub extract: Option<bool>,
}

impl ResourceDescriptor {
    /// Descriptor with default flags: not executable, extraction unspecified.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            executable: false,
            extract: None,
        }
    }

    pub fn executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    pub fn extract(mut self, extract: bool) -> Self {
        self.extract = Some(extract);
        self
    }

    /// Effective extraction flag (unset defaults to true).
    pub fn should_extract(&self) -> bool {
        self.extract.unwrap_or(true)
    }
}

/// Everything the fetcher needs to populate one work directory.
///
/// Built once per task launch by the agent and consumed by a single fetcher
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub descriptors: Vec<ResourceDescriptor>,
    pub work_directory: PathBuf,
    pub user: Option<String>,
    pub frameworks_home: Option<String>,
    pub hadoop_home: Option<String>,
}

impl FetchRequest {
    pub fn new<P: AsRef<Path>>(descriptors: Vec<ResourceDescriptor>, work_directory: P) -> Self {
        Self {
            descriptors,
            work_directory: work_directory.as_ref().to_path_buf(),
            user: None,
            frameworks_home: None,
            hadoop_home: None,
        }
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    /// Take the home paths from the agent configuration. A path the
    /// configuration leaves unset keeps the request's own value.
    pub fn with_config(mut self, config: &FetcherConfig) -> Self {
        if let Some(home) = &config.frameworks_home {
            self.frameworks_home = Some(home.clone());
        }
        if let Some(home) = &config.hadoop_home {
            self.hadoop_home = Some(home.clone());
        }
        self
    }

    /// The configured user, treating an empty string as absent.
    pub fn user(&self) -> Option<&str> {
        non_empty(self.user.as_deref())
    }

    pub fn frameworks_home(&self) -> Option<&str> {
        non_empty(self.frameworks_home.as_deref())
    }

    pub fn hadoop_home(&self) -> Option<&str> {
        non_empty(self.hadoop_home.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
