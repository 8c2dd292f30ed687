//! Archive detection and in-place extraction.
//!
//! Archives are classified by file name suffix only. Files with an
//! unrecognized suffix are left alone; that is not an error. The archive
//! itself is kept after a successful extraction.

mod kind;
mod unpack;


pub use kind::ArchiveKind;

use crate::error::Result;
use std::path::Path;

/// What [`maybe_extract`] did with a fetched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The archive was unpacked into the work directory.
    Extracted(ArchiveKind),
    /// Extraction was not requested or the file is not a known archive.
    LeftAsIs,
}

impl Extraction {
    pub fn is_extracted(&self) -> bool {
        matches!(self, Extraction::Extracted(_))
    }
}

/// Extract `path` into `work_directory` when `extract` is set and the file
/// name identifies a supported archive.
pub fn maybe_extract(path: &Path, work_directory: &Path, extract: bool) -> Result<Extraction> {
    if !extract {
        return Ok(Extraction::LeftAsIs);
    }

    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(Extraction::LeftAsIs);
    };

    let Some(kind) = ArchiveKind::detect(name) else {
        log::debug!("'{}' is not a recognized archive, leaving it as is", name);
        return Ok(Extraction::LeftAsIs);
    };

    log::info!(
        "extracting {} archive '{}' into '{}'",
        kind,
        path.display(),
        work_directory.display()
    );
    unpack::unpack(kind, path, work_directory)?;

    Ok(Extraction::Extracted(kind))
}
