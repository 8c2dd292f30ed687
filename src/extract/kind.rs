//! Archive families recognized by file name.

use std::fmt;

/// A supported archive or compressed-stream format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Tar,
    TarGz,
    TarBz2,
    TarXz,
    Zip,
    /// A single gzip-compressed file.
    Gz,
    /// A single bzip2-compressed file.
    Bz2,
    /// A single xz-compressed file.
    Xz,
}

/// Suffixes checked in order; compound tar suffixes come before the bare
/// compressor ones.
const SUFFIXES: [(&str, ArchiveKind); 12] = [
    (".tar.gz", ArchiveKind::TarGz),
    (".tgz", ArchiveKind::TarGz),
    (".tar.bz2", ArchiveKind::TarBz2),
    (".tbz2", ArchiveKind::TarBz2),
    (".tbz", ArchiveKind::TarBz2),
    (".tar.xz", ArchiveKind::TarXz),
    (".txz", ArchiveKind::TarXz),
    (".tar", ArchiveKind::Tar),
    (".zip", ArchiveKind::Zip),
    (".gz", ArchiveKind::Gz),
    (".bz2", ArchiveKind::Bz2),
    (".xz", ArchiveKind::Xz),
];

impl ArchiveKind {
    /// Classify a file name by suffix, ignoring ASCII case.
    ///
    /// A name consisting of nothing but the suffix is not an archive.
    pub fn detect(file_name: &str) -> Option<Self> {
        let lower = file_name.to_ascii_lowercase();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| lower.len() > suffix.len() && lower.ends_with(suffix))
            .map(|&(_, kind)| kind)
    }

    /// Name of the file produced by decompressing a single-stream archive.
    pub fn decompressed_name(&self, file_name: &str) -> Option<String> {
        let suffix_len = match self {
            ArchiveKind::Gz => 3,
            ArchiveKind::Bz2 => 4,
            ArchiveKind::Xz => 3,
            _ => return None,
        };
        let stem = file_name.get(..file_name.len().checked_sub(suffix_len)?)?;
        (!stem.is_empty()).then(|| stem.to_string())
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveKind::Tar => "tar",
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::TarBz2 => "tar.bz2",
            ArchiveKind::TarXz => "tar.xz",
            ArchiveKind::Zip => "zip",
            ArchiveKind::Gz => "gzip",
            ArchiveKind::Bz2 => "bzip2",
            ArchiveKind::Xz => "xz",
        };
        f.write_str(name)
    }
}
