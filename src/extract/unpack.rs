//! Format-specific unpacking with traversal checks.

use super::kind::ArchiveKind;
use crate::error::{FetcherError, Result};
use crate::fs::atomic_write_with;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, Read};
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path};
use xz2::read::XzDecoder;

pub(super) fn unpack(kind: ArchiveKind, archive: &Path, work_directory: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| {
        FetcherError::Extraction(format!(
            "failed to open archive '{}': {}",
            archive.display(),
            e
        ))
    })?;

    match kind {
        ArchiveKind::Tar => unpack_tar(file, archive, work_directory),
        ArchiveKind::TarGz => unpack_tar(GzDecoder::new(file), archive, work_directory),
        ArchiveKind::TarBz2 => unpack_tar(BzDecoder::new(file), archive, work_directory),
        ArchiveKind::TarXz => unpack_tar(XzDecoder::new(file), archive, work_directory),
        ArchiveKind::Zip => unpack_zip(file, archive, work_directory),
        ArchiveKind::Gz => decompress(GzDecoder::new(file), kind, archive, work_directory),
        ArchiveKind::Bz2 => decompress(BzDecoder::new(file), kind, archive, work_directory),
        ArchiveKind::Xz => decompress(XzDecoder::new(file), kind, archive, work_directory),
    }
}

fn unpack_tar<R: Read>(reader: R, archive: &Path, work_directory: &Path) -> Result<()> {
    let fail = |what: &str, e: io::Error| {
        FetcherError::Extraction(format!("{} '{}': {}", what, archive.display(), e))
    };

    let mut tar = tar::Archive::new(reader);
    tar.set_preserve_permissions(true);

    for entry in tar.entries().map_err(|e| fail("failed to read archive", e))? {
        let mut entry = entry.map_err(|e| fail("corrupt entry in archive", e))?;
        let entry_path = entry
            .path()
            .map_err(|e| fail("unreadable entry name in archive", e))?
            .into_owned();
        reject_traversal(&entry_path, archive)?;

        // unpack_in strips leading '/' and refuses to write outside the root.
        let unpacked = entry
            .unpack_in(work_directory)
            .map_err(|e| fail("failed to unpack entry from archive", e))?;
        if !unpacked {
            return Err(FetcherError::Extraction(format!(
                "entry '{}' in archive '{}' escapes the work directory",
                entry_path.display(),
                archive.display()
            )));
        }
    }

    Ok(())
}

fn unpack_zip(file: File, archive: &Path, work_directory: &Path) -> Result<()> {
    let fail = |what: &str, e: &dyn std::fmt::Display| {
        FetcherError::Extraction(format!("{} '{}': {}", what, archive.display(), e))
    };

    let root = fs::canonicalize(work_directory)
        .map_err(|e| fail("failed to resolve work directory for", &e))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| fail("failed to open zip archive", &e))?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| fail("corrupt entry in zip archive", &e))?;
        let name = entry.name().to_string();
        reject_traversal(Path::new(&name), archive)?;

        let relative = entry.enclosed_name().ok_or_else(|| escapes(&name, archive))?;

        let target = if entry.is_dir() {
            create_dirs_within(&root, &relative, &name, archive)?;
            root.join(&relative)
        } else {
            if let Some(parent) = relative.parent() {
                create_dirs_within(&root, parent, &name, archive)?;
            }
            let target = root.join(&relative);
            // File::create would follow a symlink left by an earlier archive.
            if fs::symlink_metadata(&target).is_ok_and(|m| m.file_type().is_symlink()) {
                return Err(escapes(&name, archive));
            }
            let mut output =
                File::create(&target).map_err(|e| fail("failed to write entry from", &e))?;
            io::copy(&mut entry, &mut output).map_err(|e| fail("failed to inflate entry from", &e))?;
            target
        };

        if let Some(mode) = entry.unix_mode() {
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|e| fail("failed to restore permissions from", &e))?;
        }
    }

    Ok(())
}

/// Create the directory chain `relative` under `root` one component at a
/// time. An existing symlink along the way must resolve to a directory
/// inside `root`.
fn create_dirs_within(root: &Path, relative: &Path, name: &str, archive: &Path) -> Result<()> {
    let fail = |e: io::Error| {
        FetcherError::Extraction(format!(
            "failed to create directory for entry '{}' in archive '{}': {}",
            name,
            archive.display(),
            e
        ))
    };

    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match fs::symlink_metadata(&current) {
            Ok(metadata) if metadata.file_type().is_symlink() => {
                let resolved = fs::canonicalize(&current).map_err(fail)?;
                if !resolved.starts_with(root) || !resolved.is_dir() {
                    return Err(escapes(name, archive));
                }
            }
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => {
                return Err(FetcherError::Extraction(format!(
                    "entry '{}' in archive '{}' needs '{}' to be a directory",
                    name,
                    archive.display(),
                    current.display()
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir(&current).map_err(fail)?;
            }
            Err(e) => return Err(fail(e)),
        }
    }

    Ok(())
}

fn escapes(name: &str, archive: &Path) -> FetcherError {
    FetcherError::Extraction(format!(
        "entry '{}' in archive '{}' escapes the work directory",
        name,
        archive.display()
    ))
}

/// Decompress a single-stream archive next to itself, dropping the suffix.
fn decompress<R: Read>(
    mut reader: R,
    kind: ArchiveKind,
    archive: &Path,
    work_directory: &Path,
) -> Result<()> {
    let name = archive
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| kind.decompressed_name(n))
        .ok_or_else(|| {
            FetcherError::Extraction(format!(
                "cannot derive an output name for '{}'",
                archive.display()
            ))
        })?;
    let target = work_directory.join(name);

    atomic_write_with(&target, |output| io::copy(&mut reader, output)).map_err(|e| {
        FetcherError::Extraction(format!(
            "failed to decompress '{}' into '{}': {}",
            archive.display(),
            target.display(),
            e
        ))
    })?;

    Ok(())
}

fn reject_traversal(entry: &Path, archive: &Path) -> Result<()> {
    if entry.components().any(|c| c == Component::ParentDir) {
        return Err(FetcherError::Extraction(format!(
            "entry '{}' in archive '{}' contains a parent-directory component",
            entry.display(),
            archive.display()
        )));
    }
    Ok(())
}
