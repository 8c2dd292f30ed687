//! The fetcher's driver loop.
//!
//! Descriptors are processed strictly in order: acquire, then extract, then
//! set the execute bit. The first failure stops the run; artifacts fetched
//! before it stay in the work directory.

#[cfg(test)]
mod tests;

use crate::error::{FetcherError, Result};
use crate::extract::maybe_extract;
use crate::permissions::{chown_to_user, grant_execute};
use crate::protocol::{FetchRequest, ResourceDescriptor};
use crate::source::{FetchContext, Source};
use std::path::PathBuf;

/// Fetch every descriptor of `request` into its work directory.
pub fn run(request: &FetchRequest) -> Result<()> {
    let work_directory = &request.work_directory;
    if !work_directory.is_dir() {
        return Err(FetcherError::Configuration(format!(
            "work directory '{}' does not exist or is not a directory",
            work_directory.display()
        )));
    }

    let ctx = FetchContext::from_request(request);
    let total = request.descriptors.len();

    for (index, descriptor) in request.descriptors.iter().enumerate() {
        log::info!("fetching resource {}/{}: '{}'", index + 1, total, descriptor.value);
        let artifact = fetch_one(descriptor, &ctx)?;
        log::info!("fetched '{}' to '{}'", descriptor.value, artifact.display());
    }

    if let Some(user) = request.user() {
        log::info!(
            "changing ownership of '{}' to '{}'",
            work_directory.display(),
            user
        );
        chown_to_user(work_directory, user, true)?;
    }

    Ok(())
}

/// Acquire one descriptor and apply its post-fetch flags.
///
/// The execute bit only applies to an artifact that was not extracted; for an
/// unpacked archive the members keep the modes recorded in the archive.
pub fn fetch_one(descriptor: &ResourceDescriptor, ctx: &FetchContext<'_>) -> Result<PathBuf> {
    let fetch_failed = |source| FetcherError::Fetch {
        uri: descriptor.value.clone(),
        source,
    };

    let source = Source::classify(&descriptor.value).map_err(fetch_failed)?;
    let artifact = source.fetch(ctx).map_err(fetch_failed)?;

    let extraction = maybe_extract(&artifact, ctx.work_directory, descriptor.should_extract())?;

    if descriptor.executable {
        if extraction.is_extracted() {
            log::warn!(
                "'{}' was extracted, ignoring its executable flag",
                artifact.display()
            );
        } else {
            grant_execute(&artifact)?;
        }
    }

    Ok(artifact)
}
