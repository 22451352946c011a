//! End-to-end shim generation for a resolved release.
//!
//! Drives the per-platform work: compute the digest of the archived
//! binary, render the bootstrap script, persist it at every layout path.
//! Platforms are processed one at a time in sorted order; the first
//! failure aborts the rest of the run, and shims already written stay on
//! disk.

use crate::digest::ArchiveDigester;
use crate::error::Result;
use crate::output::write_stderr_line;
use crate::release::naming::binary_name;
use crate::release::resolver::ProviderRelease;
use crate::repo::ProviderRepo;
use crate::shim::{ShimInputs, render_shim};
use crate::writer::{ShimLayout, persist_shim};
use camino::Utf8Path;
use std::io::Write;

/// Configuration for one shim generation run.
#[derive(Debug)]
pub struct PipelineConfig<'a> {
    /// The repository the release was resolved from.
    pub repo: &'a ProviderRepo,
    /// Base output directory.
    pub base_dir: &'a Utf8Path,
    /// When true, suppress progress output.
    pub quiet: bool,
}

/// Generate and persist a shim for every platform of the release.
///
/// Digests are recomputed from the archived bytes on every run; nothing
/// is trusted from a cache.
///
/// # Errors
///
/// Propagates the first digest or persistence failure; earlier
/// platforms' shims are not rolled back.
pub fn generate_shims(
    config: &PipelineConfig<'_>,
    release: &ProviderRelease,
    digester: &dyn ArchiveDigester,
    stderr: &mut dyn Write,
) -> Result<()> {
    let plugin_name = config.repo.plugin_name();
    let version = release.version().to_string();
    let binary_name = binary_name(plugin_name, release.version());
    log::debug!("binary name {binary_name}");

    for (platform, url) in release.platforms() {
        log::debug!("digesting {binary_name} for {platform} from {url}");
        let digest = digester.digest(url, &binary_name)?;

        let script = render_shim(&ShimInputs {
            download_url: url,
            plugin_name,
            version: &version,
            binary_name: &binary_name,
            digest: &digest,
        });

        let layout = ShimLayout {
            base_dir: config.base_dir,
            publisher: config.repo.owner(),
            plugin_name,
            version: &version,
            platform,
            binary_name: &binary_name,
        };
        let written = persist_shim(&layout, &script)?;

        if !config.quiet {
            for path in &written {
                write_stderr_line(stderr, format!("wrote {path}"));
            }
        }
    }

    Ok(())
}
