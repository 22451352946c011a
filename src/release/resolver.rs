//! Release resolution: paginate the listing, filter candidates, select
//! the highest version.
//!
//! A candidate release must carry a tag that parses as a semantic
//! version, satisfy the caller's constraint, and advertise at least one
//! asset matching the provider archive naming grammar for a non-Windows
//! platform. Among candidates the highest version wins.

use crate::constraint::{VersionConstraint, parse_release_tag};
use crate::error::{Result, ShimError};
use crate::release::listing::{ReleaseLister, RepoRelease};
use crate::release::naming::match_provider_asset;
use crate::release::platform::PlatformId;
use crate::repo::ProviderRepo;
use semver::Version;
use std::collections::BTreeMap;

/// A release narrowed to its provider binary attachments.
///
/// Holds the parsed version and a map from platform identifier to the
/// download locator of that platform's archive. Windows platforms never
/// appear in the map; when a release advertises several assets for one
/// platform, the last one in listing order wins.
#[derive(Debug, Clone)]
pub struct ProviderRelease {
    version: Version,
    platforms: BTreeMap<PlatformId, String>,
}

impl ProviderRelease {
    /// Return the release version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Return the platform map, keyed in sorted platform order.
    #[must_use]
    pub fn platforms(&self) -> &BTreeMap<PlatformId, String> {
        &self.platforms
    }

    /// Build a provider release from a listed release.
    ///
    /// Returns `None` when the tag does not parse as a version. The
    /// platform map may be empty; candidacy is decided by the caller.
    ///
    /// This function is public to allow integration tests to construct
    /// releases from listing payloads.
    #[must_use]
    pub fn from_repo_release(release: &RepoRelease) -> Option<Self> {
        let version = parse_release_tag(&release.tag_name)?;

        let mut platforms = BTreeMap::new();
        for asset in &release.assets {
            let Some(matched) = match_provider_asset(&asset.name) else {
                continue;
            };
            if matched.platform().is_windows() {
                // Shims are POSIX shell; Windows binaries get none.
                continue;
            }
            platforms.insert(matched.into_platform(), asset.browser_download_url.clone());
        }

        Some(Self { version, platforms })
    }
}

/// Resolve the latest release of `repo` satisfying `constraint`.
///
/// Pages through the complete listing before selecting, so a later page
/// can still supply the highest version. A transport failure on any page
/// aborts the whole call; there are no partial results.
///
/// # Errors
///
/// Returns [`ShimError::Listing`] when a page cannot be fetched and
/// [`ShimError::NoMatchingRelease`] when no candidate survives
/// filtering.
pub fn find_latest(
    lister: &dyn ReleaseLister,
    repo: &ProviderRepo,
    constraint: &VersionConstraint,
) -> Result<ProviderRelease> {
    let mut candidates = Vec::new();
    let mut page = 1;

    loop {
        let listing = lister.list_page(repo.owner(), repo.name(), page)?;
        for release in &listing.releases {
            let Some(candidate) = ProviderRelease::from_repo_release(release) else {
                log::debug!(
                    "skipping release {}: tag is not a semantic version",
                    release.tag_name
                );
                continue;
            };
            if !constraint.matches(candidate.version()) {
                continue;
            }
            if candidate.platforms().is_empty() {
                log::debug!(
                    "skipping release {}: no provider archive assets",
                    release.tag_name
                );
                continue;
            }
            candidates.push(candidate);
        }

        match listing.next_page {
            Some(next) => page = next,
            None => break,
        }
    }

    candidates.sort_by(|a, b| b.version().cmp(a.version()));
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ShimError::NoMatchingRelease {
            constraint: constraint.expression().to_owned(),
        })
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
