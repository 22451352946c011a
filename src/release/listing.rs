//! Paginated release listing for a hosted repository.
//!
//! Provides a trait-based abstraction over the remote "list releases"
//! capability, enabling dependency injection for testing, plus the
//! production GitHub implementation.

use crate::http::{USER_AGENT, http_agent};
use serde::Deserialize;

/// The API root for release listings.
const API_ROOT: &str = "https://api.github.com";

/// Fixed page size requested from the listing endpoint.
pub const PAGE_SIZE: u32 = 50;

/// One binary attachment advertised by a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// The asset file name.
    pub name: String,
    /// The asset download locator.
    pub browser_download_url: String,
}

/// One release as advertised by the remote source.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRelease {
    /// The release tag.
    pub tag_name: String,
    /// The release's binary attachments.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One page of the release listing.
#[derive(Debug)]
pub struct ReleasePage {
    /// The releases on this page, in listing order.
    pub releases: Vec<RepoRelease>,
    /// The next page number, when the source reports a further page.
    pub next_page: Option<u32>,
}

/// Errors arising from the release listing.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The listing request failed.
    #[error("request to {url} failed: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The listing response was not the expected payload.
    #[error("malformed listing payload from {url}: {reason}")]
    Decode {
        /// The URL whose response failed to decode.
        url: String,
        /// A human-readable description of the decode failure.
        reason: String,
    },
}

/// Trait for listing releases of a repository, one page at a time.
///
/// Abstraction allows tests to drive resolution without network access.
#[cfg_attr(test, mockall::automock)]
pub trait ReleaseLister {
    /// Fetch one page of the release listing.
    ///
    /// # Errors
    ///
    /// Returns a [`ListError`] when the request fails or the payload
    /// cannot be decoded.
    fn list_page(&self, owner: &str, repo: &str, page: u32) -> Result<ReleasePage, ListError>;
}

/// HTTP-based release lister using the GitHub releases API.
pub struct GitHubReleaseLister;

impl GitHubReleaseLister {
    /// Construct the listing URL for a repository page.
    #[must_use]
    pub fn releases_url(owner: &str, repo: &str, page: u32) -> String {
        format!("{API_ROOT}/repos/{owner}/{repo}/releases?per_page={PAGE_SIZE}&page={page}")
    }
}

impl ReleaseLister for GitHubReleaseLister {
    fn list_page(&self, owner: &str, repo: &str, page: u32) -> Result<ReleasePage, ListError> {
        let url = Self::releases_url(owner, repo, page);
        let response = http_agent()
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .call()
            .map_err(|e| ListError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let next_page = response
            .headers()
            .get("link")
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_from_link);

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ListError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        let releases: Vec<RepoRelease> =
            serde_json::from_str(&body).map_err(|e| ListError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        log::debug!("listed {} release(s) from {url}", releases.len());

        Ok(ReleasePage {
            releases,
            next_page,
        })
    }
}

/// Extract the next page number from a Link response header.
///
/// The header carries comma-separated entries of the form
/// `<https://...?per_page=50&page=2>; rel="next"`; only the entry with
/// relation `next` contributes.
fn next_page_from_link(header: &str) -> Option<u32> {
    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| param.trim() == "rel=\"next\"");
        if !is_next {
            continue;
        }
        let url = target.strip_prefix('<')?.strip_suffix('>')?;
        let (_, query) = url.split_once('?')?;
        return query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))
            .and_then(|value| value.parse().ok());
    }
    None
}
