//! Repository identifier for provider sources.
//!
//! Validates the `owner/name` form and the `terraform-provider-` prefix
//! that every recognised provider repository carries; the plugin name is
//! the repository name with that prefix stripped.

use crate::error::ShimError;
use std::fmt;

/// The prefix a provider repository name must carry.
pub const REPO_NAME_PREFIX: &str = "terraform-provider-";

/// A validated `owner/name` repository identifier.
///
/// # Examples
///
/// ```
/// use provider_shim_gen::repo::ProviderRepo;
///
/// let repo: ProviderRepo = "numtide/terraform-provider-linuxbox"
///     .try_into()
///     .expect("valid repository");
/// assert_eq!(repo.owner(), "numtide");
/// assert_eq!(repo.plugin_name(), "linuxbox");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRepo {
    owner: String,
    name: String,
}

impl ProviderRepo {
    /// Return the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Return the full repository name, prefix included.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the plugin name, the repository name with the
    /// `terraform-provider-` prefix stripped.
    #[must_use]
    pub fn plugin_name(&self) -> &str {
        // The constructor guarantees the prefix and a non-empty remainder.
        self.name.strip_prefix(REPO_NAME_PREFIX).unwrap_or(&self.name)
    }
}

impl TryFrom<&str> for ProviderRepo {
    type Error = ShimError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| ShimError::InvalidRepository {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        let (owner, name) = value
            .split_once('/')
            .ok_or_else(|| invalid("expected the format owner/name"))?;
        if owner.is_empty() {
            return Err(invalid("owner must not be empty"));
        }
        if name.contains('/') {
            return Err(invalid("expected exactly one '/' separator"));
        }
        let remainder = name
            .strip_prefix(REPO_NAME_PREFIX)
            .ok_or_else(|| invalid("name must start with \"terraform-provider-\""))?;
        if remainder.is_empty() {
            return Err(invalid("provider name must not be empty after the prefix"));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl TryFrom<String> for ProviderRepo {
    type Error = ShimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl fmt::Display for ProviderRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
