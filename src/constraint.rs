//! Version constraint parsing and release tag interpretation.
//!
//! Constraints use the standard semantic-versioning requirement grammar
//! (`*`, exact versions, comparison operators, tilde and caret ranges,
//! comma-combined). Release tags are interpreted as semantic versions with
//! an optional leading `v`; tags that do not parse are simply not
//! versions and are excluded from consideration.

use crate::error::ShimError;
use semver::{Version, VersionReq};
use std::fmt;

/// A parsed, immutable version constraint.
///
/// # Examples
///
/// ```
/// use provider_shim_gen::constraint::{VersionConstraint, parse_release_tag};
///
/// let constraint = VersionConstraint::parse("~1").expect("valid constraint");
/// let version = parse_release_tag("v1.2.0").expect("valid tag");
/// assert!(constraint.matches(&version));
/// ```
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    req: VersionReq,
    expression: String,
}

impl VersionConstraint {
    /// Parse a constraint expression.
    ///
    /// # Errors
    ///
    /// Returns [`ShimError::InvalidConstraint`] when the expression does
    /// not follow the requirement grammar.
    pub fn parse(expression: &str) -> Result<Self, ShimError> {
        let req = VersionReq::parse(expression).map_err(|e| ShimError::InvalidConstraint {
            expression: expression.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            req,
            expression: expression.to_owned(),
        })
    }

    /// Check whether a version satisfies the constraint.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
    }

    /// Return the expression the constraint was parsed from.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// Interpret a release tag as a semantic version.
///
/// A single leading `v` is tolerated. Returns `None` for tags that are
/// not versions; such releases are excluded from resolution.
#[must_use]
pub fn parse_release_tag(tag: &str) -> Option<Version> {
    let bare = tag.strip_prefix('v').unwrap_or(tag);
    Version::parse(bare).ok()
}
