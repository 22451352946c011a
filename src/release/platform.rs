//! Platform identifier validation for release assets.
//!
//! A platform identifier is an `os_arch` pair such as `linux_amd64` or
//! `darwin_arm64`: two non-empty lowercase alphanumeric segments joined
//! by a single underscore.

use std::fmt;
use thiserror::Error;

/// The operating-system marker whose binaries never get shims: the
/// generated bootstrap script is POSIX shell.
const WINDOWS_OS: &str = "windows";

/// Error returned when a platform identifier fails validation.
#[derive(Debug, Error)]
#[error("invalid platform identifier \"{value}\": {reason}")]
pub struct InvalidPlatformId {
    /// The rejected value.
    pub value: String,
    /// Description of the validation failure.
    pub reason: String,
}

/// A validated `os_arch` platform identifier.
///
/// # Examples
///
/// ```
/// use provider_shim_gen::release::platform::PlatformId;
///
/// let platform: PlatformId = "linux_amd64".try_into().expect("valid platform");
/// assert_eq!(platform.os(), "linux");
/// assert_eq!(platform.arch(), "amd64");
/// assert!(!platform.is_windows());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(String);

impl PlatformId {
    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Return the operating-system segment.
    #[must_use]
    pub fn os(&self) -> &str {
        self.0.split_once('_').map_or(self.0.as_str(), |(os, _)| os)
    }

    /// Return the architecture segment.
    #[must_use]
    pub fn arch(&self) -> &str {
        self.0
            .split_once('_')
            .map_or(self.0.as_str(), |(_, arch)| arch)
    }

    /// Whether this identifier targets Windows. The marker is matched
    /// anywhere in the identifier, not just the os segment.
    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.0.contains(WINDOWS_OS)
    }
}

/// Check that every byte is lowercase ASCII alphanumeric.
fn is_valid_segment_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

impl TryFrom<&str> for PlatformId {
    type Error = InvalidPlatformId;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = |reason: String| InvalidPlatformId {
            value: value.to_owned(),
            reason,
        };

        let (os, arch) = value
            .split_once('_')
            .ok_or_else(|| invalid("expected the form os_arch".to_owned()))?;
        if os.is_empty() || arch.is_empty() {
            return Err(invalid("os and arch must not be empty".to_owned()));
        }
        if arch.contains('_') {
            return Err(invalid("expected exactly one '_' separator".to_owned()));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| *c != '_' && !is_valid_segment_char(*c))
        {
            return Err(invalid(format!("invalid character '{bad}'")));
        }

        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for PlatformId {
    type Error = InvalidPlatformId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Delegate to the &str implementation for validation.
        let _ = Self::try_from(value.as_str())?;
        Ok(Self(value))
    }
}

impl AsRef<str> for PlatformId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
