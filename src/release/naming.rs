//! Asset naming grammar for provider release archives.
//!
//! A recognised asset is named
//! `terraform-provider-<name>_v<major.minor.patch>_<os>_<arch>.tar.gz`.
//! The grammar lives here as an explicit validator so the convention is
//! auditable and testable in isolation; callers receive a structured
//! match or nothing.

use super::platform::PlatformId;
use semver::Version;

/// The fixed prefix of every recognised asset name.
const ASSET_PREFIX: &str = "terraform-provider-";

/// The fixed extension of every recognised asset name.
const ASSET_EXTENSION: &str = ".tar.gz";

/// A structured match of a recognised asset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
    version: Version,
    platform: PlatformId,
}

impl AssetName {
    /// Return the version embedded in the asset name.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Return the platform identifier embedded in the asset name.
    #[must_use]
    pub fn platform(&self) -> &PlatformId {
        &self.platform
    }

    /// Consume the match and return its platform identifier.
    #[must_use]
    pub fn into_platform(self) -> PlatformId {
        self.platform
    }
}

/// Match an asset name against the provider archive naming grammar.
///
/// Returns `None` for any name outside the grammar; no partial matches.
///
/// # Examples
///
/// ```
/// use provider_shim_gen::release::naming::match_provider_asset;
///
/// let matched = match_provider_asset("terraform-provider-linuxbox_v0.0.13_darwin_amd64.tar.gz")
///     .expect("name follows the grammar");
/// assert_eq!(matched.platform().as_str(), "darwin_amd64");
///
/// assert!(match_provider_asset("terraform-provider-linuxbox_v0.0.13_checksums.txt").is_none());
/// ```
#[must_use]
pub fn match_provider_asset(name: &str) -> Option<AssetName> {
    let stem = name.strip_suffix(ASSET_EXTENSION)?;
    let rest = stem.strip_prefix(ASSET_PREFIX)?;

    let mut segments = rest.split('_');
    let provider = segments.next()?;
    let version = segments.next()?;
    let os = segments.next()?;
    let arch = segments.next()?;
    if provider.is_empty() || segments.next().is_some() {
        return None;
    }

    let version = parse_plain_version(version)?;
    let platform = PlatformId::try_from(format!("{os}_{arch}")).ok()?;

    Some(AssetName { version, platform })
}

/// Parse the `v<major.minor.patch>` segment; the grammar admits plain
/// release versions only, no prerelease or build metadata.
fn parse_plain_version(segment: &str) -> Option<Version> {
    let bare = segment.strip_prefix('v')?;
    let version = Version::parse(bare).ok()?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return None;
    }
    Some(version)
}

/// Build the binary name a release archive is expected to contain for a
/// plugin at a version; the shim file itself carries the same name.
#[must_use]
pub fn binary_name(plugin_name: &str, version: &Version) -> String {
    format!("{ASSET_PREFIX}{plugin_name}_v{version}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn matches_well_formed_asset_name() {
        let matched = match_provider_asset("terraform-provider-linuxbox_v0.0.13_darwin_amd64.tar.gz")
            .expect("name follows the grammar");
        assert_eq!(matched.version(), &Version::new(0, 0, 13));
        assert_eq!(matched.platform().as_str(), "darwin_amd64");
    }

    #[rstest]
    #[case::wrong_extension("terraform-provider-foo_v1.2.0_linux_amd64.zip")]
    #[case::missing_prefix("provider-foo_v1.2.0_linux_amd64.tar.gz")]
    #[case::missing_version_prefix("terraform-provider-foo_1.2.0_linux_amd64.tar.gz")]
    #[case::partial_version("terraform-provider-foo_v1.2_linux_amd64.tar.gz")]
    #[case::prerelease_version("terraform-provider-foo_v1.2.0-rc1_linux_amd64.tar.gz")]
    #[case::missing_arch("terraform-provider-foo_v1.2.0_linux.tar.gz")]
    #[case::extra_segment("terraform-provider-foo_v1.2.0_linux_amd64_extra.tar.gz")]
    #[case::empty_provider("terraform-provider-_v1.2.0_linux_amd64.tar.gz")]
    #[case::checksums_file("terraform-provider-foo_v1.2.0_SHA256SUMS")]
    fn rejects_names_outside_the_grammar(#[case] name: &str) {
        assert!(
            match_provider_asset(name).is_none(),
            "expected no match for {name}"
        );
    }

    #[test]
    fn windows_assets_still_match_the_grammar() {
        // Exclusion of Windows platforms is resolution policy, not a
        // property of the grammar.
        let matched = match_provider_asset("terraform-provider-foo_v1.2.0_windows_amd64.tar.gz")
            .expect("grammar matches");
        assert!(matched.platform().is_windows());
    }

    #[test]
    fn into_platform_returns_the_matched_platform() {
        let matched = match_provider_asset("terraform-provider-foo_v1.2.0_linux_arm64.tar.gz")
            .expect("grammar matches");
        assert_eq!(matched.into_platform().as_str(), "linux_arm64");
    }

    #[test]
    fn binary_name_joins_plugin_and_version() {
        let name = binary_name("linuxbox", &Version::new(0, 0, 13));
        assert_eq!(name, "terraform-provider-linuxbox_v0.0.13");
    }
}
