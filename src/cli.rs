//! CLI argument definitions for the shim generator.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and
//! focused on orchestration.

use camino::Utf8PathBuf;
use clap::Parser;

/// Generate bootstrap shims for a Terraform provider's release binaries.
#[derive(Parser, Debug, Clone)]
#[command(name = "provider-shim-gen")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate bootstrap shims for a Terraform provider's release binaries.\n\n",
    "The highest release of the given repository matching the version ",
    "constraint is resolved, the git blob digest of each platform's archived ",
    "binary is computed from the archive stream, and an executable shell shim ",
    "embedding that digest is written per platform. When the consuming tool ",
    "invokes a shim, the shim downloads the real binary into the XDG cache, ",
    "verifies it with git hash-object, replaces it if stale, and executes it.\n\n",
    "The repository name must start with terraform-provider-; the remainder ",
    "is the plugin name.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Generate shims for the latest release:\n",
    "    $ provider-shim-gen numtide/terraform-provider-linuxbox\n\n",
    "  Stay on the 0.0.x series:\n",
    "    $ provider-shim-gen -c '~0.0' numtide/terraform-provider-linuxbox\n\n",
    "  Write into a custom directory:\n",
    "    $ provider-shim-gen -d /tmp/terraform.d numtide/terraform-provider-linuxbox",
))]
pub struct Cli {
    /// Provider repository, as owner/name.
    #[arg(value_name = "OWNER/REPO")]
    pub repository: String,

    /// Semantic version constraint; the highest matching release is used.
    #[arg(short, long, value_name = "CONSTRAINT", default_value = "*")]
    pub constraint: String,

    /// Output base directory receiving the plugin layouts.
    #[arg(short = 'd', long = "dir", value_name = "DIR", default_value = "terraform.d")]
    pub base_dir: Utf8PathBuf,

    /// Suppress progress output (errors still shown).
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Cli {
    /// Creates a `Cli` instance with an empty repository and the default
    /// flags, useful for testing or programmatic construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use provider_shim_gen::cli::Cli;
    ///
    /// let cli = Cli::default();
    /// assert_eq!(cli.constraint, "*");
    /// assert!(!cli.quiet);
    /// ```
    fn default() -> Self {
        Self {
            repository: String::new(),
            constraint: "*".to_owned(),
            base_dir: Utf8PathBuf::from("terraform.d"),
            quiet: false,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
