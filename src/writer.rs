//! Shim persistence across plugin directory layout conventions.
//!
//! Every shim is written twice, to the two layouts consuming tools
//! discover plugins under: the flat legacy layout and the namespaced
//! registry layout. Directories are created with owner-only permissions
//! and the written file is owner-executable. Writes overwrite
//! unconditionally, so re-running the generator is idempotent.

use crate::release::platform::PlatformId;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// Root directory name for plugin discovery under the base directory.
const PLUGIN_DIR: &str = "plugins";

/// Registry host used by the namespaced discovery layout.
const REGISTRY_HOST: &str = "registry.terraform.io";

/// Errors arising from shim persistence.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A target directory path already exists as a non-directory.
    #[error("{path} exists and is not a directory")]
    NotADirectory {
        /// The conflicting path.
        path: Utf8PathBuf,
    },

    /// An I/O operation on a target path failed.
    #[error("while writing {path}: {source}")]
    Io {
        /// The path being created or written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// The naming inputs from which one platform's shim paths are derived.
#[derive(Debug)]
pub struct ShimLayout<'a> {
    /// Base output directory.
    pub base_dir: &'a Utf8Path,
    /// Publisher namespace of the registry layout (the repository owner).
    pub publisher: &'a str,
    /// Plugin name.
    pub plugin_name: &'a str,
    /// Release version string.
    pub version: &'a str,
    /// Target platform.
    pub platform: &'a PlatformId,
    /// Shim file name (the provider binary name).
    pub binary_name: &'a str,
}

impl ShimLayout<'_> {
    /// Return the paths the shim must exist at, one per layout
    /// convention.
    #[must_use]
    pub fn target_paths(&self) -> Vec<Utf8PathBuf> {
        let plugins = self.base_dir.join(PLUGIN_DIR);
        vec![
            plugins.join(self.platform.as_str()).join(self.binary_name),
            plugins
                .join(REGISTRY_HOST)
                .join(self.publisher)
                .join(self.plugin_name)
                .join(self.version)
                .join(self.platform.as_str())
                .join(self.binary_name),
        ]
    }
}

/// Write the rendered script at every layout path.
///
/// Returns the written paths. The first failure aborts the remaining
/// writes; paths already written stay on disk.
///
/// # Errors
///
/// Returns [`PersistError::NotADirectory`] when a target directory
/// exists as something else, and [`PersistError::Io`] on any filesystem
/// failure.
pub fn persist_shim(layout: &ShimLayout<'_>, script: &str) -> Result<Vec<Utf8PathBuf>, PersistError> {
    let targets = layout.target_paths();
    for path in &targets {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        write_executable(path, script)?;
        log::debug!("wrote shim {path}");
    }
    Ok(targets)
}

/// Ensure `path` exists as a directory, creating missing ancestors with
/// owner-only permissions.
fn ensure_dir(path: &Utf8Path) -> Result<(), PersistError> {
    match std::fs::metadata(path.as_std_path()) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory {
            path: path.to_owned(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => create_dir_all_owner_only(path),
        Err(source) => Err(PersistError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}

fn create_dir_all_owner_only(path: &Utf8Path) -> Result<(), PersistError> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path.as_std_path()).map_err(|source| PersistError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Write `content` at `path`, replacing any previous file, and mark it
/// executable for the owner.
fn write_executable(path: &Utf8Path, content: &str) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_owned(),
        source,
    };

    std::fs::write(path.as_std_path(), content).map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path.as_std_path())
            .map_err(io_err)?
            .permissions();
        perms.set_mode(0o700);
        std::fs::set_permissions(path.as_std_path(), perms).map_err(io_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_path_buf()).expect("UTF-8 path");
        (temp, path)
    }

    fn sample_layout<'a>(base: &'a Utf8Path, platform: &'a PlatformId) -> ShimLayout<'a> {
        ShimLayout {
            base_dir: base,
            publisher: "acme",
            plugin_name: "foo",
            version: "1.2.0",
            platform,
            binary_name: "terraform-provider-foo_v1.2.0",
        }
    }

    #[test]
    fn target_paths_cover_both_layout_conventions() {
        let platform = PlatformId::try_from("linux_amd64").expect("valid platform");
        let base = Utf8PathBuf::from("terraform.d");
        let layout = sample_layout(&base, &platform);

        let paths = layout.target_paths();

        assert_eq!(
            paths,
            vec![
                Utf8PathBuf::from("terraform.d/plugins/linux_amd64/terraform-provider-foo_v1.2.0"),
                Utf8PathBuf::from(concat!(
                    "terraform.d/plugins/registry.terraform.io/acme/foo/1.2.0/",
                    "linux_amd64/terraform-provider-foo_v1.2.0"
                )),
            ]
        );
    }

    #[test]
    fn persist_writes_identical_content_at_every_path() {
        let (_temp, base) = base_dir();
        let platform = PlatformId::try_from("linux_amd64").expect("valid platform");
        let layout = sample_layout(&base, &platform);

        let written = persist_shim(&layout, "#!/usr/bin/env bash\n").expect("persist succeeds");

        assert_eq!(written.len(), 2);
        for path in &written {
            let content = std::fs::read_to_string(path.as_std_path()).expect("file readable");
            assert_eq!(content, "#!/usr/bin/env bash\n");
        }
    }

    #[test]
    fn persist_overwrites_previous_content() {
        let (_temp, base) = base_dir();
        let platform = PlatformId::try_from("linux_amd64").expect("valid platform");
        let layout = sample_layout(&base, &platform);

        persist_shim(&layout, "first version").expect("first persist succeeds");
        let written = persist_shim(&layout, "second version").expect("second persist succeeds");

        for path in &written {
            let content = std::fs::read_to_string(path.as_std_path()).expect("file readable");
            assert_eq!(content, "second version", "stale content at {path}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn persist_marks_the_shim_owner_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, base) = base_dir();
        let platform = PlatformId::try_from("darwin_arm64").expect("valid platform");
        let layout = sample_layout(&base, &platform);

        let written = persist_shim(&layout, "#!/usr/bin/env bash\n").expect("persist succeeds");

        for path in &written {
            let mode = std::fs::metadata(path.as_std_path())
                .expect("metadata readable")
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o700, "unexpected mode on {path}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn created_directories_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, base) = base_dir();
        let platform = PlatformId::try_from("linux_amd64").expect("valid platform");
        let layout = sample_layout(&base, &platform);

        persist_shim(&layout, "content").expect("persist succeeds");

        let plugin_dir = base.join("plugins").join("linux_amd64");
        let mode = std::fs::metadata(plugin_dir.as_std_path())
            .expect("metadata readable")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn persist_fails_when_a_target_directory_is_a_file() {
        let (_temp, base) = base_dir();
        let platform = PlatformId::try_from("linux_amd64").expect("valid platform");
        let layout = sample_layout(&base, &platform);

        let plugins = base.join("plugins");
        std::fs::create_dir_all(plugins.as_std_path()).expect("create plugins dir");
        std::fs::write(plugins.join("linux_amd64").as_std_path(), b"occupied")
            .expect("occupy the platform dir path");

        let result = persist_shim(&layout, "content");

        assert!(matches!(result, Err(PersistError::NotADirectory { .. })));
    }
}
