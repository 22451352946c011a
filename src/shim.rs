//! Bootstrap shim script rendering.
//!
//! The rendered script stands in for the provider binary. At its own
//! execution time it keeps a cache under the XDG cache root, verifies the
//! cached binary against the embedded digest with `git hash-object`
//! (independently reproducing the blob construction), replaces a stale or
//! corrupted binary, and refuses to execute anything that still fails
//! verification. Template fields are embedded verbatim, so plugin names
//! and versions must stay free of shell metacharacters.

use crate::digest::BlobDigest;

/// The substitution fields of the bootstrap script.
#[derive(Debug, Clone)]
pub struct ShimInputs<'a> {
    /// Download locator of the platform's release archive.
    pub download_url: &'a str,
    /// Plugin name, used to namespace the cache directory.
    pub plugin_name: &'a str,
    /// Release version string.
    pub version: &'a str,
    /// Name of the binary inside the archive, and of the cached file.
    pub binary_name: &'a str,
    /// Expected blob digest of the binary.
    pub digest: &'a BlobDigest,
}

/// Render the bootstrap script for one platform's binary.
///
/// Pure and deterministic: identical inputs yield byte-identical text.
/// The template is a compile-time-checked literal, so there is no
/// runtime failure path.
#[must_use]
pub fn render_shim(inputs: &ShimInputs<'_>) -> String {
    format!(
        r#"#!/usr/bin/env bash
set -euo pipefail

plugin_url="{download_url}"
plugin_unpack_dir="${{XDG_CACHE_HOME:-$HOME/.cache}}/terraform-providers/{plugin_name}_v{version}"
plugin_binary_name="{binary_name}"
plugin_binary_path="${{plugin_unpack_dir}}/${{plugin_binary_name}}"
plugin_binary_sha1="{digest}"

if [[ ! -d "${{plugin_unpack_dir}}" ]]; then
    mkdir -p "${{plugin_unpack_dir}}"
fi

if [[ -f "${{plugin_binary_path}}" ]]; then
    current_sha=$(git hash-object "${{plugin_binary_path}}")
    if [[ "${{current_sha}}" != "${{plugin_binary_sha1}}" ]]; then
        rm "${{plugin_binary_path}}"
    fi
fi

if [[ ! -f "${{plugin_binary_path}}" ]]; then
    curl -fsSL "${{plugin_url}}" | tar -xz -C "${{plugin_unpack_dir}}"
    chmod 755 "${{plugin_binary_path}}"
fi

current_sha=$(git hash-object "${{plugin_binary_path}}")
if [[ "${{current_sha}}" != "${{plugin_binary_sha1}}" ]]; then
    echo "plugin binary sha does not match: ${{current_sha}} != ${{plugin_binary_sha1}}" >&2
    exit 1
fi

exec "${{plugin_binary_path}}" "$@"
"#,
        download_url = inputs.download_url,
        plugin_name = inputs.plugin_name,
        version = inputs.version,
        binary_name = inputs.binary_name,
        digest = inputs.digest,
    )
}
