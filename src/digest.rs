//! Content digest computation for archived release binaries.
//!
//! The digest is git's blob object hash: `SHA1("blob " + length + NUL +
//! content)`, the value `git hash-object` prints, so an operator can
//! verify a cached binary by hand without this tool. The archive is
//! consumed as a stream: gzip decompression feeds sequential tar
//! iteration, the target entry is hashed as it is read, and the rest of
//! the stream is abandoned.

use crate::http::{USER_AGENT, http_agent};
use sha1::{Digest, Sha1};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Byte length of a blob digest.
const DIGEST_LEN: usize = 20;

/// A 20-byte content digest in git's blob construction.
///
/// `Display` renders lowercase hex, the form embedded into shims and
/// printed by `git hash-object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobDigest([u8; DIGEST_LEN]);

impl BlobDigest {
    /// Return the raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Return the digest as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_LEN]> for BlobDigest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for BlobDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Errors arising from archive digest computation.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// The archive fetch failed.
    #[error("download failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// Decompression or tar iteration failed mid-stream.
    #[error("while reading archive {url}: {source}")]
    Archive {
        /// The URL whose stream failed.
        url: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The archive ended without the expected entry.
    #[error("file {entry} not found in {url}")]
    EntryNotFound {
        /// The entry name that was searched for.
        entry: String,
        /// The archive URL.
        url: String,
    },
}

/// Trait for computing the blob digest of one named archive entry,
/// enabling test mocking.
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveDigester {
    /// Compute the blob digest of `entry_name` inside the archive at
    /// `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`DigestError`] when the fetch or the stream fails, or
    /// when the entry is absent.
    fn digest(&self, url: &str, entry_name: &str) -> Result<BlobDigest, DigestError>;
}

/// Streaming digester over an HTTP fetch of a gzip-compressed tar
/// archive.
pub struct HttpArchiveDigester;

impl ArchiveDigester for HttpArchiveDigester {
    fn digest(&self, url: &str, entry_name: &str) -> Result<BlobDigest, DigestError> {
        let response = http_agent()
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| DigestError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;

        match digest_entry(response.into_body().as_reader(), entry_name) {
            Ok(Some(digest)) => Ok(digest),
            Ok(None) => Err(DigestError::EntryNotFound {
                entry: entry_name.to_owned(),
                url: url.to_owned(),
            }),
            Err(source) => Err(DigestError::Archive {
                url: url.to_owned(),
                source,
            }),
        }
    }
}

/// Walk a gzip-compressed tar stream and compute the blob digest of the
/// entry named `entry_name`.
///
/// Returns `Ok(None)` when the archive ends without a matching entry.
/// The match is found by exact name comparison; on a hit the digest is
/// computed over that entry alone and the remainder of the stream is not
/// consumed. Non-matching entries are drained by the sequential tar
/// iterator; the underlying transport cannot skip.
///
/// # Errors
///
/// Propagates any I/O error from the transport, the gzip decoder, or the
/// tar reader.
pub fn digest_entry<R: Read>(
    archive: R,
    entry_name: &str,
) -> std::io::Result<Option<BlobDigest>> {
    let decoder = flate2::read::GzDecoder::new(archive);
    let mut tar = tar::Archive::new(decoder);

    for entry in tar.entries()? {
        let mut entry = entry?;
        if entry.path()?.as_ref() != Path::new(entry_name) {
            continue;
        }

        let mut hasher = Sha1::new();
        hasher.update(format!("blob {}", entry.size()).as_bytes());
        hasher.update([0u8]);

        let mut buffer = [0u8; 8192];
        loop {
            let bytes_read = entry.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        let digest: [u8; DIGEST_LEN] = hasher.finalize().into();
        return Ok(Some(BlobDigest::from(digest)));
    }

    Ok(None)
}
