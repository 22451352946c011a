//! Error types for the shim generation pipeline.
//!
//! This module defines the semantic failure classes a run can end with.
//! Caller-input mistakes (constraint expression, repository identifier)
//! get their own variants; component failures are wrapped with a short
//! context prefix so the terminal message reads as a chain.

use crate::digest::DigestError;
use crate::release::listing::ListError;
use crate::writer::PersistError;
use thiserror::Error;

/// Errors that can terminate a shim generation run.
#[derive(Debug, Error)]
pub enum ShimError {
    /// The version constraint expression could not be parsed.
    #[error("invalid version constraint \"{expression}\": {reason}")]
    InvalidConstraint {
        /// The expression as supplied by the caller.
        expression: String,
        /// Description of the parse failure.
        reason: String,
    },

    /// The repository identifier is malformed.
    #[error("invalid repository \"{value}\": {reason}")]
    InvalidRepository {
        /// The identifier as supplied by the caller.
        value: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// No release satisfies the constraint and the asset naming convention.
    #[error(
        "could not find a release matching {constraint} with provider archive assets"
    )]
    NoMatchingRelease {
        /// The constraint expression that was applied.
        constraint: String,
    },

    /// Listing releases from the remote source failed.
    #[error("while listing releases: {0}")]
    Listing(#[from] ListError),

    /// Computing the digest of an archived binary failed.
    #[error("while verifying a provider archive: {0}")]
    Digest(#[from] DigestError),

    /// Writing a shim to disk failed.
    #[error("while writing shims: {0}")]
    Persist(#[from] PersistError),
}

/// Result type alias using [`ShimError`].
pub type Result<T> = std::result::Result<T, ShimError>;
