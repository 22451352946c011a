//! Provider shim generator library.
//!
//! This crate resolves the latest release of a Terraform provider
//! repository matching a version constraint, verifies each platform's
//! archived binary by recomputing its git blob digest from the archive
//! stream, and writes an executable bootstrap shim per platform. It is
//! used by the `provider-shim-gen` CLI binary and can be consumed
//! programmatically for testing or custom generation workflows.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`constraint`] - Version constraint parsing and tag interpretation
//! - [`digest`] - Streaming blob digest computation
//! - [`error`] - Semantic error types for the pipeline
//! - [`output`] - Progress output formatting
//! - [`pipeline`] - Per-platform digest, render, and persist orchestration
//! - [`release`] - Release listing, naming grammar, and resolution
//! - [`repo`] - Repository identifier validation
//! - [`shim`] - Bootstrap script rendering
//! - [`writer`] - Shim persistence across layout conventions

pub mod cli;
pub mod constraint;
pub mod digest;
pub mod error;
mod http;
pub mod output;
pub mod pipeline;
pub mod release;
pub mod repo;
pub mod shim;
pub mod writer;
