//! Domain-specific error types for the materializer.
//!
//! Structured errors built with [`thiserror`]. Only two failures are fatal:
//! a missing canonical store root and an unrecognised profile selector.
//! Everything else — a single link that cannot be created, an unreadable
//! markdown file, a malformed pre-existing settings document — is logged as
//! a warning at the point of failure and the run continues; those paths
//! never surface a typed error past their component boundary.
//!
//! Command handlers at the CLI boundary convert these to [`anyhow::Error`]
//! via the standard `?` operator.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the materializer.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Canonical store error (missing root).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Profile selection error (unknown selector).
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Errors that arise from opening the canonical store.
///
/// Listing the store never fails (missing or unreadable directories yield
/// empty lists), so the only store error is a missing root.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The canonical store root directory does not exist.
    #[error("Canonical store not found: {}", .0.display())]
    RootMissing(PathBuf),
}

/// Errors that arise from resolving the profile selector.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The requested selector does not name a known profile.
    #[error("Invalid profile '{0}': must be one of claude, gemini, copilot, codex, opencode, all")]
    UnknownSelector(String),
}
