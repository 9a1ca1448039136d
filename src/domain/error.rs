//! Error types for the sift engine.
//!
//! This module defines the centralized error type [`SiftError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate.
//!
//! Only host programming mistakes surface as errors: an invalid page size, a
//! sort key that no sort option declares, duplicate sort keys, or a malformed
//! configuration file. Degenerate inputs (empty datasets, empty queries,
//! out-of-range pages, empty option lists) are never errors; they resolve to
//! empty results.

use thiserror::Error;

/// The main error type for sift operations.
///
/// # Examples
///
/// ```
/// use sift::domain::SiftError;
///
/// let err = SiftError::UnknownSortKey("salary".to_string());
/// assert_eq!(err.to_string(), "Unknown sort key: salary");
/// ```
#[derive(Debug, Error)]
pub enum SiftError {
    /// Configuration is invalid or missing.
    ///
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A page size of zero was configured.
    ///
    /// Pages must hold at least one item; a zero size would make the page
    /// count undefined.
    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),

    /// A sort request named a key that no sort option declares.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Two sort options were registered under the same key.
    #[error("Duplicate sort key: {0}")]
    DuplicateSortKey(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A TOML configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A JSON dataset could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
