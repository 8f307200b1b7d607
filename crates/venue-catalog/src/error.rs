//! Error types for the venue-catalog crate.
//!
//! Catalog documents are validated when parsed so that a malformed bundle is
//! reported with enough context to find the offending record.

use thiserror::Error;

/// Errors raised while parsing or validating a venue catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog JSON is malformed or missing required fields.
    #[error("invalid catalog JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalog document version is not supported.
    #[error("unsupported catalog version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Supported version number.
        expected: u32,
        /// Version found in the document.
        actual: u32,
    },

    /// The catalog contains no venues.
    #[error("catalog contains no venues")]
    EmptyCatalog,

    /// A venue has a blank name.
    #[error("venue at index {index} has a blank name")]
    BlankName {
        /// Index of the venue in the document.
        index: usize,
    },

    /// Two venues derive the same identifier.
    #[error("duplicate venue identifier '{id}' at index {index}")]
    DuplicateId {
        /// The colliding identifier.
        id: String,
        /// Index of the second venue carrying it.
        index: usize,
    },

    /// A bundled document declares a different mode than requested.
    #[error("catalog declares mode '{actual}' but '{expected}' was requested")]
    ModeMismatch {
        /// Mode that was requested.
        expected: String,
        /// Mode declared by the document.
        actual: String,
    },
}
