//! Error types for reqlens.
//!
//! The introspection surface itself (classification predicates, variable
//! lookup, header lookup, client IP resolution) never fails: absence and
//! parse failures degrade to `false`, `None`, or a fallback value. The
//! error type below only backs the strict parsing entry points
//! (`RequestKind::from_str`, `Source::from_str`) for callers that want a
//! hard failure instead of the soft-fail query API.

use thiserror::Error;

/// Result type alias for reqlens operations.
pub type Result<T> = std::result::Result<T, ReqLensError>;

/// Unified error type for reqlens operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReqLensError {
    /// A request kind name outside the closed classification vocabulary.
    #[error("Unknown request kind: {0}")]
    UnknownKind(String),

    /// A variable source name other than `get`, `post` or `request`.
    #[error("Unknown variable source: {0}")]
    UnknownSource(String),
}
