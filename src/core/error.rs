//! Defines [`CollectionError`], the error type for contract violations.
//!
//! Every variant is a deterministic programmer error: the same inputs always
//! fail the same way and nothing is retried. Lookups that may legitimately
//! miss report absence through `Option` or `bool` instead.

use thiserror::Error;

/// Errors returned by the fallible collection operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Indexed read outside `0..len` on an [`EquatableArray`](crate::EquatableArray).
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A required-unique insert found the key already present.
    ///
    /// The map the operation was called on is left unchanged.
    #[error("an entry with the same key already exists")]
    DuplicateKey,
}

pub type Result<T> = std::result::Result<T, CollectionError>;
