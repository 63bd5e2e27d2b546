//! Errors surfaced by the library operations.

use thiserror::Error;

use crate::store::StoreError;

/// Errors returned by [`crate::Library`] operations
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A write was attempted without a resolvable owner
    #[error("Not authenticated")]
    Unauthenticated,

    /// The record does not exist or belongs to another account
    ///
    /// Both cases produce the same error on purpose.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A strict reorder was given ids that are not exactly the group's members
    #[error("{kind} sequence does not match the current group members")]
    SequenceMismatch { kind: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LibraryError {
    /// Build a `NotFound` error for a record kind and id
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Check whether this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for library operations
pub type Result<T, E = LibraryError> = std::result::Result<T, E>;
