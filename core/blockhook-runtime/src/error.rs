//! Error types for the lifecycle API.

use blockhook_dispatch::{DispatchError, HookExecutionError, ValidationError};
use blockhook_types::DocumentId;
use thiserror::Error;

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by a [`crate::DocumentStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A document with this identity already exists.
    #[error("document already exists: {collection}/{id}")]
    Conflict { collection: String, id: DocumentId },

    /// The document to replace does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: DocumentId },

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for lifecycle operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors returned by [`crate::ContentRuntime`].
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: DocumentId },

    #[error("invalid document data: {0}")]
    InvalidData(String),

    /// Hook dispatch or validation failed. Nothing was persisted.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// A duplicate was assigned the identity of its source.
    #[error("duplicate of {0} reused the source identity")]
    DuplicateIdentity(DocumentId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RuntimeError {
    /// The validation failure, if this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            RuntimeError::Dispatch(DispatchError::Validation(e)) => Some(e),
            _ => None,
        }
    }

    /// The hook execution failure, if this error is one.
    pub fn as_hook_error(&self) -> Option<&HookExecutionError> {
        match self {
            RuntimeError::Dispatch(DispatchError::Hook(e)) => Some(e),
            _ => None,
        }
    }
}
