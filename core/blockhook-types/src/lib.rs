//! Identifier and timestamp types for blockhook.
//!
//! This crate defines the small, schema-agnostic value types shared by every
//! other crate in the workspace:
//! - Document identifiers (UUID v7)
//! - Millisecond timestamps used for `created_at` / `modified_at`
//!
//! Field, shape and hook definitions live in `blockhook-model`.

mod ids;
mod timestamp;

pub use ids::DocumentId;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
