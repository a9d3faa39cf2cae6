//! Error types for schema construction and registration.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building or registering shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Shape slug is empty.
    #[error("shape slug cannot be empty")]
    EmptySlug,

    /// Field name is empty.
    #[error("shape '{shape}' has a field with an empty name")]
    EmptyFieldName { shape: String },

    /// Two fields in one shape share a name.
    #[error("shape '{shape}' declares field '{field}' more than once")]
    DuplicateField { shape: String, field: String },

    /// A shape with this slug is already registered.
    #[error("shape '{0}' is already registered")]
    DuplicateShape(String),

    /// The shape kind does not match the registration call.
    #[error("shape '{slug}' is a {actual} shape, expected {expected}")]
    WrongKind {
        slug: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A rich-text or blocks field references a block that is not registered.
    #[error("field '{shape}.{field}' references unknown block '{block}'")]
    UnknownBlock {
        shape: String,
        field: String,
        block: String,
    },

    /// A relationship field has no target collection.
    #[error("relationship field '{shape}.{field}' has no relation target")]
    MissingRelationTarget { shape: String, field: String },
}
