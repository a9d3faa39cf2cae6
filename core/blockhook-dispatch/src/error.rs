//! Error types for hook dispatch and validation.

use blockhook_model::HookStage;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// A value failed validation. Names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for '{shape}.{field}' at {path}: {message}")]
pub struct ValidationError {
    pub shape: String,
    pub field: String,
    /// JSON pointer from the document root.
    pub path: String,
    pub message: String,
}

/// A hook raised an error or rejected a value outside `beforeValidate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} hook on '{shape}.{field}' at {path} failed: {reason}")]
pub struct HookExecutionError {
    pub stage: HookStage,
    pub shape: String,
    pub field: String,
    pub path: String,
    pub reason: String,
}

/// Errors that stop a dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Hook(#[from] HookExecutionError),

    /// A nested instance names a block that is not registered.
    #[error("unknown block type '{block_type}' at {path}")]
    UnknownBlock { block_type: String, path: String },

    /// A nested instance names a registered block the field does not allow.
    #[error("block type '{block_type}' is not allowed in field '{field}' at {path}")]
    BlockNotAllowed {
        block_type: String,
        field: String,
        path: String,
    },

    /// A rich-text block node without an object under `fields`, or a
    /// non-object entry in a blocks array.
    #[error("block instance in field '{field}' at {path} is missing or not an object")]
    MalformedBlock { field: String, path: String },

    /// A nested instance has no `blockType` key.
    #[error("block instance at {path} has no blockType")]
    MissingBlockType { path: String },

    /// A shape instance is not a JSON object.
    #[error("instance of '{shape}' at {path} is not an object")]
    NotAnObject { shape: String, path: String },

    /// Nested content goes deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels at {path}")]
    DepthExceeded { max_depth: usize, path: String },
}

impl DispatchError {
    /// The stage a hook failure happened in, if this is a hook failure.
    pub fn stage(&self) -> Option<HookStage> {
        match self {
            DispatchError::Hook(e) => Some(e.stage),
            _ => None,
        }
    }
}

/// Errors loading a dispatch config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
