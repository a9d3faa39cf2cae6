//! Content model for blockhook.
//!
//! Defines the declarative types the dispatcher and runtime are driven by:
//! - [`FieldDefinition`] / [`FieldType`]: one named, typed attribute and its hooks
//! - [`Shape`]: an ordered field list, either a collection or an embeddable block
//! - [`SchemaRegistry`]: the registered collections and blocks, keyed by slug
//! - [`HookStage`] / [`Operation`]: lifecycle points and the order they run in
//! - [`FieldHook`]: the `(value, context) -> value` callback trait
//! - [`Document`]: a stored record (id, collection, JSON payload, timestamps)
//!
//! Shapes are immutable once registered; the registry is shared behind an `Arc`.

mod document;
mod error;
mod field;
mod hook;
mod registry;
mod shape;
mod stage;

pub use document::Document;
pub use error::{ModelError, ModelResult};
pub use field::{FieldDefinition, FieldType};
pub use hook::{FieldHook, HookContext, HookError, HookMap};
pub use registry::SchemaRegistry;
pub use shape::{Shape, ShapeKind};
pub use stage::{HookStage, Operation};

/// Key naming the block shape of a nested instance.
pub const BLOCK_TYPE_KEY: &str = "blockType";
