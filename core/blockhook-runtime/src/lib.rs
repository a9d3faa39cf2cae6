//! Document lifecycle API for blockhook.
//!
//! [`ContentRuntime`] exposes `create`, `read`, `update` and `duplicate` over a
//! [`DocumentStore`], running the field hook dispatcher at each lifecycle
//! stage:
//!
//! | operation | stages |
//! |---|---|
//! | create | beforeValidate, beforeChange, (persist), afterChange |
//! | read | afterRead |
//! | update | beforeValidate, beforeChange, (persist), afterChange |
//! | duplicate | beforeDuplicate, then the create sequence under a new identity |
//!
//! Writes are atomic per operation: hooks run on a working copy, and a failing
//! afterChange hook rolls the store back.

mod error;
mod runtime;
mod store;

pub use error::{RuntimeError, RuntimeResult, StorageError, StorageResult};
pub use runtime::{ContentRuntime, LifecycleOutcome};
pub use store::{DocumentStore, MemoryStore};
