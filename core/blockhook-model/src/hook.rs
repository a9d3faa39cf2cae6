//! Field hook callbacks and the context they receive.

use crate::{HookStage, Operation};
use blockhook_types::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// What a hook knows about the invocation it is part of.
///
/// The stage travels here rather than in per-stage hook slots, so a single
/// hook implementation can serve every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookContext {
    pub operation: Operation,
    pub stage: HookStage,
    /// Slug of the shape that declares the field.
    pub shape: String,
    pub field: String,
    /// JSON pointer from the document root to the field value.
    pub path: String,
    /// Absent while creating, before an identity is allocated.
    pub document_id: Option<DocumentId>,
    /// 0 for collection fields, 1 for fields of a block embedded in them, and so on.
    pub depth: usize,
}

/// Error returned by a hook.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// The hook refuses the value. Always stops the operation.
    #[error("rejected: {reason}")]
    Rejected { reason: String },

    /// The hook itself failed. Handling depends on the dispatcher's failure mode.
    #[error("failed: {reason}")]
    Failed { reason: String },
}

impl HookError {
    pub fn reject(reason: impl Into<String>) -> Self {
        HookError::Rejected {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        HookError::Failed {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            HookError::Rejected { reason } | HookError::Failed { reason } => reason,
        }
    }
}

/// A field-level lifecycle callback: `(value, context) -> value`.
///
/// Implemented for any `Fn(Value, &HookContext) -> Result<Value, HookError>`
/// closure, so most hooks are registered inline.
pub trait FieldHook: Send + Sync {
    fn call(&self, value: Value, ctx: &HookContext) -> Result<Value, HookError>;
}

impl<F> FieldHook for F
where
    F: Fn(Value, &HookContext) -> Result<Value, HookError> + Send + Sync,
{
    fn call(&self, value: Value, ctx: &HookContext) -> Result<Value, HookError> {
        self(value, ctx)
    }
}

/// Hooks of one field, keyed by stage. Hooks of a stage run in registration order.
#[derive(Clone, Default)]
pub struct HookMap {
    stages: BTreeMap<HookStage, Vec<Arc<dyn FieldHook>>>,
}

impl HookMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: HookStage, hook: Arc<dyn FieldHook>) {
        self.stages.entry(stage).or_default().push(hook);
    }

    /// Hooks registered for `stage`, possibly empty.
    pub fn for_stage(&self, stage: HookStage) -> &[Arc<dyn FieldHook>] {
        self.stages.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, stage: HookStage) -> bool {
        !self.for_stage(stage).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.values().all(Vec::is_empty)
    }

    /// Stages with at least one hook.
    pub fn stages(&self) -> impl Iterator<Item = HookStage> + '_ {
        self.stages
            .iter()
            .filter(|(_, hooks)| !hooks.is_empty())
            .map(|(stage, _)| *stage)
    }
}

impl fmt::Debug for HookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.stages.iter().map(|(stage, hooks)| (stage.as_str(), hooks.len())))
            .finish()
    }
}
