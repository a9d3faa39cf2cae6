//! Per-operation record of hook invocations.

use blockhook_model::{HookStage, Operation};
use blockhook_types::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a single hook call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Ok,
    Rejected { reason: String },
    Failed { reason: String },
}

impl InvocationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, InvocationOutcome::Ok)
    }
}

/// One hook call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub operation: Operation,
    pub stage: HookStage,
    pub shape: String,
    pub field: String,
    pub path: String,
    pub depth: usize,
    /// Position of the hook among the field's hooks for this stage.
    pub hook_index: usize,
    pub input: Value,
    /// Absent when the hook did not return a value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    pub outcome: InvocationOutcome,
}

/// Ordered list of hook invocations made during one operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallLog {
    records: Vec<InvocationRecord>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: InvocationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[InvocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Invocations of the hooks on `shape.field` during `stage`.
    pub fn calls<'a>(
        &'a self,
        stage: HookStage,
        shape: &'a str,
        field: &'a str,
    ) -> impl Iterator<Item = &'a InvocationRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.stage == stage && r.shape == shape && r.field == field)
    }

    /// Number of invocations of the hooks on `shape.field` during `stage`.
    pub fn count(&self, stage: HookStage, shape: &str, field: &str) -> usize {
        self.calls(stage, shape, field).count()
    }

    /// Whether any hook on `shape.field` ran during `stage`.
    pub fn fired(&self, stage: HookStage, shape: &str, field: &str) -> bool {
        self.calls(stage, shape, field).next().is_some()
    }

    /// Invocations made during `stage`, in order.
    pub fn for_stage(&self, stage: HookStage) -> impl Iterator<Item = &InvocationRecord> {
        self.records.iter().filter(move |r| r.stage == stage)
    }

    /// Invocations that did not end with `Ok`.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationRecord> {
        self.records.iter().filter(|r| !r.outcome.is_ok())
    }
}

/// State carried through every stage of one document operation.
#[derive(Debug, Clone)]
pub struct OperationContext {
    operation: Operation,
    document_id: Option<DocumentId>,
    log: CallLog,
}

impl OperationContext {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            document_id: None,
            log: CallLog::new(),
        }
    }

    #[must_use]
    pub fn with_document(mut self, id: DocumentId) -> Self {
        self.document_id = Some(id);
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn document_id(&self) -> Option<DocumentId> {
        self.document_id
    }

    /// Sets the identity hooks see from the next stage on.
    pub fn set_document_id(&mut self, id: Option<DocumentId>) {
        self.document_id = id;
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    pub fn into_log(self) -> CallLog {
        self.log
    }

    pub(crate) fn record(&mut self, record: InvocationRecord) {
        self.log.push(record);
    }
}
