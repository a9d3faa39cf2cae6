//! The document lifecycle API.

use crate::{DocumentStore, MemoryStore, RuntimeError, RuntimeResult};
use blockhook_dispatch::{CallLog, DispatchConfig, DispatchResult, Dispatcher, OperationContext};
use blockhook_model::{Document, HookStage, Operation, SchemaRegistry, Shape};
use blockhook_types::{DocumentId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A document returned by a lifecycle operation together with the hook calls
/// the operation made.
///
/// For create, update and duplicate, `document` carries the values returned by
/// afterChange hooks; the stored copy holds the beforeChange values. For read,
/// it carries the afterRead values and nothing is written.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleOutcome {
    pub document: Document,
    pub log: CallLog,
}

/// Runs document operations through the field hook dispatcher and a store.
///
/// Every operation walks the stage list of its [`Operation`]: stages before
/// afterChange run on a working copy, the result is persisted, and the
/// remaining stages run on the persisted document.
pub struct ContentRuntime<S = MemoryStore> {
    dispatcher: Dispatcher,
    store: S,
    allocate_id: Arc<dyn Fn() -> DocumentId + Send + Sync>,
}

impl ContentRuntime<MemoryStore> {
    /// A runtime over a fresh in-memory store.
    pub fn in_memory(registry: Arc<SchemaRegistry>, config: DispatchConfig) -> Self {
        Self::new(Dispatcher::new(registry, config), MemoryStore::new())
    }
}

impl<S: DocumentStore> ContentRuntime<S> {
    pub fn new(dispatcher: Dispatcher, store: S) -> Self {
        Self {
            dispatcher,
            store,
            allocate_id: Arc::new(DocumentId::new),
        }
    }

    /// Replaces the identity source for new documents (UUID v7 by default).
    #[must_use]
    pub fn with_id_allocator<F>(mut self, allocate: F) -> Self
    where
        F: Fn() -> DocumentId + Send + Sync + 'static,
    {
        self.allocate_id = Arc::new(allocate);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a document: beforeValidate, validation, beforeChange, persist, afterChange.
    pub fn create(&self, collection: &str, data: Value) -> RuntimeResult<LifecycleOutcome> {
        let shape = self.shape(collection)?;
        let mut ctx = OperationContext::new(Operation::Create);
        let document = self.insert_new(&shape, data, None, &mut ctx)?;

        info!(
            collection,
            id = %document.id,
            hook_calls = ctx.log().len(),
            "Created document"
        );
        Ok(LifecycleOutcome {
            document,
            log: ctx.into_log(),
        })
    }

    /// Reads a document and runs afterRead. The stored copy is not modified.
    pub fn read(&self, collection: &str, id: DocumentId) -> RuntimeResult<LifecycleOutcome> {
        let shape = self.shape(collection)?;
        let mut document = self.load(collection, id)?;
        let mut ctx = OperationContext::new(Operation::Read).with_document(id);

        self.run_after_persist(&shape, &mut document.data, &mut ctx)?;

        debug!(collection, %id, hook_calls = ctx.log().len(), "Read document");
        Ok(LifecycleOutcome {
            document,
            log: ctx.into_log(),
        })
    }

    /// Updates a document.
    ///
    /// Top-level keys of `data` replace the stored values; keys absent from
    /// `data` keep their stored values. Hooks then run over the merged document.
    pub fn update(
        &self,
        collection: &str,
        id: DocumentId,
        data: Value,
    ) -> RuntimeResult<LifecycleOutcome> {
        let shape = self.shape(collection)?;
        let existing = self.load(collection, id)?;
        let incoming = into_object(data)?;
        let mut ctx = OperationContext::new(Operation::Update).with_document(id);

        let mut merged = existing.data.clone();
        match merged.as_object_mut() {
            Some(object) => object.extend(incoming),
            None => merged = Value::Object(incoming),
        }
        let working = self.run_before_persist(&shape, merged, &mut ctx)?;

        let mut updated = Document {
            data: working,
            modified_at: existing.modified_at.advance(),
            ..existing.clone()
        };
        self.store.replace(updated.clone())?;

        if let Err(e) = self.run_after_persist(&shape, &mut updated.data, &mut ctx) {
            warn!(collection, %id, "afterChange failed, restoring previous version: {}", e);
            self.store.replace(existing)?;
            return Err(e.into());
        }

        info!(collection, %id, hook_calls = ctx.log().len(), "Updated document");
        Ok(LifecycleOutcome {
            document: updated,
            log: ctx.into_log(),
        })
    }

    /// Duplicates a document: beforeDuplicate on a copy of the source, then the
    /// create sequence under a new identity.
    pub fn duplicate(&self, collection: &str, id: DocumentId) -> RuntimeResult<LifecycleOutcome> {
        let shape = self.shape(collection)?;
        let source = self.load(collection, id)?;
        let mut ctx = OperationContext::new(Operation::Duplicate).with_document(id);
        let document = self.insert_new(&shape, source.data, Some(id), &mut ctx)?;

        info!(
            collection,
            source = %id,
            id = %document.id,
            hook_calls = ctx.log().len(),
            "Duplicated document"
        );
        Ok(LifecycleOutcome {
            document,
            log: ctx.into_log(),
        })
    }

    fn shape(&self, collection: &str) -> RuntimeResult<Arc<Shape>> {
        self.dispatcher
            .registry()
            .collection(collection)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownCollection(collection.to_string()))
    }

    fn load(&self, collection: &str, id: DocumentId) -> RuntimeResult<Document> {
        self.store
            .get(collection, &id)?
            .ok_or_else(|| RuntimeError::NotFound {
                collection: collection.to_string(),
                id,
            })
    }

    /// Runs the operation's stages up to beforeChange on a working copy.
    ///
    /// Validation follows beforeValidate. After beforeDuplicate the context
    /// drops the source identity: later stages work on the new document.
    fn run_before_persist(
        &self,
        shape: &Shape,
        data: Value,
        ctx: &mut OperationContext,
    ) -> RuntimeResult<Value> {
        let mut working = data;
        for &stage in ctx.operation().stages() {
            if runs_after_persist(stage) {
                continue;
            }
            self.dispatcher.run_stage(stage, shape, &mut working, ctx)?;
            match stage {
                HookStage::BeforeValidate => self.dispatcher.validate(shape, &working)?,
                HookStage::BeforeDuplicate => ctx.set_document_id(None),
                _ => {}
            }
        }
        Ok(working)
    }

    /// Runs the operation's afterChange / afterRead stages.
    fn run_after_persist(
        &self,
        shape: &Shape,
        data: &mut Value,
        ctx: &mut OperationContext,
    ) -> DispatchResult<()> {
        for &stage in ctx.operation().stages() {
            if runs_after_persist(stage) {
                self.dispatcher.run_stage(stage, shape, data, ctx)?;
            }
        }
        Ok(())
    }

    /// Runs the stages of a create or duplicate and persists the new document.
    /// `source` is the document being duplicated, if any.
    fn insert_new(
        &self,
        shape: &Shape,
        data: Value,
        source: Option<DocumentId>,
        ctx: &mut OperationContext,
    ) -> RuntimeResult<Document> {
        let data = Value::Object(into_object(data)?);
        let working = self.run_before_persist(shape, data, ctx)?;

        let now = Timestamp::now();
        let mut document = Document {
            id: (self.allocate_id)(),
            collection: shape.slug.clone(),
            data: working,
            created_at: now,
            modified_at: now,
        };
        if source == Some(document.id) {
            return Err(RuntimeError::DuplicateIdentity(document.id));
        }
        self.store.insert(document.clone())?;
        ctx.set_document_id(Some(document.id));

        if let Err(e) = self.run_after_persist(shape, &mut document.data, ctx) {
            warn!(
                collection = %shape.slug,
                id = %document.id,
                "afterChange failed, removing new document: {}",
                e
            );
            self.store.remove(&shape.slug, &document.id)?;
            return Err(e.into());
        }
        Ok(document)
    }
}

const fn runs_after_persist(stage: HookStage) -> bool {
    matches!(stage, HookStage::AfterChange | HookStage::AfterRead)
}

fn into_object(data: Value) -> RuntimeResult<serde_json::Map<String, Value>> {
    match data {
        Value::Object(object) => Ok(object),
        other => Err(RuntimeError::InvalidData(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
