//! The field hook dispatcher.

use crate::call_log::{InvocationOutcome, InvocationRecord, OperationContext};
use crate::walk::{nested_instances, pointer_join};
use crate::{
    DispatchConfig, DispatchError, DispatchResult, FailureMode, HookExecutionError,
    ValidationError, Validator,
};
use blockhook_model::{
    BLOCK_TYPE_KEY, FieldDefinition, HookContext, HookError, HookStage, SchemaRegistry, Shape,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Runs field hooks for one stage across a document and all of its nested
/// block instances.
///
/// Order is deterministic: fields in declaration order; after a field's hooks
/// run, the block instances inside that field are dispatched depth-first
/// before the next sibling field.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SchemaRegistry>,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(registry: Arc<SchemaRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Runs `stage` over a document's data, writing hook results back in place.
    ///
    /// With [`FailureMode::Abort`] the first failing hook stops the pass and
    /// `data` may hold values already written by earlier hooks; callers that
    /// need atomicity dispatch on a copy.
    pub fn run_stage(
        &self,
        stage: HookStage,
        shape: &Shape,
        data: &mut Value,
        ctx: &mut OperationContext,
    ) -> DispatchResult<()> {
        debug!(
            operation = %ctx.operation(),
            %stage,
            shape = %shape.slug,
            "Dispatching stage"
        );
        let before = ctx.log().len();
        self.dispatch_shape(stage, shape, data, "", 0, ctx)?;
        trace!(%stage, calls = ctx.log().len() - before, "Stage complete");
        Ok(())
    }

    /// Validates required fields and value types across the document and its
    /// nested blocks.
    pub fn validate(&self, shape: &Shape, data: &Value) -> DispatchResult<()> {
        Validator::new(&self.registry)
            .with_max_depth(self.config.max_depth)
            .validate(shape, data)
            .map_err(Into::into)
    }

    fn dispatch_shape(
        &self,
        stage: HookStage,
        shape: &Shape,
        instance: &mut Value,
        path: &str,
        depth: usize,
        ctx: &mut OperationContext,
    ) -> DispatchResult<()> {
        if depth > self.config.max_depth {
            return Err(DispatchError::DepthExceeded {
                max_depth: self.config.max_depth,
                path: path.to_string(),
            });
        }
        let object = instance
            .as_object_mut()
            .ok_or_else(|| DispatchError::NotAnObject {
                shape: shape.slug.clone(),
                path: path.to_string(),
            })?;

        for field in &shape.fields {
            let Some(slot) = object.get_mut(&field.name) else {
                continue;
            };
            let field_path = pointer_join(path, &field.name);
            self.run_field_hooks(stage, shape, field, slot, &field_path, depth, ctx)?;
            if field.field_type.is_container() {
                self.dispatch_nested(stage, field, slot, &field_path, depth, ctx)?;
            }
        }
        Ok(())
    }

    /// Dispatches `stage` into every block instance held by a container field.
    fn dispatch_nested(
        &self,
        stage: HookStage,
        field: &FieldDefinition,
        value: &mut Value,
        field_path: &str,
        depth: usize,
        ctx: &mut OperationContext,
    ) -> DispatchResult<()> {
        for relative in nested_instances(field.field_type, value) {
            let instance_path = format!("{field_path}{relative}");
            let instance = value
                .pointer_mut(&relative)
                .ok_or_else(|| DispatchError::MalformedBlock {
                    field: field.name.clone(),
                    path: instance_path.clone(),
                })?;
            let block = self.resolve_block(field, instance, &instance_path)?;
            self.dispatch_shape(stage, &block, instance, &instance_path, depth + 1, ctx)?;
        }
        Ok(())
    }

    /// Finds the registered shape of a nested instance and checks the field allows it.
    pub(crate) fn resolve_block(
        &self,
        field: &FieldDefinition,
        instance: &Value,
        path: &str,
    ) -> DispatchResult<Arc<Shape>> {
        if !instance.is_object() {
            return Err(DispatchError::MalformedBlock {
                field: field.name.clone(),
                path: path.to_string(),
            });
        }
        let block_type = instance
            .get(BLOCK_TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| DispatchError::MissingBlockType {
                path: path.to_string(),
            })?;
        let shape = self
            .registry
            .block(block_type)
            .ok_or_else(|| DispatchError::UnknownBlock {
                block_type: block_type.to_string(),
                path: path.to_string(),
            })?;
        if !field.allowed_blocks().iter().any(|b| b == block_type) {
            return Err(DispatchError::BlockNotAllowed {
                block_type: block_type.to_string(),
                field: field.name.clone(),
                path: path.to_string(),
            });
        }
        Ok(Arc::clone(shape))
    }

    #[allow(clippy::too_many_arguments)]
    fn run_field_hooks(
        &self,
        stage: HookStage,
        shape: &Shape,
        field: &FieldDefinition,
        slot: &mut Value,
        path: &str,
        depth: usize,
        ctx: &mut OperationContext,
    ) -> DispatchResult<()> {
        let hooks = field.hooks.for_stage(stage);
        if hooks.is_empty() {
            return Ok(());
        }

        let hook_ctx = HookContext {
            operation: ctx.operation(),
            stage,
            shape: shape.slug.clone(),
            field: field.name.clone(),
            path: path.to_string(),
            document_id: ctx.document_id(),
            depth,
        };
        let mut current = slot.clone();

        for (hook_index, hook) in hooks.iter().enumerate() {
            let input = current.clone();
            let result = hook.call(current, &hook_ctx);
            let (outcome, output) = match &result {
                Ok(next) => (InvocationOutcome::Ok, Some(next.clone())),
                Err(HookError::Rejected { reason }) => (
                    InvocationOutcome::Rejected {
                        reason: reason.clone(),
                    },
                    None,
                ),
                Err(HookError::Failed { reason }) => (
                    InvocationOutcome::Failed {
                        reason: reason.clone(),
                    },
                    None,
                ),
            };
            if self.config.log_values {
                debug!(%stage, shape = %shape.slug, field = %field.name, %path, hook_index, %input, ?output, "Hook invoked");
            } else {
                debug!(%stage, shape = %shape.slug, field = %field.name, %path, hook_index, "Hook invoked");
            }
            ctx.record(InvocationRecord {
                operation: hook_ctx.operation,
                stage,
                shape: shape.slug.clone(),
                field: field.name.clone(),
                path: path.to_string(),
                depth,
                hook_index,
                input,
                output,
                outcome,
            });

            current = match result {
                Ok(next) => next,
                Err(HookError::Rejected { reason }) if stage == HookStage::BeforeValidate => {
                    return Err(ValidationError {
                        shape: shape.slug.clone(),
                        field: field.name.clone(),
                        path: path.to_string(),
                        message: reason,
                    }
                    .into());
                }
                Err(HookError::Rejected { reason }) => {
                    return Err(self.execution_error(stage, shape, field, path, reason));
                }
                Err(HookError::Failed { reason }) => match self.config.failure_mode {
                    FailureMode::Abort => {
                        return Err(self.execution_error(stage, shape, field, path, reason));
                    }
                    FailureMode::Continue => {
                        warn!(
                            %stage,
                            shape = %shape.slug,
                            field = %field.name,
                            %path,
                            "Hook failed (continue): {}",
                            reason
                        );
                        return Ok(());
                    }
                },
            };
        }

        *slot = current;
        Ok(())
    }

    fn execution_error(
        &self,
        stage: HookStage,
        shape: &Shape,
        field: &FieldDefinition,
        path: &str,
        reason: String,
    ) -> DispatchError {
        HookExecutionError {
            stage,
            shape: shape.slug.clone(),
            field: field.name.clone(),
            path: path.to_string(),
            reason,
        }
        .into()
    }
}
