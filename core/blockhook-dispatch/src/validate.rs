//! Required-field and value-type validation across nested content.

use crate::walk::{nested_instances, pointer_join};
use crate::{DispatchConfig, ValidationError};
use blockhook_model::{BLOCK_TYPE_KEY, FieldDefinition, FieldType, SchemaRegistry, Shape};
use serde_json::Value;

/// Checks a document against its shape, including every nested block instance.
///
/// Fails on the first problem in declaration order, depth-first.
pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
    max_depth: usize,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            max_depth: DispatchConfig::default().max_depth,
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self, shape: &Shape, data: &Value) -> Result<(), ValidationError> {
        self.validate_shape(shape, data, "", 0)
    }

    fn validate_shape(
        &self,
        shape: &Shape,
        instance: &Value,
        path: &str,
        depth: usize,
    ) -> Result<(), ValidationError> {
        let object = instance.as_object().ok_or_else(|| ValidationError {
            shape: shape.slug.clone(),
            field: String::new(),
            path: path.to_string(),
            message: "expected an object".into(),
        })?;

        for field in &shape.fields {
            let field_path = pointer_join(path, &field.name);
            let fail = |message: String| ValidationError {
                shape: shape.slug.clone(),
                field: field.name.clone(),
                path: field_path.clone(),
                message,
            };

            let value = match object.get(&field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(fail("field is required".into()));
                    }
                    continue;
                }
                Some(Value::String(s)) if field.required && s.is_empty() => {
                    return Err(fail("field is required".into()));
                }
                Some(value) => value,
            };

            if !type_matches(field.field_type, value) {
                return Err(fail(format!(
                    "expected a {} value",
                    field.field_type.as_str()
                )));
            }

            if field.field_type.is_container() {
                for relative in nested_instances(field.field_type, value) {
                    if depth >= self.max_depth {
                        return Err(fail(format!(
                            "nesting deeper than {} levels",
                            self.max_depth
                        )));
                    }
                    let instance_path = format!("{field_path}{relative}");
                    let block_error = |message: String| ValidationError {
                        shape: shape.slug.clone(),
                        field: field.name.clone(),
                        path: instance_path.clone(),
                        message,
                    };
                    let nested = value
                        .pointer(&relative)
                        .ok_or_else(|| block_error("block instance is missing".into()))?;
                    let block = self.block_for(field, nested).map_err(block_error)?;
                    self.validate_shape(block, nested, &instance_path, depth + 1)?;
                }
            }
        }
        Ok(())
    }

    fn block_for(&self, field: &FieldDefinition, instance: &Value) -> Result<&'a Shape, String> {
        if !instance.is_object() {
            return Err("block instance is not an object".into());
        }
        let block_type = instance
            .get(BLOCK_TYPE_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| "block instance has no blockType".to_string())?;
        if !field.allowed_blocks().iter().any(|b| b == block_type) {
            return Err(format!("block type '{block_type}' is not allowed here"));
        }
        self.registry
            .block(block_type)
            .map(|shape| shape.as_ref())
            .ok_or_else(|| format!("unknown block type '{block_type}'"))
    }
}

fn type_matches(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::Text => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Checkbox => value.is_boolean(),
        FieldType::Relationship => match value {
            Value::Number(_) | Value::String(_) => true,
            Value::Object(map) => map.contains_key("value") && map.contains_key("relationTo"),
            _ => false,
        },
        FieldType::RichText => value.is_object(),
        FieldType::Blocks => value.is_array(),
        FieldType::Json => true,
    }
}
