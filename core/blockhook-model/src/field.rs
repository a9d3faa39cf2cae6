use crate::hook::{FieldHook, HookContext, HookError, HookMap};
use crate::HookStage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One named, typed attribute of a shape.
///
/// Hooks are attached in code and are not part of the serialized schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Target collection. Only meaningful when FieldType is Relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "relationTo")]
    pub relation_to: Option<String>,
    /// Block slugs that may be embedded. Only meaningful for RichText and Blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<String>>,
    #[serde(skip)]
    pub hooks: HookMap,
}

impl FieldDefinition {
    fn simple(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            relation_to: None,
            blocks: None,
            hooks: HookMap::new(),
        }
    }

    /// Shorthand for a plain text field.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldType::Text)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number)
    }

    /// Shorthand for a boolean field.
    pub fn checkbox(name: &str) -> Self {
        Self::simple(name, FieldType::Checkbox)
    }

    /// Shorthand for a JSON blob field.
    pub fn json(name: &str) -> Self {
        Self::simple(name, FieldType::Json)
    }

    /// Shorthand for a reference to a document of another collection.
    pub fn relationship(name: &str, relation_to: &str) -> Self {
        Self {
            relation_to: Some(relation_to.into()),
            ..Self::simple(name, FieldType::Relationship)
        }
    }

    /// Shorthand for a rich-text field whose editor may embed the given blocks.
    pub fn rich_text(name: &str, blocks: &[&str]) -> Self {
        Self {
            blocks: Some(blocks.iter().map(|b| (*b).to_string()).collect()),
            ..Self::simple(name, FieldType::RichText)
        }
    }

    /// Shorthand for an ordered list of block instances.
    pub fn blocks(name: &str, blocks: &[&str]) -> Self {
        Self {
            blocks: Some(blocks.iter().map(|b| (*b).to_string()).collect()),
            ..Self::simple(name, FieldType::Blocks)
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Appends a closure hook for one stage.
    #[must_use]
    pub fn with_hook<F>(mut self, stage: HookStage, hook: F) -> Self
    where
        F: Fn(Value, &HookContext) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.hooks.push(stage, Arc::new(hook));
        self
    }

    /// Appends the same hook to every stage.
    #[must_use]
    pub fn with_hook_on_all_stages(mut self, hook: Arc<dyn FieldHook>) -> Self {
        for stage in HookStage::ALL {
            self.hooks.push(stage, Arc::clone(&hook));
        }
        self
    }

    /// Block slugs this field may contain; empty for non-container fields.
    pub fn allowed_blocks(&self) -> &[String] {
        if self.field_type.is_container() {
            self.blocks.as_deref().unwrap_or(&[])
        } else {
            &[]
        }
    }
}

/// The data type of a field.
///
/// Relationship targets and allowed blocks are stored on `FieldDefinition`
/// rather than inside this enum, keeping the serialized form flat:
/// `{"field_type": "relationship", "relation_to": "categories"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Checkbox,
    Relationship,
    /// A node tree whose `block` nodes embed nested shape instances.
    RichText,
    /// An array of nested shape instances.
    Blocks,
    Json,
}

impl FieldType {
    /// Whether values of this type can hold nested shape instances.
    pub const fn is_container(&self) -> bool {
        matches!(self, FieldType::RichText | FieldType::Blocks)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Checkbox => "checkbox",
            FieldType::Relationship => "relationship",
            FieldType::RichText => "rich_text",
            FieldType::Blocks => "blocks",
            FieldType::Json => "json",
        }
    }
}
