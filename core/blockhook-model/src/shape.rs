use crate::{FieldDefinition, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a shape is a top-level collection or a block embedded in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Collection,
    Block,
}

impl ShapeKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Collection => "collection",
            ShapeKind::Block => "block",
        }
    }
}

/// A named, ordered set of field definitions.
///
/// Field order is declaration order and is the order hooks run in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub slug: String,
    pub kind: ShapeKind,
    pub fields: Vec<FieldDefinition>,
    /// Field shown as the document title in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_as_title: Option<String>,
}

impl Shape {
    fn empty(slug: &str, kind: ShapeKind) -> Self {
        Self {
            slug: slug.into(),
            kind,
            fields: Vec::new(),
            use_as_title: None,
        }
    }

    /// Starts a collection shape.
    pub fn collection(slug: &str) -> Self {
        Self::empty(slug, ShapeKind::Collection)
    }

    /// Starts a block shape.
    pub fn block(slug: &str) -> Self {
        Self::empty(slug, ShapeKind::Block)
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn title_field(mut self, name: &str) -> Self {
        self.use_as_title = Some(name.into());
        self
    }

    /// Looks up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that may hold nested shape instances.
    pub fn container_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|f| f.field_type.is_container())
    }

    /// Checks the shape on its own: non-empty slug, non-empty and unique field names.
    pub fn check(&self) -> ModelResult<()> {
        if self.slug.trim().is_empty() {
            return Err(ModelError::EmptySlug);
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(ModelError::EmptyFieldName {
                    shape: self.slug.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    shape: self.slug.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}
