//! Schema registration: the set of collections and blocks the runtime knows.

use crate::{FieldType, ModelError, ModelResult, Shape, ShapeKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered collection and block shapes, keyed by slug.
///
/// Collections and blocks live in separate namespaces, so a block may share a
/// slug with a collection.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    collections: BTreeMap<String, Arc<Shape>>,
    blocks: BTreeMap<String, Arc<Shape>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection shape.
    pub fn register_collection(&mut self, shape: Shape) -> ModelResult<()> {
        Self::insert(&mut self.collections, shape, ShapeKind::Collection)
    }

    /// Registers a block shape.
    pub fn register_block(&mut self, shape: Shape) -> ModelResult<()> {
        Self::insert(&mut self.blocks, shape, ShapeKind::Block)
    }

    fn insert(
        map: &mut BTreeMap<String, Arc<Shape>>,
        shape: Shape,
        expected: ShapeKind,
    ) -> ModelResult<()> {
        shape.check()?;
        if shape.kind != expected {
            return Err(ModelError::WrongKind {
                slug: shape.slug,
                expected: expected.as_str(),
                actual: shape.kind.as_str(),
            });
        }
        if map.contains_key(&shape.slug) {
            return Err(ModelError::DuplicateShape(shape.slug));
        }
        map.insert(shape.slug.clone(), Arc::new(shape));
        Ok(())
    }

    pub fn collection(&self, slug: &str) -> Option<&Arc<Shape>> {
        self.collections.get(slug)
    }

    pub fn block(&self, slug: &str) -> Option<&Arc<Shape>> {
        self.blocks.get(slug)
    }

    pub fn collections(&self) -> impl Iterator<Item = &Arc<Shape>> {
        self.collections.values()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Arc<Shape>> {
        self.blocks.values()
    }

    /// Checks cross-shape references once every shape is registered.
    ///
    /// Blocks may be registered in any order relative to the collections that
    /// embed them, which is why this is a separate pass.
    pub fn validate(&self) -> ModelResult<()> {
        for shape in self.collections.values().chain(self.blocks.values()) {
            for field in &shape.fields {
                if field.field_type == FieldType::Relationship
                    && field.relation_to.as_deref().is_none_or(str::is_empty)
                {
                    return Err(ModelError::MissingRelationTarget {
                        shape: shape.slug.clone(),
                        field: field.name.clone(),
                    });
                }
                for block in field.allowed_blocks() {
                    if !self.blocks.contains_key(block) {
                        return Err(ModelError::UnknownBlock {
                            shape: shape.slug.clone(),
                            field: field.name.clone(),
                            block: block.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Validates and freezes the registry for sharing.
    pub fn seal(self) -> ModelResult<Arc<Self>> {
        self.validate()?;
        Ok(Arc::new(self))
    }
}
