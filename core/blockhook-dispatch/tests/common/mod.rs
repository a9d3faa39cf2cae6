//! Shared schemas and documents for dispatcher tests.

#![allow(dead_code)]

use blockhook_dispatch::{DispatchConfig, Dispatcher};
use blockhook_model::{FieldDefinition, HookContext, HookStage, SchemaRegistry, Shape};
use serde_json::{Value, json};
use std::sync::Arc;

/// Adds a pass-through hook on every stage.
pub fn observed(field: FieldDefinition) -> FieldDefinition {
    HookStage::ALL.iter().fold(field, |f, stage| {
        f.with_hook(*stage, |v: Value, _: &HookContext| Ok(v))
    })
}

pub fn category_block() -> Shape {
    Shape::block("category-block")
        .field(observed(FieldDefinition::relationship("category", "categories")).required())
        .field(FieldDefinition::text("description"))
}

/// A block that can contain itself, for nesting tests.
pub fn section_block() -> Shape {
    Shape::block("section")
        .field(observed(FieldDefinition::text("heading")))
        .field(FieldDefinition::blocks("items", &["category-block", "section"]))
}

pub fn posts() -> Shape {
    Shape::collection("posts")
        .field(FieldDefinition::text("title").required())
        .field(observed(FieldDefinition::relationship("category", "categories")))
}

pub fn articles() -> Shape {
    Shape::collection("articles")
        .field(FieldDefinition::text("title").required())
        .field(FieldDefinition::rich_text("content", &["category-block"]))
}

pub fn pages() -> Shape {
    Shape::collection("pages")
        .field(FieldDefinition::text("title"))
        .field(FieldDefinition::blocks("layout", &["category-block", "section"]))
}

pub fn registry_with(collections: Vec<Shape>) -> Arc<SchemaRegistry> {
    let mut registry = SchemaRegistry::new();
    for shape in collections {
        registry.register_collection(shape).unwrap();
    }
    registry.register_block(category_block()).unwrap();
    registry.register_block(section_block()).unwrap();
    registry.seal().unwrap()
}

pub fn registry() -> Arc<SchemaRegistry> {
    registry_with(vec![posts(), articles(), pages()])
}

pub fn dispatcher(config: DispatchConfig) -> Dispatcher {
    Dispatcher::new(registry(), config)
}

/// Rich-text content embedding one category block per id.
pub fn rich_text_with_blocks(category_ids: &[i64]) -> Value {
    let children: Vec<Value> = category_ids
        .iter()
        .map(|id| {
            json!({
                "type": "block",
                "version": 2,
                "fields": {
                    "blockType": "category-block",
                    "category": id,
                    "description": "A category block"
                }
            })
        })
        .collect();
    json!({
        "root": {
            "type": "root",
            "children": children,
            "direction": "ltr",
            "format": "",
            "indent": 0,
            "version": 1
        }
    })
}

pub fn article_data(category_ids: &[i64]) -> Value {
    json!({
        "title": "Test Article",
        "content": rich_text_with_blocks(category_ids),
    })
}
