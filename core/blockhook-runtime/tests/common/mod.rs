//! Shared collections for lifecycle tests.

#![allow(dead_code)]

use blockhook_dispatch::DispatchConfig;
use blockhook_model::{FieldDefinition, HookContext, HookStage, SchemaRegistry, Shape};
use blockhook_runtime::ContentRuntime;
use serde_json::{Value, json};
use std::sync::Arc;

pub fn observed(field: FieldDefinition) -> FieldDefinition {
    HookStage::ALL.iter().fold(field, |f, stage| {
        f.with_hook(*stage, |v: Value, _: &HookContext| Ok(v))
    })
}

pub fn registry_with(extra_block_field: Option<FieldDefinition>) -> Arc<SchemaRegistry> {
    let mut block = Shape::block("category-block")
        .field(observed(FieldDefinition::relationship("category", "categories")).required())
        .field(FieldDefinition::text("description"));
    if let Some(field) = extra_block_field {
        block = block.field(field);
    }

    let mut registry = SchemaRegistry::new();
    registry
        .register_collection(
            Shape::collection("posts")
                .field(FieldDefinition::text("title").required())
                .field(observed(FieldDefinition::relationship("category", "categories"))),
        )
        .unwrap();
    registry
        .register_collection(
            Shape::collection("articles")
                .field(FieldDefinition::text("title").required())
                .field(FieldDefinition::rich_text("content", &["category-block"])),
        )
        .unwrap();
    registry.register_block(block).unwrap();
    registry.seal().unwrap()
}

/// Routes runtime logs to the test harness; `RUST_LOG=debug` shows hook calls.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn runtime() -> ContentRuntime {
    init_tracing();
    ContentRuntime::in_memory(registry_with(None), DispatchConfig::default())
}

pub fn article_data(title: &str, category: i64) -> Value {
    json!({
        "title": title,
        "content": {
            "root": {
                "type": "root",
                "children": [{
                    "type": "block",
                    "version": 2,
                    "fields": {
                        "blockType": "category-block",
                        "category": category,
                        "description": "A category block"
                    }
                }],
                "direction": "ltr",
                "format": "",
                "indent": 0,
                "version": 1
            }
        }
    })
}

pub const BLOCK_CATEGORY: &str = "/content/root/children/0/fields/category";
