//! The `categories`, `posts` and `articles` collections and `category-block`.

use blockhook_model::{
    FieldDefinition, FieldHook, HookContext, HookError, ModelResult, SchemaRegistry, Shape,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// A hook that logs the value it sees and passes it through unchanged.
pub fn logging_hook(label: &'static str) -> Arc<dyn FieldHook> {
    Arc::new(move |value: Value, ctx: &HookContext| {
        info!("{} {} hook fired with value: {}", label, ctx.stage, value);
        Ok::<Value, HookError>(value)
    })
}

pub fn categories() -> Shape {
    Shape::collection("categories")
        .title_field("name")
        .field(FieldDefinition::text("name").required())
        .field(FieldDefinition::text("description"))
}

pub fn category_block() -> Shape {
    Shape::block("category-block")
        .field(
            FieldDefinition::relationship("category", "categories")
                .required()
                .with_hook_on_all_stages(logging_hook("CategoryBlock.category")),
        )
        .field(FieldDefinition::text("description"))
}

pub fn posts() -> Shape {
    Shape::collection("posts")
        .title_field("title")
        .field(FieldDefinition::text("title").required())
        .field(
            FieldDefinition::relationship("category", "categories")
                .with_hook_on_all_stages(logging_hook("Posts.category")),
        )
}

pub fn articles() -> Shape {
    Shape::collection("articles")
        .title_field("title")
        .field(FieldDefinition::text("title").required())
        .field(FieldDefinition::rich_text("content", &["category-block"]))
}

/// All fixture shapes, validated and ready to share.
pub fn registry() -> ModelResult<Arc<SchemaRegistry>> {
    let mut registry = SchemaRegistry::new();
    registry.register_collection(categories())?;
    registry.register_collection(posts())?;
    registry.register_collection(articles())?;
    registry.register_block(category_block())?;
    registry.seal()
}

pub fn post_data(title: &str, category: &Value) -> Value {
    json!({
        "title": title,
        "category": category,
    })
}

/// An article whose content embeds one `category-block`.
pub fn article_data(title: &str, category: &Value) -> Value {
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
