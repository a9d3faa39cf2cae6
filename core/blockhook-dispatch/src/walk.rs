//! Locating nested block instances inside container field values.

use blockhook_model::FieldType;
use serde_json::Value;

/// Lexical node types that embed a block instance under `fields`.
const BLOCK_NODE_TYPES: [&str; 2] = ["block", "inlineBlock"];

/// Appends one reference token to a JSON pointer, escaping `~` and `/`.
pub(crate) fn pointer_join(base: &str, token: &str) -> String {
    let escaped = token.replace('~', "~0").replace('/', "~1");
    format!("{base}/{escaped}")
}

/// JSON pointers, relative to `value`, of every block instance held by a
/// container field, in document order.
///
/// A rich-text block node always yields its `fields` pointer, even when
/// `fields` is missing or not an object, so malformed nodes surface as errors
/// when resolved.
///
/// Rich text is walked through every nested object and array, so blocks
/// inside paragraphs, lists or other nodes are found. Block instances are not
/// searched further here: their own container fields are reached when their
/// shape is dispatched.
pub(crate) fn nested_instances(field_type: FieldType, value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    match field_type {
        FieldType::RichText => collect_rich_text(value, String::new(), &mut out),
        FieldType::Blocks => {
            if let Value::Array(items) = value {
                out.extend((0..items.len()).map(|i| format!("/{i}")));
            }
        }
        _ => {}
    }
    out
}

fn collect_rich_text(node: &Value, pointer: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            let is_block = map
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| BLOCK_NODE_TYPES.contains(&t));
            if is_block {
                out.push(pointer_join(&pointer, "fields"));
                return;
            }
            for (key, child) in map {
                if child.is_object() || child.is_array() {
                    collect_rich_text(child, pointer_join(&pointer, key), out);
                }
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_rich_text(child, format!("{pointer}/{i}"), out);
            }
        }
        _ => {}
    }
}
