use blockhook_types::{DocumentId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored record of a collection.
///
/// `data` is a JSON object whose keys are the collection's field names.
/// Rich-text and blocks fields carry nested block instances inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub collection: String,
    pub data: Value,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
}

impl Document {
    /// Creates a document with a fresh identity and current timestamps.
    pub fn new(collection: &str, data: Value) -> Self {
        let now = Timestamp::now();
        Self {
            id: DocumentId::new(),
            collection: collection.into(),
            data,
            created_at: now,
            modified_at: now,
        }
    }

    /// Extract a value from `data` using a JSON pointer (e.g., "/title").
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.data.pointer(pointer)
    }

    /// Extract a string value from `data` using a JSON pointer.
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.get(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.get(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.get(pointer).and_then(|v| v.as_f64())
    }
}
