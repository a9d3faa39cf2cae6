use blockhook_types::DocumentId;
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── DocumentId ────────────────────────────────────────────────────

#[test]
fn document_id_new_is_unique() {
    let a = DocumentId::new();
    let b = DocumentId::new();
    assert_ne!(a, b);
}

#[test]
fn document_id_from_uuid_keeps_uuid() {
    let uuid = uuid::Uuid::now_v7();
    let id = DocumentId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn document_id_display_and_parse() {
    let id = DocumentId::new();
    let parsed = DocumentId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn document_id_from_str() {
    let id = DocumentId::new();
    let parsed: DocumentId = DocumentId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn document_id_parse_invalid() {
    assert!(DocumentId::parse("not-a-uuid").is_err());
    assert!(DocumentId::from_str("7").is_err());
}

#[test]
fn document_id_default_is_unique() {
    assert_ne!(DocumentId::default(), DocumentId::default());
}

#[test]
fn document_id_hash_and_eq() {
    let id = DocumentId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn document_id_serializes_as_bare_string() {
    let id = DocumentId::new();
    let json = serde_json::to_value(id).unwrap();
    assert_eq!(json, serde_json::Value::String(id.to_string()));
}

#[test]
fn document_ids_are_time_ordered() {
    let first = DocumentId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = DocumentId::new();
    assert!(first < second);
}

proptest! {
    #[test]
    fn any_uuid_survives_display_parse(bits in any::<u128>()) {
        let id = DocumentId::from_uuid(uuid::Uuid::from_u128(bits));
        prop_assert_eq!(DocumentId::parse(&id.to_string()).unwrap(), id);
    }
}

#[test]
fn document_id_parse_error_is_crate_error() {
    let err = DocumentId::parse("not-a-uuid").unwrap_err();
    assert!(matches!(err, blockhook_types::Error::InvalidUuid(_)));
    assert!(err.to_string().starts_with("invalid UUID"));
}
