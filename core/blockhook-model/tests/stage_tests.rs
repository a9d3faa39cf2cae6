use blockhook_model::{HookError, HookStage, Operation};

#[test]
fn stage_names_are_camel_case() {
    let names: Vec<_> = HookStage::ALL.iter().map(HookStage::as_str).collect();
    assert_eq!(
        names,
        vec!["beforeValidate", "beforeChange", "afterChange", "afterRead", "beforeDuplicate"]
    );
    assert_eq!(
        serde_json::to_string(&HookStage::BeforeDuplicate).unwrap(),
        "\"beforeDuplicate\""
    );
}

#[test]
fn create_and_update_share_sequence() {
    assert_eq!(
        Operation::Create.stages(),
        &[HookStage::BeforeValidate, HookStage::BeforeChange, HookStage::AfterChange]
    );
    assert_eq!(Operation::Update.stages(), Operation::Create.stages());
}

#[test]
fn read_only_runs_after_read() {
    assert_eq!(Operation::Read.stages(), &[HookStage::AfterRead]);
}

#[test]
fn duplicate_runs_before_duplicate_then_create() {
    let stages = Operation::Duplicate.stages();
    assert_eq!(stages[0], HookStage::BeforeDuplicate);
    assert_eq!(&stages[1..], Operation::Create.stages());
}

#[test]
fn hook_error_reason_and_display() {
    let rejected = HookError::reject("category must be positive");
    assert_eq!(rejected.reason(), "category must be positive");
    assert_eq!(rejected.to_string(), "rejected: category must be positive");

    let failed = HookError::failed("lookup timed out");
    assert_eq!(failed.to_string(), "failed: lookup timed out");
}
