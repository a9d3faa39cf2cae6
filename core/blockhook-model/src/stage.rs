use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a document's lifecycle at which field hooks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookStage {
    BeforeValidate,
    BeforeChange,
    AfterChange,
    AfterRead,
    BeforeDuplicate,
}

impl HookStage {
    /// Every stage, in declaration order.
    pub const ALL: [HookStage; 5] = [
        HookStage::BeforeValidate,
        HookStage::BeforeChange,
        HookStage::AfterChange,
        HookStage::AfterRead,
        HookStage::BeforeDuplicate,
    ];

    /// The camelCase name used in logs and serialized call logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            HookStage::BeforeValidate => "beforeValidate",
            HookStage::BeforeChange => "beforeChange",
            HookStage::AfterChange => "afterChange",
            HookStage::AfterRead => "afterRead",
            HookStage::BeforeDuplicate => "beforeDuplicate",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document operation exposed by the lifecycle API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Read,
    Update,
    Duplicate,
}

impl Operation {
    /// Stages this operation passes through, in order.
    ///
    /// Duplicate runs `beforeDuplicate` on the source copy and then the full
    /// create sequence for the new document.
    pub const fn stages(&self) -> &'static [HookStage] {
        match self {
            Operation::Create | Operation::Update => &[
                HookStage::BeforeValidate,
                HookStage::BeforeChange,
                HookStage::AfterChange,
            ],
            Operation::Read => &[HookStage::AfterRead],
            Operation::Duplicate => &[
                HookStage::BeforeDuplicate,
                HookStage::BeforeValidate,
                HookStage::BeforeChange,
                HookStage::AfterChange,
            ],
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
