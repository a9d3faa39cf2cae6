//! The six lifecycle scenarios and their report.

use crate::fixtures;
use blockhook_dispatch::CallLog;
use blockhook_model::{HookStage, Operation};
use blockhook_runtime::{ContentRuntime, DocumentStore, LifecycleOutcome, RuntimeResult};
use blockhook_types::DocumentId;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

/// Where the hooked relationship field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Group {
    /// `posts.category`, a top-level field.
    Direct,
    /// `category-block.category`, inside the rich-text content of `articles`.
    Block,
}

impl Group {
    fn collection(self) -> &'static str {
        match self {
            Group::Direct => "posts",
            Group::Block => "articles",
        }
    }

    fn hooked_shape(self) -> &'static str {
        match self {
            Group::Direct => "posts",
            Group::Block => "category-block",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Direct => "direct relationship",
            Group::Block => "relationship in rich-text block",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    pub stage: HookStage,
    pub calls: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub group: Group,
    pub operation: &'static str,
    pub expected: Vec<HookStage>,
    pub fired: Vec<StageCount>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<CallLog>,
}

impl ScenarioResult {
    fn failed(group: Group, operation: &'static str, expected: &[HookStage], error: String) -> Self {
        Self {
            group,
            operation,
            expected: expected.to_vec(),
            fired: Vec::new(),
            passed: false,
            error: Some(error),
            log: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub scenarios: Vec<ScenarioResult>,
}

impl Report {
    pub fn passed(&self) -> bool {
        !self.scenarios.is_empty() && self.scenarios.iter().all(|s| s.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.scenarios.iter().filter(|s| !s.passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scenario in &self.scenarios {
            let mark = if scenario.passed { "PASS" } else { "FAIL" };
            writeln!(f, "[{}] {} / {}", mark, scenario.group.as_str(), scenario.operation)?;
            for count in &scenario.fired {
                writeln!(f, "       {:<16} {} call(s)", count.stage.as_str(), count.calls)?;
            }
            if let Some(error) = &scenario.error {
                writeln!(f, "       error: {}", error)?;
            }
        }
        let passed = self.scenarios.iter().filter(|s| s.passed).count();
        writeln!(f, "{}/{} scenarios passed", passed, self.scenarios.len())
    }
}

/// Runs create, read and duplicate for both groups against `runtime`.
///
/// A category document is created first and referenced by every fixture.
pub fn run_all<S: DocumentStore>(runtime: &ContentRuntime<S>) -> Report {
    let mut report = Report::default();

    let category = match runtime.create(
        "categories",
        serde_json::json!({
            "name": "Test Category",
            "description": "Referenced by posts and category blocks",
        }),
    ) {
        Ok(outcome) => Value::String(outcome.document.id.to_string()),
        Err(e) => {
            warn!("Failed to create category fixture: {}", e);
            for group in [Group::Direct, Group::Block] {
                report.scenarios.push(ScenarioResult::failed(
                    group,
                    "setup",
                    &[],
                    e.to_string(),
                ));
            }
            return report;
        }
    };

    for group in [Group::Direct, Group::Block] {
        run_group(runtime, group, &category, &mut report);
    }
    info!(
        "Ran {} scenarios, {} failed",
        report.scenarios.len(),
        report.failures().count()
    );
    report
}

fn run_group<S: DocumentStore>(
    runtime: &ContentRuntime<S>,
    group: Group,
    category: &Value,
    report: &mut Report,
) {
    let data = match group {
        Group::Direct => fixtures::post_data("Test Post", category),
        Group::Block => fixtures::article_data("Test Article", category),
    };
    let collection = group.collection();

    let created = runtime.create(collection, data);
    let source = created.as_ref().ok().map(|o| o.document.id);
    report
        .scenarios
        .push(check(group, Operation::Create, created, |_| Ok(())));

    let Some(source) = source else {
        for operation in [Operation::Read, Operation::Duplicate] {
            report.scenarios.push(ScenarioResult::failed(
                group,
                operation.as_str(),
                operation.stages(),
                "skipped: create failed".into(),
            ));
        }
        return;
    };

    report.scenarios.push(check(
        group,
        Operation::Read,
        runtime.read(collection, source),
        |_| Ok(()),
    ));

    report.scenarios.push(check(
        group,
        Operation::Duplicate,
        runtime.duplicate(collection, source),
        |outcome| distinct_identity(source, outcome),
    ));
}

fn distinct_identity(source: DocumentId, outcome: &LifecycleOutcome) -> Result<(), String> {
    if outcome.document.id == source {
        Err(format!("duplicate reused source id {}", source))
    } else {
        Ok(())
    }
}

/// Builds a scenario result: every stage of `operation` must have fired on
/// the hooked relationship field exactly once, and no other stage at all.
fn check(
    group: Group,
    operation: Operation,
    outcome: RuntimeResult<LifecycleOutcome>,
    extra: impl FnOnce(&LifecycleOutcome) -> Result<(), String>,
) -> ScenarioResult {
    let expected = operation.stages();
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{} {} failed: {}", group.collection(), operation, e);
            return ScenarioResult::failed(group, operation.as_str(), expected, e.to_string());
        }
    };

    let shape = group.hooked_shape();
    let fired = count_stages(&outcome.log, shape);
    let wrong: Vec<String> = HookStage::ALL
        .into_iter()
        .filter_map(|stage| {
            let want = usize::from(expected.contains(&stage));
            let got = outcome.log.count(stage, shape, "category");
            (got != want).then(|| format!("{stage} ran {got} time(s), expected {want}"))
        })
        .collect();

    let mut error = None;
    if !wrong.is_empty() {
        error = Some(format!("{}.category hooks: {}", shape, wrong.join("; ")));
    } else if let Err(e) = extra(&outcome) {
        error = Some(e);
    }
    if let Some(e) = &error {
        warn!("{} / {}: {}", group.as_str(), operation, e);
    }

    ScenarioResult {
        group,
        operation: operation.as_str(),
        expected: expected.to_vec(),
        fired,
        passed: error.is_none(),
        error,
        log: Some(outcome.log),
    }
}

fn count_stages(log: &CallLog, shape: &str) -> Vec<StageCount> {
    HookStage::ALL
        .into_iter()
        .map(|stage| StageCount {
            stage,
            calls: log.count(stage, shape, "category"),
        })
        .filter(|c| c.calls > 0)
        .collect()
}
