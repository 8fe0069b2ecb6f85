// Checklist evaluator and the two predicate catalogs.
//
// Each predicate is a pure function of (parameter, buckets) with no
// shared state; the evaluator walks a catalog in declaration order and
// runs only the checks the caller's spec names. Results never
// short-circuit: a failing check does not hide the outcomes of others.

mod common;
pub mod skill;
pub mod team;

use serde_json::Value;
use tracelint_types::{CheckResult, CheckSpec, Report};

use crate::classify::Buckets;

pub type CheckFn = fn(&Value, &Buckets) -> CheckResult;

/// How a check is switched on by its spec key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Runs whenever the key is present; the value is the parameter
    /// (expected name, keyword, or count threshold).
    ValueParam,
    /// Runs when the key is present with a truthy value.
    Flag,
}

/// One catalog entry: a named predicate plus its activation rule.
pub struct CheckDef {
    pub name: &'static str,
    pub activation: Activation,
    pub run: CheckFn,
}

/// Run the checks a spec selects from a catalog, in catalog declaration
/// order (never input key order). Unknown spec keys are ignored, and an
/// empty selection passes vacuously. The summary is computed from the
/// buckets unconditionally.
pub fn evaluate(catalog: &[CheckDef], spec: &CheckSpec, buckets: &Buckets) -> Report {
    let mut results: Vec<CheckResult> = Vec::new();

    for def in catalog {
        let selected = match def.activation {
            Activation::ValueParam => spec.get(def.name).is_some(),
            Activation::Flag => spec.is_enabled(def.name),
        };
        if !selected {
            continue;
        }
        let param = spec.get(def.name).cloned().unwrap_or(Value::Null);
        results.push((def.run)(&param, buckets));
    }

    Report::from_results(results, buckets.summarize())
}
