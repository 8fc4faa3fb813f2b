//! The four-stage comparison pipeline.
//!
//! Stages run once, in a fixed order, each over the working set the
//! previous stage produced. The working set starts as the intersection
//! of the two variable-name sets and only ever shrinks: a variable
//! disqualified by the type/dimension stage is excluded from the
//! metadata and value stages. Each stage is a pure function from
//! `(datasets, working set)` to `(TestResult, next working set)`.

use std::collections::BTreeSet;

use ncd_core::Dataset;

use crate::metadata::diff_attributes;
use crate::numeric::{arrays_identical, diff_values};
use crate::report::{Report, Stage, TestResult};
use crate::sink::Sink;

/// Caller-supplied knobs for one comparison run.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    /// Render one terse line per stage instead of the full detail.
    pub quiet: bool,
    /// When set, restrict the comparison to these variable names. The
    /// filter is intersected with each dataset's actual names before the
    /// name stage runs; it never makes a variable appear where it does
    /// not exist.
    pub variable_filter: Option<BTreeSet<String>>,
}

/// Compare `baseline` against `new`, render the results through `sink`,
/// and return the ordered stage results.
///
/// `Report::failed_count` on the returned report is the verdict.
pub fn run(
    baseline: &Dataset,
    new: &Dataset,
    params: &RunParams,
    sink: &mut dyn Sink,
) -> Report {
    let mut report = Report::default();

    let base_names = filtered_names(baseline, params.variable_filter.as_ref());
    let new_names = filtered_names(new, params.variable_filter.as_ref());

    // Stage 1 always runs once both datasets loaded.
    let (result, mut working) = stage_names(&base_names, &new_names);
    report.push(result);

    if working.is_empty() {
        sink.info(&format!("{}: no variables to test", Stage::TypesAndDims));
    } else {
        let (result, next) = stage_types(baseline, new, &working);
        report.push(result);
        working = next;
    }

    if working.is_empty() {
        sink.info(&format!("{}: no variables to test", Stage::Metadata));
    } else {
        report.push(stage_metadata(baseline, new, &working));
    }

    if working.is_empty() {
        sink.info(&format!("{}: no variables to test", Stage::Values));
    } else {
        report.push(stage_values(baseline, new, &working));
    }

    report.render(params.quiet, sink);
    report
}

/// A dataset's variable names, restricted to the filter when one is set.
fn filtered_names(ds: &Dataset, filter: Option<&BTreeSet<String>>) -> Vec<String> {
    ds.variable_names()
        .filter(|name| filter.is_none_or(|f| f.contains(*name)))
        .map(str::to_owned)
        .collect()
}

/// Stage 1: are the same variables present in both datasets?
///
/// Returns the result and the intersection, which becomes the working
/// set for later stages whether or not this stage passed.
fn stage_names(base: &[String], new: &[String]) -> (TestResult, Vec<String>) {
    let new_set: BTreeSet<&str> = new.iter().map(String::as_str).collect();
    let base_set: BTreeSet<&str> = base.iter().map(String::as_str).collect();

    let common: Vec<String> = base
        .iter()
        .filter(|n| new_set.contains(n.as_str()))
        .cloned()
        .collect();

    if common.len() == base.len() && common.len() == new.len() {
        let result = TestResult::pass(
            Stage::Names,
            "all variables exist in both datasets".to_string(),
        );
        return (result, common);
    }

    let mut lines = Vec::new();
    let baseline_only: Vec<&String> =
        base.iter().filter(|n| !new_set.contains(n.as_str())).collect();
    let new_only: Vec<&String> =
        new.iter().filter(|n| !base_set.contains(n.as_str())).collect();

    if !baseline_only.is_empty() {
        lines.push("variables in baseline but not in new:".to_string());
        for (i, name) in baseline_only.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, name));
        }
    }
    if !new_only.is_empty() {
        lines.push("variables in new but not in baseline:".to_string());
        for (i, name) in new_only.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, name));
        }
    }

    let total = base.len() + new.len() - common.len();
    let fail_msg = format!("{}/{} pass", common.len(), total);
    let result = TestResult::fail(Stage::Names, lines.join("\n"), fail_msg);
    (result, common)
}

/// Stage 2: dtype, dimension count, and shape, checked in that priority
/// order with short-circuiting. Mismatching variables are disqualified
/// from all later stages.
fn stage_types(
    baseline: &Dataset,
    new: &Dataset,
    working: &[String],
) -> (TestResult, Vec<String>) {
    let mut kept = Vec::new();
    let mut lines = Vec::new();

    for name in working {
        let a = baseline.variable(name);
        let b = new.variable(name);

        if a.dtype != b.dtype {
            lines.push(format!(
                "{}: dtype is {} in baseline but {} in new",
                name, a.dtype, b.dtype
            ));
        } else if a.ndim() != b.ndim() {
            lines.push(format!(
                "{}: {} dimensions in baseline but {} in new",
                name,
                a.ndim(),
                b.ndim()
            ));
        } else if a.shape != b.shape {
            lines.push(format!(
                "{}: shape is {:?} in baseline but {:?} in new",
                name, a.shape, b.shape
            ));
        } else {
            kept.push(name.clone());
        }
    }

    let total = working.len();
    let result = if kept.len() == total {
        TestResult::pass(
            Stage::TypesAndDims,
            format!("all {} common variables have matching types and dimensions", total),
        )
    } else {
        lines.push(format!(
            "{} of {} variables have mismatched types or dimensions",
            total - kept.len(),
            total
        ));
        TestResult::fail(
            Stage::TypesAndDims,
            lines.join("\n"),
            format!("{}/{} pass", kept.len(), total),
        )
    };
    (result, kept)
}

/// Stage 3: exact attribute-mapping equality per variable. Mismatches
/// fail the stage but do not disqualify the variable from the values
/// stage.
fn stage_metadata(baseline: &Dataset, new: &Dataset, working: &[String]) -> TestResult {
    let mut lines = Vec::new();
    let mut failed = 0usize;

    for name in working {
        let diff = diff_attributes(
            &baseline.variable(name).attributes,
            &new.variable(name).attributes,
        );
        if diff.is_empty() {
            continue;
        }
        failed += 1;
        lines.push(format!("{}:", name));
        for line in diff.describe() {
            lines.push(format!("  {}", line));
        }
    }

    let total = working.len();
    if failed == 0 {
        TestResult::pass(
            Stage::Metadata,
            format!("all {} common variables have matching metadata", total),
        )
    } else {
        TestResult::fail(
            Stage::Metadata,
            lines.join("\n"),
            format!("{}/{} pass", total - failed, total),
        )
    }
}

/// Stage 4: value comparison. Exact equality (NaN positions equal to
/// each other) is tried first; the masked numeric diff only runs for
/// diagnostics. Pass/fail per variable comes from `values_differ`
/// alone: a pure mask mismatch is reported but does not fail.
fn stage_values(baseline: &Dataset, new: &Dataset, working: &[String]) -> TestResult {
    let mut lines = Vec::new();
    let mut failed = 0usize;

    for name in working {
        let a = baseline.variable(name);
        let b = new.variable(name);
        if arrays_identical(&a.values, &b.values) {
            continue;
        }

        let diff = diff_values(&a.values, &b.values);
        lines.push(format!("{} ({}):", name, a.dtype));
        if diff.mask_mismatch {
            lines.push("  WARNING: missing-value masks differ".to_string());
        }
        if let Some(abs) = diff.max_abs_diff {
            lines.push(format!("  max abs difference: {:e}", abs));
            if let Some(rel) = diff.max_rel_diff {
                lines.push(format!("  max rel difference: {:e}", rel));
            }
        }
        if diff.values_differ {
            failed += 1;
        }
    }

    let total = working.len();
    if failed == 0 {
        let mut verbose = format!("all {} common variables have matching values", total);
        if !lines.is_empty() {
            verbose.push('\n');
            verbose.push_str(&lines.join("\n"));
        }
        TestResult::pass(Stage::Values, verbose)
    } else {
        TestResult::fail(
            Stage::Values,
            lines.join("\n"),
            format!("{}/{} pass", total - failed, total),
        )
    }
}
