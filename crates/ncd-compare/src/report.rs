//! Stage results, rendering, and the run verdict.

use serde::{Deserialize, Serialize};

use crate::sink::Sink;

/// The four comparison stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Names,
    TypesAndDims,
    Metadata,
    Values,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Stage::Names => "variable names",
            Stage::TypesAndDims => "types and dimensions",
            Stage::Metadata => "metadata",
            Stage::Values => "values",
        };
        write!(f, "{}", name)
    }
}

/// Verdict of one executed stage. Created once, in pipeline order, and
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub stage: Stage,
    pub passed: bool,
    /// Full multi-line detail shown in verbose mode.
    pub verbose: String,
    /// `"<k>/<n> pass"` summary; present only on failure.
    pub fail_msg: Option<String>,
}

impl TestResult {
    pub fn pass(stage: Stage, verbose: String) -> Self {
        Self {
            stage,
            passed: true,
            verbose,
            fail_msg: None,
        }
    }

    pub fn fail(stage: Stage, verbose: String, fail_msg: String) -> Self {
        Self {
            stage,
            passed: false,
            verbose,
            fail_msg: Some(fail_msg),
        }
    }
}

/// Ordered stage results for one comparison run. Insertion order is the
/// report order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    results: Vec<TestResult>,
}

impl Report {
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// Number of failed stages; the run's integer verdict (0 = full
    /// agreement), usable directly as a process exit status.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    pub fn passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Render every result through the sink. Quiet mode prints one line
    /// per stage; verbose mode prints the full detail under a 1-based
    /// ordinal header. Failing stages go to the error level either way.
    pub fn render(&self, quiet: bool, sink: &mut dyn Sink) {
        if quiet {
            for r in &self.results {
                if r.passed {
                    sink.info(&format!("{}: PASS", r.stage));
                } else {
                    let msg = r.fail_msg.as_deref().unwrap_or("fail");
                    sink.error(&format!("{}: FAIL ({})", r.stage, msg));
                }
            }
            return;
        }

        for (i, r) in self.results.iter().enumerate() {
            let header = format!(
                "{}. {}: {}",
                i + 1,
                r.stage,
                if r.passed { "PASS" } else { "FAIL" }
            );
            if r.passed {
                sink.info(&header);
                for line in r.verbose.lines() {
                    sink.info(&format!("   {}", line));
                }
            } else {
                sink.error(&header);
                for line in r.verbose.lines() {
                    sink.error(&format!("   {}", line));
                }
            }
        }
    }

    /// Serialize to pretty JSON for machine consumption.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_verdict_counts_failures() {
        let mut report = Report::default();
        report.push(TestResult::pass(Stage::Names, "ok".into()));
        report.push(TestResult::fail(
            Stage::Metadata,
            "units differ".into(),
            "1/2 pass".into(),
        ));
        assert_eq!(report.failed_count(), 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_quiet_rendering() {
        let mut report = Report::default();
        report.push(TestResult::pass(Stage::Names, "ok".into()));
        report.push(TestResult::fail(
            Stage::Values,
            "temp differs".into(),
            "2/3 pass".into(),
        ));
        let mut sink = MemorySink::new();
        report.render(true, &mut sink);
        assert_eq!(
            sink.text(),
            vec!["variable names: PASS", "values: FAIL (2/3 pass)"]
        );
        assert_eq!(sink.errors().count(), 1);
    }

    #[test]
    fn test_verbose_rendering_has_ordinals() {
        let mut report = Report::default();
        report.push(TestResult::pass(Stage::Names, "all variables exist in both".into()));
        report.push(TestResult::pass(Stage::Values, "all values match".into()));
        let mut sink = MemorySink::new();
        report.render(false, &mut sink);
        assert!(sink.text()[0].starts_with("1. variable names: PASS"));
        assert!(sink.text()[2].starts_with("2. values: PASS"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut report = Report::default();
        report.push(TestResult::fail(Stage::Names, "depth only in new".into(), "2/3 pass".into()));
        let back: Report = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(back.failed_count(), 1);
        assert_eq!(back.results()[0].stage, Stage::Names);
    }
}
