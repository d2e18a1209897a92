//! Case classification and run reports.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::BackendKind;
use crate::error::HarnessError;

/// Classification of one case after its pipeline finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pass,
    CompileFailure,
    RuntimeFailure,
}

impl CaseStatus {
    #[must_use]
    pub const fn passed(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Text printed after `Running <name>...`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::CompileFailure => "FAIL (compilation)",
            Self::RuntimeFailure => "FAIL (runtime)",
        }
    }
}

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub case_name: String,
    pub backend: BackendKind,
    pub status: CaseStatus,
    /// Toolchain or process stderr for failed stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    pub duration_ms: u64,
}

/// Pass/fail counters for one backend run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub suite: String,
    pub backend: BackendKind,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CaseResult>,
}

impl RunSummary {
    /// Fold per-case results into counters.
    #[must_use]
    pub fn from_results(
        suite: impl Into<String>,
        backend: BackendKind,
        results: Vec<CaseResult>,
    ) -> Self {
        let passed = results.iter().filter(|r| r.status.passed()).count();
        Self {
            suite: suite.into(),
            backend,
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Report covering every backend run of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ConformanceReport {
    pub title: String,
    pub timestamp: String,
    pub runs: Vec<RunSummary>,
}

impl ConformanceReport {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.runs.iter().all(RunSummary::all_passed)
    }

    /// Render as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\nGenerated: {}\n", self.title, self.timestamp);
        for run in &self.runs {
            out.push_str(&format!(
                "\n## {} ({})\n\n- Total: {}\n- Passed: {}\n- Failed: {}\n\n",
                run.suite,
                run.backend.as_str(),
                run.total,
                run.passed,
                run.failed
            ));
            out.push_str("| Case | Status | Duration (ms) |\n|------|--------|---------------|\n");
            for result in &run.results {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    result.case_name,
                    result.status.label(),
                    result.duration_ms
                ));
            }
            let failures: Vec<_> = run
                .results
                .iter()
                .filter_map(|r| r.diagnostic.as_ref().map(|d| (r.case_name.as_str(), d)))
                .collect();
            if !failures.is_empty() {
                out.push_str("\n### Diagnostics\n");
                for (name, diagnostic) in failures {
                    out.push_str(&format!("\n`{name}`\n\n```\n{diagnostic}\n```\n"));
                }
            }
        }
        out
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Files written for one `--report` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// The path as given; receives the markdown report.
    pub markdown: PathBuf,
    /// `<stem>.json` sibling with the JSON report.
    pub json: PathBuf,
    /// `<stem>.artifacts.json` SHA-256 index of the written files.
    pub index: PathBuf,
}

impl ReportPaths {
    /// Derive the sibling paths of `markdown`.
    ///
    /// Fails when a derived path equals the markdown path (for example
    /// `report.json`), since one file would overwrite the other.
    pub fn derive(markdown: &Path) -> Result<Self, HarnessError> {
        let json = markdown.with_extension("json");
        let index = markdown.with_extension("artifacts.json");
        for sibling in [&json, &index] {
            if sibling.as_path() == markdown {
                return Err(HarnessError::ReportPathCollision {
                    path: markdown.to_path_buf(),
                    sibling: sibling.clone(),
                });
            }
        }
        Ok(Self {
            markdown: markdown.to_path_buf(),
            json,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, status: CaseStatus) -> CaseResult {
        CaseResult {
            case_name: name.to_string(),
            backend: BackendKind::C,
            status,
            diagnostic: (!status.passed()).then(|| format!("{name} broke")),
            duration_ms: 1,
        }
    }

    #[test]
    fn summary_counts_add_up() {
        let summary = RunSummary::from_results(
            "memory",
            BackendKind::C,
            vec![
                result("a", CaseStatus::Pass),
                result("b", CaseStatus::CompileFailure),
                result("c", CaseStatus::RuntimeFailure),
            ],
        );
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed + summary.failed, summary.total);
        assert_eq!(summary.failed, 2);
        assert!(!summary.all_passed());
    }

    #[test]
    fn empty_summary_passes() {
        let summary = RunSummary::from_results("memory", BackendKind::Native, Vec::new());
        assert!(summary.all_passed());
    }

    #[test]
    fn labels_match_console_format() {
        assert_eq!(CaseStatus::Pass.label(), "PASS");
        assert_eq!(CaseStatus::CompileFailure.label(), "FAIL (compilation)");
        assert_eq!(CaseStatus::RuntimeFailure.label(), "FAIL (runtime)");
    }

    #[test]
    fn markdown_lists_cases_and_diagnostics() {
        let report = ConformanceReport {
            title: String::from("RETROS-BIOS Memory Function Tests"),
            timestamp: String::from("2026-01-01T00:00:00.000Z"),
            runs: vec![RunSummary::from_results(
                "memory",
                BackendKind::C,
                vec![
                    result("memset", CaseStatus::Pass),
                    result("strcpy", CaseStatus::RuntimeFailure),
                ],
            )],
        };
        let md = report.to_markdown();
        assert!(md.contains("## memory (c)"));
        assert!(md.contains("| memset | PASS | 1 |"));
        assert!(md.contains("| strcpy | FAIL (runtime) | 1 |"));
        assert!(md.contains("strcpy broke"));
        assert!(!report.all_passed());
    }

    #[test]
    fn json_uses_snake_case_status() {
        let report = ConformanceReport {
            title: String::from("t"),
            timestamp: String::from("ts"),
            runs: vec![RunSummary::from_results(
                "memory",
                BackendKind::C,
                vec![result("x", CaseStatus::CompileFailure)],
            )],
        };
        let parsed: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(parsed["runs"][0]["results"][0]["status"], "compile_failure");
        assert_eq!(parsed["runs"][0]["backend"], "c");
    }

    #[test]
    fn report_paths_derive_distinct_siblings() {
        let paths = ReportPaths::derive(Path::new("out/report.md")).unwrap();
        assert_eq!(paths.json, Path::new("out/report.json"));
        assert_eq!(paths.index, Path::new("out/report.artifacts.json"));

        let bare = ReportPaths::derive(Path::new("report")).unwrap();
        assert_eq!(bare.json, Path::new("report.json"));
    }

    #[test]
    fn report_path_colliding_with_sibling_is_rejected() {
        for colliding in ["out/r.json", "out/r.artifacts.json"] {
            let err = ReportPaths::derive(Path::new(colliding)).unwrap_err();
            let HarnessError::ReportPathCollision { path, .. } = &err else {
                panic!("unexpected error: {err}");
            };
            assert_eq!(path, Path::new(colliding));
        }
    }
}
