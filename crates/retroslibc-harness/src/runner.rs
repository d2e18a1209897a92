//! Test execution engine.
//!
//! Each case moves through Generated → Compiled → Executed → Classified on
//! the C backend, or straight to Classified on the native backend. Cases run
//! one at a time; a failed case never stops the run. The diagnostic of a
//! failed stage is printed right after its `FAIL` line.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::config::BackendKind;
use crate::error::HarnessError;
use crate::fixtures::{ConformanceCase, Suite};
use crate::program::render_program;
use crate::report::{CaseResult, CaseStatus, RunSummary};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::toolchain::{self, Toolchain};

/// Banner title printed above the per-case lines.
pub const REPORT_TITLE: &str = "RETROS-BIOS Memory Function Tests";

const RULE: &str = "==================================================";

/// Result of pushing one case through a backend, before timing is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub status: CaseStatus,
    pub diagnostic: Option<String>,
    pub exit_code: Option<i32>,
}

impl Execution {
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            status: CaseStatus::Pass,
            diagnostic: None,
            exit_code: Some(0),
        }
    }

    #[must_use]
    pub fn fail(status: CaseStatus, diagnostic: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            status,
            diagnostic: Some(diagnostic.into()),
            exit_code,
        }
    }
}

/// Something that can execute a conformance case.
pub trait CaseBackend {
    fn kind(&self) -> BackendKind;

    /// Execute `case`. `Err` is reserved for conditions that must stop the run.
    fn execute(&self, case: &ConformanceCase) -> Result<Execution, HarnessError>;
}

/// Builds each case as a standalone C program and runs it.
#[derive(Debug, Clone)]
pub struct CProgramBackend {
    toolchain: Toolchain,
}

impl CProgramBackend {
    #[must_use]
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    fn build_and_run(&self, case: &ConformanceCase, dir: &Path) -> Result<Execution, HarnessError> {
        let source = dir.join("case.c");
        let binary = dir.join(format!("case{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(&source, render_program(case.c_body))?;

        let compiled = self.toolchain.compile(&source, &binary)?;
        if !compiled.success {
            return Ok(Execution::fail(
                CaseStatus::CompileFailure,
                compiled.diagnostic(),
                compiled.exit_code,
            ));
        }

        let ran = match toolchain::execute(&binary) {
            Ok(ran) => ran,
            Err(err) => {
                return Ok(Execution::fail(
                    CaseStatus::RuntimeFailure,
                    format!("failed to launch {}: {err}", binary.display()),
                    None,
                ));
            }
        };
        if !ran.success {
            return Ok(Execution::fail(
                CaseStatus::RuntimeFailure,
                ran.diagnostic(),
                ran.exit_code,
            ));
        }
        Ok(Execution::pass())
    }
}

impl CaseBackend for CProgramBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::C
    }

    fn execute(&self, case: &ConformanceCase) -> Result<Execution, HarnessError> {
        let workdir = tempfile::Builder::new()
            .prefix("retros-case-")
            .tempdir()?;
        // Dropping `workdir` removes source and binary; removal errors are ignored.
        self.build_and_run(case, workdir.path())
    }
}

/// Runs the native checks against `retroslibc-core` in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl CaseBackend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    /// Panics inside a check are classified, not reported by the panic hook:
    /// the hook is silenced for the duration of the call and then restored.
    fn execute(&self, case: &ConformanceCase) -> Result<Execution, HarnessError> {
        let previous_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));
        let caught = std::panic::catch_unwind(case.native);
        std::panic::set_hook(previous_hook);

        let outcome = match caught {
            Ok(Ok(())) => Execution::pass(),
            Ok(Err(message)) => Execution::fail(CaseStatus::RuntimeFailure, message, None),
            Err(payload) => Execution::fail(
                CaseStatus::RuntimeFailure,
                format!("panicked: {}", panic_message(payload.as_ref())),
                None,
            ),
        };
        Ok(outcome)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("<non-string panic payload>")
    }
}

/// Runs a suite against one backend and folds the results.
pub struct HarnessRunner {
    /// Run identifier embedded in trace ids and reports.
    pub run_id: String,
}

impl HarnessRunner {
    #[must_use]
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
        }
    }

    /// Run every case of `suite` in order, writing the human report to `out`.
    ///
    /// Only a fatal backend error (for example a missing compiler) or a
    /// failing output/log write aborts the run.
    pub fn run(
        &self,
        suite: &Suite,
        backend: &dyn CaseBackend,
        out: &mut dyn Write,
        log: &mut LogEmitter,
    ) -> Result<RunSummary, HarnessError> {
        let kind = backend.kind();
        let title = match kind {
            BackendKind::C => REPORT_TITLE.to_string(),
            BackendKind::Native => format!("{REPORT_TITLE} [native]"),
        };
        writeln!(out, "{RULE}\n{title}\n{RULE}\n")?;
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "run_start")
                .with_backend(kind.as_str())
                .with_details(serde_json::json!({
                    "run_id": self.run_id,
                    "cases": suite.len(),
                })),
        )?;

        let mut results = Vec::with_capacity(suite.len());
        for case in &suite.cases {
            write!(out, "Running {}... ", case.name)?;
            out.flush()?;
            log.emit_entry(
                LogEntry::new("", LogLevel::Debug, "case_start")
                    .with_backend(kind.as_str())
                    .with_case(case.name, case.symbols),
            )?;

            let started = Instant::now();
            let execution = match backend.execute(case) {
                Ok(execution) => execution,
                Err(err) => {
                    writeln!(out, "ABORT")?;
                    log.emit_entry(
                        LogEntry::new("", LogLevel::Error, "case_result")
                            .with_backend(kind.as_str())
                            .with_case(case.name, case.symbols)
                            .with_outcome(Outcome::Error)
                            .with_details(serde_json::json!({ "error": err.to_string() })),
                    )?;
                    log.flush()?;
                    return Err(err);
                }
            };
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            writeln!(out, "{}", execution.status.label())?;
            if let Some(diagnostic) = &execution.diagnostic {
                writeln!(out, "{diagnostic}")?;
            }

            let mut entry = LogEntry::new(
                "",
                if execution.status.passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                },
                "case_result",
            )
            .with_backend(kind.as_str())
            .with_case(case.name, case.symbols)
            .with_outcome(Outcome::from(execution.status))
            .with_duration_ms(duration_ms);
            if let Some(code) = execution.exit_code {
                entry = entry.with_exit_code(code);
            }
            if let Some(diagnostic) = &execution.diagnostic {
                entry = entry.with_details(serde_json::json!({
                    "status": execution.status,
                    "diagnostic": diagnostic,
                }));
            }
            log.emit_entry(entry)?;

            results.push(CaseResult {
                case_name: case.name.to_string(),
                backend: kind,
                status: execution.status,
                diagnostic: execution.diagnostic,
                duration_ms,
            });
        }

        let summary = RunSummary::from_results(&suite.name, kind, results);
        writeln!(
            out,
            "\n{RULE}\nPassed: {}\nFailed: {}\n{RULE}",
            summary.passed, summary.failed
        )?;
        log.emit_entry(
            LogEntry::new(
                "",
                if summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Warn
                },
                "run_summary",
            )
            .with_backend(kind.as_str())
            .with_outcome(if summary.all_passed() {
                Outcome::Pass
            } else {
                Outcome::Fail
            })
            .with_details(serde_json::json!({
                "total": summary.total,
                "passed": summary.passed,
                "failed": summary.failed,
            })),
        )?;
        log.flush()?;
        Ok(summary)
    }
}
