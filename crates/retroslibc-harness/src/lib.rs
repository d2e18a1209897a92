//! Conformance testing harness for the RETROS freestanding memory primitives.
//!
//! This crate provides:
//! - Program generation: splice literal C assertions into a prelude carrying
//!   the reference primitives
//! - Toolchain driving: compile with the host C compiler, run the binary
//! - Classification: pass, compile failure or runtime failure per case
//! - A native backend checking the same assertions against `retroslibc-core`
//! - Report generation and structured JSONL logs

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod program;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod toolchain;

pub use config::{BackendKind, HarnessConfig};
pub use error::HarnessError;
pub use fixtures::{ConformanceCase, Suite, default_suite};
pub use report::{CaseResult, CaseStatus, ConformanceReport, RunSummary};
pub use runner::{CProgramBackend, CaseBackend, HarnessRunner, NativeBackend};
pub use toolchain::Toolchain;

/// Construct the backend for `kind` under `config`.
#[must_use]
pub fn backend_for(kind: BackendKind, config: &HarnessConfig) -> Box<dyn CaseBackend> {
    match kind {
        BackendKind::C => Box::new(CProgramBackend::new(Toolchain::new(&config.compiler))),
        BackendKind::Native => Box::new(NativeBackend),
    }
}
