//! Harness-level errors.
//!
//! Per-case compile and runtime failures are ordinary results
//! ([`crate::report::CaseStatus`]); only conditions that stop the whole run
//! are represented here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The C compiler could not be spawned at all.
    #[error("toolchain '{}' unavailable: {source}", compiler.display())]
    ToolchainUnavailable {
        compiler: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown backend '{0}', expected c|native|both")]
    UnknownBackend(String),
    /// The report path coincides with one of the files derived from it.
    #[error("report path '{}' collides with its derived '{}'", path.display(), sibling.display())]
    ReportPathCollision { path: PathBuf, sibling: PathBuf },
}
