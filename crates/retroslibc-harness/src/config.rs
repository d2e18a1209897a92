//! Harness configuration.
//!
//! Resolution order for the C compiler: `--cc` flag, then the
//! `RETROS_HARNESS_CC` environment variable, then `gcc`. With no flags and
//! no environment the harness runs the C backend over the full suite.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::HarnessError;

/// Environment variable naming the C compiler.
pub const COMPILER_ENV: &str = "RETROS_HARNESS_CC";

/// Compiler used when neither flag nor environment names one.
pub const DEFAULT_COMPILER: &str = "gcc";

/// Where a conformance case is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Generated C program built by the host toolchain.
    C,
    /// In-process checks against `retroslibc-core`.
    Native,
}

impl BackendKind {
    /// Stable lowercase name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Native => "native",
        }
    }

    /// Parse a backend selection (case-insensitive).
    ///
    /// `both` expands to the C backend followed by the native backend.
    pub fn parse_selection(raw: &str) -> Result<Vec<Self>, HarnessError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "c" | "cc" | "toolchain" => Ok(vec![Self::C]),
            "native" | "rust" | "core" => Ok(vec![Self::Native]),
            "both" | "all" => Ok(vec![Self::C, Self::Native]),
            _ => Err(HarnessError::UnknownBackend(raw.to_string())),
        }
    }
}

/// Resolved settings for one harness invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// C compiler executable.
    pub compiler: PathBuf,
    /// Backends to run, in order.
    pub backends: Vec<BackendKind>,
    /// Only run cases whose name contains this substring.
    pub filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from(DEFAULT_COMPILER),
            backends: vec![BackendKind::C],
            filter: None,
        }
    }
}

impl HarnessConfig {
    /// Resolve from CLI values and the process environment.
    pub fn resolve(
        cli_compiler: Option<PathBuf>,
        backend: &str,
        filter: Option<String>,
    ) -> Result<Self, HarnessError> {
        Self::resolve_with_env(
            cli_compiler,
            std::env::var(COMPILER_ENV).ok(),
            backend,
            filter,
        )
    }

    /// Resolve with an explicit environment value (used by tests).
    pub fn resolve_with_env(
        cli_compiler: Option<PathBuf>,
        env_compiler: Option<String>,
        backend: &str,
        filter: Option<String>,
    ) -> Result<Self, HarnessError> {
        let compiler = cli_compiler
            .or_else(|| {
                env_compiler
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER));
        Ok(Self {
            compiler,
            backends: BackendKind::parse_selection(backend)?,
            filter: filter.filter(|f| !f.is_empty()),
        })
    }
}
