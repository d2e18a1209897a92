//! External C toolchain and generated-binary invocation.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::HarnessError;

/// Captured result of one subprocess stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// True on a zero exit status.
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl StageOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Operator-facing diagnostic: stderr, or a note on how the process ended.
    #[must_use]
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exit status {code}"),
            None => String::from("terminated by signal"),
        }
    }
}

/// A C compiler reachable as a named executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    compiler: PathBuf,
}

impl Toolchain {
    #[must_use]
    pub fn new(compiler: impl Into<PathBuf>) -> Self {
        Self {
            compiler: compiler.into(),
        }
    }

    #[must_use]
    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Build `source` into `output` as `<cc> -o <output> <source>`.
    ///
    /// A non-zero exit is returned as a failed [`StageOutput`]; only a
    /// compiler that cannot be spawned is an error.
    pub fn compile(&self, source: &Path, output: &Path) -> Result<StageOutput, HarnessError> {
        let out = Command::new(&self.compiler)
            .arg("-o")
            .arg(output)
            .arg(source)
            .output()
            .map_err(|source| HarnessError::ToolchainUnavailable {
                compiler: self.compiler.clone(),
                source,
            })?;
        Ok(StageOutput::from_output(&out))
    }

    /// Probe whether the compiler can be spawned (`<cc> --version`).
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.compiler)
            .arg("--version")
            .output()
            .is_ok_and(|out| out.status.success())
    }
}

/// Run a compiled artifact with no arguments.
pub fn execute(binary: &Path) -> std::io::Result<StageOutput> {
    let out = Command::new(binary).output()?;
    Ok(StageOutput::from_output(&out))
}
