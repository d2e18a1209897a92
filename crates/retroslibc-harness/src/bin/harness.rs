//! CLI entrypoint for the retroslibc conformance harness.
//!
//! With no flags: build and run every case with the host C compiler, print
//! the report, exit 0 if all passed and 1 otherwise.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use retroslibc_harness::report::ReportPaths;
use retroslibc_harness::structured_log::{ArtifactIndex, LogEmitter, LogEntry, LogLevel, now_utc};
use retroslibc_harness::{
    ConformanceReport, HarnessConfig, HarnessRunner, backend_for, default_suite,
};

/// Conformance harness for the RETROS memory primitives.
#[derive(Debug, Parser)]
#[command(name = "retroslibc-harness")]
#[command(about = "Compile and run the RETROS memory-function conformance suite")]
struct Cli {
    /// C compiler to invoke (falls back to $RETROS_HARNESS_CC, then gcc).
    #[arg(long)]
    cc: Option<PathBuf>,
    /// Backend: `c`, `native`, or `both`.
    #[arg(long, default_value = "c")]
    backend: String,
    /// Only run cases whose name contains this substring.
    #[arg(long)]
    filter: Option<String>,
    /// Print the registered case names and exit.
    #[arg(long)]
    list: bool,
    /// Structured JSONL log output path.
    #[arg(long)]
    log: Option<PathBuf>,
    /// Markdown report path; a `.json` sibling and `.artifacts.json` index are written too.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Optional fixed timestamp string for deterministic report generation.
    #[arg(long)]
    timestamp: Option<String>,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = HarnessConfig::resolve(cli.cc, &cli.backend, cli.filter)?;
    let suite = default_suite().filtered(config.filter.as_deref());
    let report_paths = cli.report.as_deref().map(ReportPaths::derive).transpose()?;

    if cli.list {
        for case in &suite.cases {
            println!("{}\t{}", case.name, case.symbols.join(","));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let run_id = format!("run-{}", std::process::id());
    let mut log = match &cli.log {
        Some(path) => {
            ensure_parent(path)?;
            LogEmitter::to_file(path, &suite.name, &run_id)?
        }
        None => LogEmitter::disabled(&suite.name, &run_id),
    };

    let runner = HarnessRunner::new(&run_id);
    let mut stdout = std::io::stdout().lock();
    let mut runs = Vec::with_capacity(config.backends.len());
    for (i, kind) in config.backends.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        let backend = backend_for(*kind, &config);
        runs.push(runner.run(&suite, backend.as_ref(), &mut stdout, &mut log)?);
    }

    let report = ConformanceReport {
        title: String::from("RETROS-BIOS Memory Function Conformance Report"),
        timestamp: cli.timestamp.unwrap_or_else(now_utc),
        runs,
    };

    if let Some(paths) = &report_paths {
        ensure_parent(&paths.markdown)?;
        std::fs::write(&paths.markdown, report.to_markdown())?;
        std::fs::write(&paths.json, report.to_json()?)?;
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "report_written").with_artifacts(vec![
                paths.markdown.display().to_string(),
                paths.json.display().to_string(),
            ]),
        )?;

        let mut index = ArtifactIndex::new(&run_id);
        index.add_file(&paths.markdown, "report_markdown")?;
        index.add_file(&paths.json, "report_json")?;
        if let Some(log_path) = &cli.log {
            log.flush()?;
            index.add_file(log_path, "log_jsonl")?;
        }
        std::fs::write(&paths.index, index.to_json()?)?;
        eprintln!("Wrote report to {}", paths.markdown.display());
    }

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
