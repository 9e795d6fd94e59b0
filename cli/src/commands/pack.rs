//! # zipdir Pack Command (`commands::pack`)
//!
//! File: cli/src/commands/pack.rs
//!
//! ## Overview
//!
//! This module drives one archival run from start to finish. It owns the
//! command-line arguments and runs the pipeline stages in strict sequence:
//!
//! ```text
//! START -> RULES_COMPILED -> FILES_COLLECTED -> ARCHIVE_WRITTEN -> DONE
//!                 \                  \
//!                  +------------------+--> FAILED
//! ```
//!
//! 1. Resolve the run configuration (source, destination, extra patterns).
//! 2. Load and compile the ignore rules.
//! 3. Walk the source tree and collect the files to archive.
//! 4. Write the archive, tolerating per-file failures.
//! 5. Report the outcome.
//!
//! Each stage's output is the next stage's input. A fatal error in any stage
//! ends the run; there are no retries. Per-file failures are collected in the
//! returned `RunSummary` and reported once the archive has been closed.
//!
//! ## Examples
//!
//! ```bash
//! # Archive ../project into ./project.zip
//! zipdir ../project
//!
//! # Choose the output path and skip build output
//! zipdir --ignore="target,dist" ../project ../project.zip
//! ```
//!
use crate::common::archive::writer::{self, ArchiveReport};
use crate::common::filter::rules::{self, RuleSet, SkippedPattern};
use crate::common::fs::walk;
use crate::common::ui::progress::{ProgressSink, TerminalProgress};
use crate::core::config::{self, RunConfig};
use crate::core::error::Result;
use clap::Args;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// # Pack Arguments (`PackArgs`)
///
/// Positional source and destination plus the optional `--ignore` flag.
/// The source is optional at the parser level so that running the binary with
/// no arguments can print usage instead of failing.
#[derive(Args, Debug, Default)]
pub struct PackArgs {
    /// Directory to archive.
    pub source: Option<PathBuf>,

    /// Output archive path. Defaults to `<source-folder-name>.zip` in the current directory.
    pub destination: Option<PathBuf>,

    /// Extra ignore rules, comma-separated (e.g. "*.log,tmp/,secret.txt").
    /// Applied after the rules from the source directory's `.zipignore`.
    #[arg(long, value_name = "PATTERNS")]
    pub ignore: Option<String>,
}

/// Stages of a single run, used for logging transitions and failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    RulesCompiled,
    FilesCollected,
    ArchiveWritten,
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Start => "START",
            RunStage::RulesCompiled => "RULES_COMPILED",
            RunStage::FilesCollected => "FILES_COLLECTED",
            RunStage::ArchiveWritten => "ARCHIVE_WRITTEN",
            RunStage::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Everything a completed run produced, for reporting.
#[derive(Debug)]
pub struct RunSummary {
    pub rules_file: Option<PathBuf>,
    pub skipped_patterns: Vec<SkippedPattern>,
    /// `true` when the destination sat inside the source tree and was left out.
    pub excluded_destination: bool,
    pub report: ArchiveReport,
}

/// # Handle Pack Command (`handle_pack`)
///
/// Entry point used by `main`. Resolves the configuration, compiles the rules
/// and reports them right away, then runs the walk and archive stages with a
/// terminal progress bar and prints the outcome.
///
/// ## Errors
///
/// Returns an `Err` for fatal failures only (invalid source, walk failure,
/// archive creation or finalisation failure). Per-file failures are printed
/// and do not make the command fail.
pub fn handle_pack(args: PackArgs) -> Result<()> {
    let source = match args.source {
        Some(source) => source,
        None => anyhow::bail!("No source directory given."),
    };
    let cfg = config::resolve_run_config(&source, args.destination.as_deref(), args.ignore)?;

    if cfg.destination_defaulted {
        println!(
            "No destination given, using default: {}",
            cfg.destination.display()
        );
    }

    let rule_set = compile_rules(&cfg)?;
    print_rule_report(&rule_set);

    let mut progress = TerminalProgress::new();
    let summary = archive_selected(&cfg, rule_set, &mut progress)?;
    print_summary(&summary);
    Ok(())
}

/// # Compile Rules Stage (`compile_rules`)
///
/// `START -> RULES_COMPILED`. Loads `.zipignore` and the `--ignore` patterns.
/// The returned `RuleSet` can be reported before any filesystem walking starts.
pub fn compile_rules(cfg: &RunConfig) -> Result<RuleSet> {
    debug!("Run stage: {}", RunStage::Start);
    let rule_set = rules::load_rules(cfg)?;
    info!(
        "Run stage: {} ({} pattern(s))",
        RunStage::RulesCompiled,
        rule_set.matcher.pattern_count()
    );
    Ok(rule_set)
}

/// # Walk and Archive Stages (`archive_selected`)
///
/// `RULES_COMPILED -> FILES_COLLECTED -> ARCHIVE_WRITTEN -> DONE`.
/// Nothing is printed here; the returned `RunSummary` carries all outcomes.
pub fn archive_selected(
    cfg: &RunConfig,
    rule_set: RuleSet,
    progress: &mut dyn ProgressSink,
) -> Result<RunSummary> {
    let mut stage = RunStage::RulesCompiled;
    let result = run_stages(cfg, rule_set, progress, &mut stage);
    match &result {
        Ok(_) => debug!("Run stage: {}", RunStage::Done),
        Err(e) => debug!("Run failed after stage {}: {}", stage, e),
    }
    result
}

/// Runs the remaining stages in order, recording in `stage` the last one that completed.
fn run_stages(
    cfg: &RunConfig,
    rule_set: RuleSet,
    progress: &mut dyn ProgressSink,
    stage: &mut RunStage,
) -> Result<RunSummary> {
    let mut files = walk::collect_files(&cfg.source, &rule_set.matcher)?;
    let excluded_destination = match cfg.destination_within_source() {
        Some(dest_name) => {
            let before = files.len();
            files.retain(|f| f.name() != dest_name);
            before != files.len()
        }
        None => false,
    };
    *stage = RunStage::FilesCollected;
    info!("Run stage: {} ({} file(s))", stage, files.len());

    let report = writer::write_archive(&cfg.source, &files, &cfg.destination, progress)?;
    *stage = RunStage::ArchiveWritten;
    info!("Run stage: {}", stage);

    Ok(RunSummary {
        rules_file: rule_set.rules_file,
        skipped_patterns: rule_set.skipped,
        excluded_destination,
        report,
    })
}

/// Prints the rule-stage lines: the rules file in use and any rejected patterns.
fn print_rule_report(rule_set: &RuleSet) {
    if let Some(path) = &rule_set.rules_file {
        println!("Using rules file: {}", path.display());
    }
    for skipped in &rule_set.skipped {
        eprintln!(
            "Ignored invalid pattern {}: {}",
            skipped.pattern, skipped.reason
        );
    }
}

/// Prints the operator-facing lines for a finished run.
fn print_summary(summary: &RunSummary) {
    if summary.excluded_destination {
        println!(
            "Destination {} lies inside the source directory; it was not added to itself.",
            summary.report.destination.display()
        );
    }
    for (entry, failure) in summary.report.failures() {
        eprintln!("Failed to archive {}: {}", entry.name(), failure);
    }
    println!(
        "Archived {} file(s), {} failed.",
        summary.report.succeeded(),
        summary.report.failed()
    );
    println!("Done: {}", summary.report.destination.display());
}
