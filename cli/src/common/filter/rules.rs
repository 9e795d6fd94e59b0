//! # zipdir Ignore Rule Compilation (`common::filter::rules`)
//!
//! File: cli/src/common/filter/rules.rs
//!
//! ## Overview
//!
//! This module gathers ignore patterns from their two sources and compiles them
//! into a single `Matcher` consulted by the tree walker.
//!
//! Patterns accumulate in a fixed order:
//! 1. Lines of the `.zipignore` file at the root of the source directory (if present).
//! 2. Comma-separated tokens of the `--ignore` argument (if given).
//!
//! Later patterns never replace earlier ones; they are appended, which is what
//! lets a later `!pattern` re-include something an earlier pattern excluded.
//!
//! ## Architecture
//!
//! Pattern semantics are gitignore semantics, provided by the `ignore` crate's
//! `GitignoreBuilder`:
//! - `*` and `?` match within one path segment, `**` spans any depth
//! - a leading `/` anchors a pattern to the source root
//! - a trailing `/` only matches directories
//! - `!` negates, re-including a path matched by an earlier pattern
//!
//! An empty pattern list compiles to `Matcher::NoFilter`, which never matches.
//! A pattern that fails to compile is recorded as a `SkippedPattern` and the
//! rest of the rule set still applies.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::filter::rules::{self, Matcher};
//!
//! let patterns = rules::collect_patterns(Some("*.log\ntmp/\n"), Some("secret.txt"));
//! let (matcher, skipped) = rules::compile(root, &patterns)?;
//! assert!(matcher.is_match("logs/app.log", false));
//! assert!(matcher.is_match("tmp", true));
//! ```
//!
use crate::core::config::RunConfig;
use crate::core::error::{Result, ZipdirError};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a pattern came from. Used when reporting patterns that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternOrigin {
    /// 1-based line number in the rules file.
    RulesFile { line: usize },
    /// Position (1-based) among the `--ignore` tokens.
    CommandLine { index: usize },
}

/// A single ignore rule, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub text: String,
    pub origin: PatternOrigin,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            PatternOrigin::RulesFile { line } => write!(f, "'{}' (rules file line {})", self.text, line),
            PatternOrigin::CommandLine { index } => write!(f, "'{}' (--ignore #{})", self.text, index),
        }
    }
}

/// A pattern rejected by the glob compiler, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedPattern {
    pub pattern: Pattern,
    pub reason: String,
}

/// The compiled decision procedure: does a relative path match the rules?
#[derive(Debug, Clone)]
pub enum Matcher {
    /// No patterns at all. Every path is included.
    NoFilter,
    /// At least one pattern was compiled.
    Compiled(Gitignore),
}

impl Matcher {
    /// Returns `true` if `relative_path` (forward-slash form, relative to the
    /// source root) is excluded by the rules.
    ///
    /// `is_dir` must reflect the entry's type so that directory-only patterns
    /// (`build/`) do not hit files of the same name.
    pub fn is_match(&self, relative_path: &str, is_dir: bool) -> bool {
        match self {
            Matcher::NoFilter => false,
            Matcher::Compiled(gitignore) => gitignore
                .matched(Path::new(relative_path), is_dir)
                .is_ignore(),
        }
    }

    /// Number of compiled globs (0 for `NoFilter`).
    pub fn pattern_count(&self) -> usize {
        match self {
            Matcher::NoFilter => 0,
            Matcher::Compiled(gitignore) => gitignore.num_ignores() as usize
                + gitignore.num_whitelists() as usize,
        }
    }
}

/// Everything the rule stage hands to the rest of the run.
#[derive(Debug)]
pub struct RuleSet {
    pub matcher: Matcher,
    /// Path of the rules file, when one was found and read.
    pub rules_file: Option<PathBuf>,
    pub skipped: Vec<SkippedPattern>,
}

/// Splits rules-file content and `--ignore` text into an ordered pattern list.
///
/// File lines come first, in file order, then command-line tokens in the order
/// given. Surrounding whitespace is trimmed and empty entries are discarded.
pub fn collect_patterns(file_content: Option<&str>, cli_patterns: Option<&str>) -> Vec<Pattern> {
    let mut patterns = Vec::new();

    if let Some(content) = file_content {
        for (idx, line) in content.lines().enumerate() {
            let text = line.trim();
            if !text.is_empty() {
                patterns.push(Pattern {
                    text: text.to_string(),
                    origin: PatternOrigin::RulesFile { line: idx + 1 },
                });
            }
        }
    }

    if let Some(raw) = cli_patterns {
        for (idx, token) in raw.split(',').enumerate() {
            let text = token.trim();
            if !text.is_empty() {
                patterns.push(Pattern {
                    text: text.to_string(),
                    origin: PatternOrigin::CommandLine { index: idx + 1 },
                });
            }
        }
    }

    patterns
}

/// # Compile Patterns (`compile`)
///
/// Builds a `Matcher` rooted at `root` from `patterns`, preserving their order.
///
/// ## Returns
///
/// The matcher plus any patterns that were rejected. An empty `patterns`
/// slice yields `Matcher::NoFilter`.
///
/// ## Errors
///
/// Returns an `Err` only if the final glob set cannot be assembled.
pub fn compile(root: &Path, patterns: &[Pattern]) -> Result<(Matcher, Vec<SkippedPattern>)> {
    if patterns.is_empty() {
        debug!("No ignore patterns supplied; every file will be included.");
        return Ok((Matcher::NoFilter, Vec::new()));
    }

    let mut builder = GitignoreBuilder::new(root);
    let mut skipped = Vec::new();
    for pattern in patterns {
        if let Err(e) = builder.add_line(None, &pattern.text) {
            warn!("Skipping invalid ignore pattern {}: {}", pattern, e);
            skipped.push(SkippedPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    let gitignore = builder.build().map_err(ZipdirError::from)?;
    debug!(
        "Compiled {} ignore pattern(s) ({} skipped).",
        patterns.len() - skipped.len(),
        skipped.len()
    );
    Ok((Matcher::Compiled(gitignore), skipped))
}

/// Reads the rules file if it exists.
///
/// A missing file is the normal case and yields `None` silently. A file that
/// exists but cannot be read is logged as a warning and also yields `None`.
pub fn read_rules_file(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No rules file at {:?}", path);
            None
        }
        Err(e) => {
            warn!("Rules file {:?} exists but could not be read: {}", path, e);
            None
        }
    }
}

/// # Load Rules (`load_rules`)
///
/// Runs the whole rule stage for a resolved configuration: reads the project
/// rules file, appends the `--ignore` patterns, and compiles the result.
pub fn load_rules(cfg: &RunConfig) -> Result<RuleSet> {
    let rules_path = cfg.rules_file();
    let file_content = read_rules_file(&rules_path);
    let rules_file = file_content.as_ref().map(|_| rules_path);
    if let Some(path) = &rules_file {
        info!("Using rules file {:?}", path);
    }

    let patterns = collect_patterns(file_content.as_deref(), cfg.extra_patterns.as_deref());
    let (matcher, skipped) = compile(&cfg.source, &patterns)?;
    Ok(RuleSet {
        matcher,
        rules_file,
        skipped,
    })
}
