//! # zipdir Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the organizational entry point for the building blocks of the
//! archival pipeline. The `commands` layer wires them together; `core` holds
//! configuration and errors.
//!
//! ## Architecture
//!
//! - **`filter`**: Ignore-rule collection and compilation.
//! - **`fs`**: Directory traversal producing the list of files to archive.
//! - **`archive`**: Writing the selected files into a ZIP archive.
//! - **`ui`**: Progress reporting.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, filter, fs, ui};
//!
//! let rules = filter::rules::load_rules(&cfg)?;
//! let files = fs::walk::collect_files(&cfg.source, &rules.matcher)?;
//! let mut progress = ui::progress::TerminalProgress::new();
//! let report = archive::writer::write_archive(&cfg.source, &files, &cfg.destination, &mut progress)?;
//! ```
//!

/// Writing ZIP archives.
pub mod archive;
/// Ignore rules and the compiled matcher.
pub mod filter;
/// Directory traversal.
pub mod fs;
/// Terminal progress reporting.
pub mod ui;
