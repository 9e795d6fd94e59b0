//! # zipdir Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command handlers that `main.rs` dispatches to.
//! zipdir has a single operation, so there is one module:
//!
//! - `pack`: Compile the ignore rules, walk the source directory and write the
//!   selected files into a ZIP archive.
//!

/// The archival run: arguments, pipeline orchestration and reporting.
pub mod pack;
