//! # zipdir Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem-facing pieces of the pipeline. Currently this is the tree walker:
//!
//! - **`walk`**: Recursively walks the source directory, applies the ignore
//!   matcher (pruning ignored directories), and returns the ordered list of
//!   `FileEntry` values to archive.
//!
//! ```rust
//! use crate::common::fs::walk;
//!
//! let files = walk::collect_files(&cfg.source, &rules.matcher)?;
//! ```
//!

/// Directory traversal producing the files to archive (`collect_files`, `FileEntry`).
pub mod walk;
