//! # zipdir Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module groups the archive-producing side of zipdir.
//!
//! - **`writer`**: Streams the selected files into a ZIP archive, one entry per
//!   file, and reports a per-file outcome for each of them.
//!
//! ```rust
//! use crate::common::archive::writer;
//!
//! let report = writer::write_archive(&cfg.source, &files, &cfg.destination, &mut progress)?;
//! ```
//!

pub mod writer;
