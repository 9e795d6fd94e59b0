//! # zipdir UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal-facing helpers.
//!
//! - **`progress`**: The `ProgressSink` trait used by the archive writer, with an
//!   `indicatif` progress bar implementation and quiet/counting sinks.
//!

pub mod progress;
