//! # zipdir Filtering Module (`common::filter`)
//!
//! File: cli/src/common/filter/mod.rs
//!
//! ## Overview
//!
//! Decides which paths are left out of the archive.
//!
//! - **`rules`**: Collects patterns from `.zipignore` and `--ignore` and
//!   compiles them into a gitignore-style `Matcher`.
//!

pub mod rules;
