//! # zipdir Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the foundational pieces shared by every stage of
//! the archival pipeline:
//! - `config`: Resolution of the run configuration and conventional names
//! - `error`: Fatal and per-entry error types, plus the `Result` alias
//!
//! ```rust
//! use crate::core::config; // For resolving the run configuration
//! use crate::core::error::{Result, ZipdirError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
