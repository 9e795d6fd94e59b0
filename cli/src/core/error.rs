//! # zipdir Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout zipdir. A run can fail
//! in two very different ways, and the types mirror that split:
//!
//! - `ZipdirError`: **fatal** failures that abort the whole run (the source
//!   directory cannot be walked, the destination archive cannot be created or
//!   finalised, the rule set cannot be built).
//! - `EntryFailure`: **recoverable** failures tied to a single file (it could
//!   not be opened, its archive entry could not be started, or its bytes could
//!   not be streamed). These are collected per file and never abort the run.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible propagation
//!   with context.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific fatal error
//! if !source.is_dir() {
//!     return Err(ZipdirError::InvalidSource { path: source.to_path_buf() })?;
//! }
//!
//! // Check what kind of failure aborted the run
//! match result {
//!     Err(e) if e.downcast_ref::<ZipdirError>().map_or(false, |ze| matches!(ze, ZipdirError::Walk { .. })) => {
//!         eprintln!("Could not scan the source directory");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Fatal, run-aborting errors.
#[derive(Error, Debug)]
pub enum ZipdirError {
    #[error("Source '{}' does not exist or is not a directory.", path.display())]
    InvalidSource { path: PathBuf },

    #[error("Failed to scan '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to create archive '{}': {source}", path.display())]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finalize archive '{}': {source}", path.display())]
    FinishArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to build ignore rules: {source}")]
    Rules {
        #[from]
        source: ignore::Error,
    },
}

/// Why a single file could not be written into the archive.
///
/// Each variant corresponds to one step of the per-file pipeline; the file is
/// skipped and the run continues with the next one.
#[derive(Error, Debug)]
pub enum EntryFailure {
    #[error("cannot open source file: {0}")]
    Open(#[source] std::io::Error),

    #[error("cannot create archive entry: {0}")]
    CreateEntry(#[source] zip::result::ZipError),

    #[error("failed while writing entry data: {0}")]
    Stream(#[source] std::io::Error),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let invalid = ZipdirError::InvalidSource {
            path: PathBuf::from("missing/dir"),
        };
        assert_eq!(
            invalid.to_string(),
            "Source 'missing/dir' does not exist or is not a directory."
        );

        let create = ZipdirError::CreateArchive {
            path: PathBuf::from("out.zip"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            create.to_string(),
            "Failed to create archive 'out.zip': denied"
        );
    }

    #[test]
    fn test_entry_failure_display_names_the_step() {
        let open = EntryFailure::Open(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(open.to_string(), "cannot open source file: gone");

        let stream = EntryFailure::Stream(io::Error::new(io::ErrorKind::Other, "short read"));
        assert!(stream.to_string().starts_with("failed while writing entry data"));
    }
}
