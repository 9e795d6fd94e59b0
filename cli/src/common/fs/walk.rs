//! # zipdir Tree Walker (`common::fs::walk`)
//!
//! File: cli/src/common/fs/walk.rs
//!
//! ## Overview
//!
//! This module walks the source directory and produces the ordered list of
//! files that will be archived. Every entry below the root is checked against
//! the compiled `Matcher` using its forward-slash path relative to the root:
//!
//! | Entry      | Matches rules              | Does not match      |
//! |------------|----------------------------|---------------------|
//! | directory  | pruned, never descended    | descended, not kept |
//! | file       | skipped                    | kept                |
//!
//! Siblings are visited in file-name order, so the result is deterministic for
//! a given filesystem snapshot. Symbolic links are not followed while walking;
//! a link is kept like a file and read through when archived.
//!
//! Any error while listing or inspecting an entry aborts the walk. A partial
//! list is never returned.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::walk;
//!
//! let files = walk::collect_files(Path::new("./project"), &rules.matcher)?;
//! for file in &files {
//!     println!("{}", file.name());
//! }
//! ```
//!
use crate::common::filter::rules::Matcher;
use crate::core::config::to_slash_path;
use crate::core::error::{Result, ZipdirError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// A file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Native path relative to the source root, used to open the file.
    relative: PathBuf,
    /// Forward-slash form of `relative`, used as the archive entry name.
    name: String,
}

impl FileEntry {
    pub fn new(relative: PathBuf) -> Self {
        let name = to_slash_path(&relative);
        Self { relative, name }
    }

    /// Archive entry name, e.g. `sub/c.txt`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the file on disk under `root`.
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(&self.relative)
    }
}

/// # Collect Files (`collect_files`)
///
/// Recursively walks `root` and returns every file not excluded by `matcher`,
/// in traversal order.
///
/// ## Errors
///
/// Returns `ZipdirError::Walk` for the first entry that cannot be listed or
/// inspected (missing root, permission denied on a subdirectory, ...).
pub fn collect_files(root: &Path, matcher: &Matcher) -> Result<Vec<FileEntry>> {
    let mut files = Vec::new();
    let mut pruned = 0usize;
    let mut skipped = 0usize;

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let entry = next.map_err(|source| ZipdirError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        // Entries always live under `root`; only the root itself strips to "".
        let relative = match entry.path().strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => continue,
        };
        let is_dir = entry.file_type().is_dir();
        let file = FileEntry::new(relative);

        if matcher.is_match(file.name(), is_dir) {
            if is_dir {
                debug!("Pruning ignored directory: {}", file.name());
                walker.skip_current_dir();
                pruned += 1;
            } else {
                debug!("Skipping ignored file: {}", file.name());
                skipped += 1;
            }
            continue;
        }

        if !is_dir {
            files.push(file);
        }
    }

    info!(
        "Collected {} file(s) from {:?} ({} ignored, {} director(ies) pruned).",
        files.len(),
        root,
        skipped,
        pruned
    );
    Ok(files)
}
