//! # zipdir Run Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module turns the raw command-line values into a validated `RunConfig`
//! that the rest of the pipeline consumes. zipdir has no configuration files of
//! its own; everything a run needs comes from:
//!
//! 1. The positional source directory (required).
//! 2. The optional positional destination path. When omitted, the destination
//!    defaults to `<source-folder-name>.zip` in the current directory.
//! 3. The optional `--ignore` pattern text.
//! 4. Conventions baked in as constants (`.zipignore`, the `zip` extension).
//!
//! Leading `~` in the path arguments is expanded so quoted arguments behave
//! the same as unquoted ones.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::resolve_run_config(Path::new("../project"), None, Some("target,dist".into()))?;
//! assert_eq!(cfg.destination, PathBuf::from("project.zip"));
//! assert!(cfg.destination_defaulted);
//! ```
//!
use crate::core::error::{Result, ZipdirError};
use anyhow::Context;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Name of the rules file looked up at the root of the source directory.
pub const RULES_FILENAME: &str = ".zipignore";

/// Extension of the produced archive (without the dot).
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Stem used when the source directory has no usable name (e.g. `/`).
const FALLBACK_ARCHIVE_STEM: &str = "archive";

/// Fully resolved settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory whose contents are archived.
    pub source: PathBuf,
    /// Archive file to create (truncated if it exists).
    pub destination: PathBuf,
    /// `true` when `destination` was derived rather than supplied.
    pub destination_defaulted: bool,
    /// Raw comma-separated patterns from `--ignore`, if any.
    pub extra_patterns: Option<String>,
}

impl RunConfig {
    /// Location of the project rules file inside the source directory.
    pub fn rules_file(&self) -> PathBuf {
        self.source.join(RULES_FILENAME)
    }

    /// Returns the destination's path relative to the source directory, in
    /// forward-slash form, when the archive would be written inside the tree
    /// being archived.
    ///
    /// Both paths are canonicalised first. The destination usually does not
    /// exist yet, so its parent directory is canonicalised and the file name
    /// re-attached. Returns `None` when the destination lies elsewhere or when
    /// either side cannot be resolved.
    pub fn destination_within_source(&self) -> Option<String> {
        let root = self.source.canonicalize().ok()?;
        let file_name = self.destination.file_name()?;
        let parent = match self.destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let dest = parent.canonicalize().ok()?.join(file_name);
        let relative = dest.strip_prefix(&root).ok()?;
        Some(to_slash_path(relative))
    }
}

/// # Resolve Run Configuration (`resolve_run_config`)
///
/// Validates the source directory and settles the destination path.
///
/// ## Errors
///
/// Returns `ZipdirError::InvalidSource` if the (expanded) source path does not
/// exist or is not a directory.
pub fn resolve_run_config(
    source: &Path,
    destination: Option<&Path>,
    extra_patterns: Option<String>,
) -> Result<RunConfig> {
    let source = expand_home(source);
    if !source.is_dir() {
        anyhow::bail!(ZipdirError::InvalidSource { path: source });
    }

    let (destination, destination_defaulted) = match destination {
        Some(dest) => (expand_home(dest), false),
        None => (
            default_destination(&source)
                .with_context(|| format!("Failed to derive archive name for {:?}", source))?,
            true,
        ),
    };

    let cfg = RunConfig {
        source,
        destination,
        destination_defaulted,
        extra_patterns,
    };
    debug!("Resolved run configuration: {:?}", cfg);
    Ok(cfg)
}

/// Derives `<base-name>.zip` from the source directory.
///
/// Paths without a final name component (`.`, `..`, `dir/..`) are
/// canonicalised to find the real directory name. A source with no name at
/// all (the filesystem root) falls back to `archive.zip`.
pub fn default_destination(source: &Path) -> Result<PathBuf> {
    let name = match source.file_name() {
        Some(name) => name.to_os_string(),
        None => {
            let canonical = source
                .canonicalize()
                .with_context(|| format!("Failed to resolve {:?}", source))?;
            canonical
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| FALLBACK_ARCHIVE_STEM.into())
        }
    };
    let mut file_name = name;
    file_name.push(".");
    file_name.push(ARCHIVE_EXTENSION);
    Ok(PathBuf::from(file_name))
}

/// Joins the normal components of `path` with `/`, whatever the host separator.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Expands a leading `~` using the user's home directory. Non-UTF-8 paths are
/// returned untouched.
fn expand_home(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}
