//! # zipdir Archive Writer (`common::archive::writer`)
//!
//! File: cli/src/common/archive/writer.rs
//!
//! ## Overview
//!
//! This module streams the files chosen by the tree walker into a ZIP archive.
//!
//! ## Architecture
//!
//! The module leverages the `zip` crate's `ZipWriter` over a buffered file.
//!
//! - The destination is created (or truncated) once. Failing to do so is fatal.
//! - Each file is handled in three steps: open the source, start an entry named
//!   after its relative path, copy its bytes. A failure in any step is recorded
//!   as that file's outcome and the writer moves on to the next file. An entry
//!   whose copy fails part-way is discarded from the archive.
//! - Entries are written in the order given, Deflate-compressed.
//! - The central directory is written exactly once, after every file has been
//!   attempted, no matter how many failed.
//!
//! The caller receives an `ArchiveReport` holding one `FileOutcome` per input
//! file and decides how to present successes and failures.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::writer;
//! use crate::common::ui::progress::TerminalProgress;
//!
//! let report = writer::write_archive(root, &files, Path::new("project.zip"), &mut TerminalProgress::new())?;
//! println!("{} written, {} failed", report.succeeded(), report.failed());
//! ```
//!
use crate::common::fs::walk::FileEntry;
use crate::common::ui::progress::ProgressSink;
use crate::core::error::{EntryFailure, Result, ZipdirError};
use std::fs::File;
use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Files at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// What happened to one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub entry: FileEntry,
    /// Bytes copied on success.
    pub result: std::result::Result<u64, EntryFailure>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of writing the archive: one outcome per input file, in input order.
#[derive(Debug)]
pub struct ArchiveReport {
    pub destination: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl ArchiveReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Failed files with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&FileEntry, &EntryFailure)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.entry, e)))
    }

    pub fn bytes_written(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .sum()
    }
}

/// # Write Archive (`write_archive`)
///
/// Creates `destination` and writes every file of `files` (relative to `root`)
/// into it as a ZIP entry.
///
/// ## Errors
///
/// - `ZipdirError::CreateArchive` if the destination cannot be created.
/// - `ZipdirError::FinishArchive` if the central directory cannot be written.
///
/// Per-file problems are never returned as errors; see `ArchiveReport`.
pub fn write_archive(
    root: &Path,
    files: &[FileEntry],
    destination: &Path,
    progress: &mut dyn ProgressSink,
) -> Result<ArchiveReport> {
    let file = File::create(destination).map_err(|source| ZipdirError::CreateArchive {
        path: destination.to_path_buf(),
        source,
    })?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    info!("Writing {} entries to {:?}", files.len(), destination);

    let outcomes = append_all(&mut zip, root, files, progress);

    let finish_err = |source| ZipdirError::FinishArchive {
        path: destination.to_path_buf(),
        source,
    };
    let mut inner = zip.finish().map_err(finish_err)?;
    inner
        .flush()
        .map_err(|e| finish_err(zip::result::ZipError::Io(e)))?;

    let report = ArchiveReport {
        destination: destination.to_path_buf(),
        outcomes,
    };
    info!(
        "Archive {:?} finished: {} written, {} failed, {} bytes.",
        destination,
        report.succeeded(),
        report.failed(),
        report.bytes_written()
    );
    Ok(report)
}

/// Appends every file in order, collecting one outcome per file.
fn append_all<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    root: &Path,
    files: &[FileEntry],
    progress: &mut dyn ProgressSink,
) -> Vec<FileOutcome> {
    progress.begin(files.len() as u64);
    let mut outcomes = Vec::with_capacity(files.len());

    for entry in files {
        let result = append_file(zip, &entry.source_path(root), entry.name());
        match &result {
            Ok(bytes) => {
                debug!("Added {} ({} bytes)", entry.name(), bytes);
                progress.advance(entry.name());
            }
            Err(e) => warn!("Failed to add {}: {}", entry.name(), e),
        }
        outcomes.push(FileOutcome {
            entry: entry.clone(),
            result,
        });
    }

    progress.finish();
    outcomes
}

/// Opens `source`, starts an entry called `name`, and streams the bytes in.
fn append_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    source: &Path,
    name: &str,
) -> std::result::Result<u64, EntryFailure> {
    let mut input = File::open(source).map_err(EntryFailure::Open)?;
    let size = input.metadata().map(|m| m.len()).unwrap_or(0);

    let options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644)
        .large_file(size >= ZIP64_THRESHOLD);
    zip.start_file(name, options)
        .map_err(EntryFailure::CreateEntry)?;

    match io::copy(&mut input, zip) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            // Drop the half-written entry so the archive only holds complete files.
            if let Err(abort) = zip.abort_file() {
                warn!("Could not discard partial entry {}: {}", name, abort);
            }
            Err(EntryFailure::Stream(e))
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ui::progress::CountingProgress;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;
    use zip::ZipArchive;

    fn entries(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|n| FileEntry::new(n.split('/').collect()))
            .collect()
    }

    /// Reads an archive back as `(name, content)` pairs in entry order.
    fn read_back(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut f = archive.by_index(i).unwrap();
                let mut data = Vec::new();
                f.read_to_end(&mut data).unwrap();
                (f.name().to_string(), data)
            })
            .collect()
    }

    #[test]
    fn test_write_archive_preserves_order_and_content() -> Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("a.txt"), "alpha")?;
        fs::create_dir(src.path().join("sub"))?;
        fs::write(src.path().join("sub/c.txt"), "gamma")?;
        let binary: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        fs::write(src.path().join("sub/blob.bin"), &binary)?;

        let dest = out.path().join("out.zip");
        let files = entries(&["sub/blob.bin", "a.txt", "sub/c.txt"]);
        let mut progress = CountingProgress::default();
        let report = write_archive(src.path(), &files, &dest, &mut progress)?;

        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.completed, 3);
        assert!(progress.finished);

        let contents = read_back(&dest);
        let names: Vec<&str> = contents.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["sub/blob.bin", "a.txt", "sub/c.txt"]);
        assert_eq!(contents[0].1, binary);
        assert_eq!(contents[1].1, b"alpha");
        assert_eq!(contents[2].1, b"gamma");
        Ok(())
    }

    #[test]
    fn test_missing_source_file_is_isolated() -> Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("one.txt"), "1")?;
        fs::write(src.path().join("three.txt"), "3")?;

        let dest = out.path().join("out.zip");
        let files = entries(&["one.txt", "two.txt", "three.txt"]);
        let mut progress = CountingProgress::default();
        let report = write_archive(src.path(), &files, &dest, &mut progress)?;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(progress.completed, 2);
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures[0].0.name(), "two.txt");
        assert!(matches!(failures[0].1, EntryFailure::Open(_)));

        let names: Vec<String> = read_back(&dest).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["one.txt", "three.txt"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_is_dropped_and_run_continues() -> Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("a.txt"), "a")?;
        fs::create_dir(src.path().join("realdir"))?;
        fs::write(src.path().join("realdir/x.txt"), "x")?;
        // Opening a link to a directory succeeds, reading it fails.
        std::os::unix::fs::symlink(src.path().join("realdir"), src.path().join("link"))?;
        fs::write(src.path().join("z.txt"), "z")?;

        let dest = out.path().join("out.zip");
        let files = entries(&["a.txt", "link", "realdir/x.txt", "z.txt"]);
        let mut progress = CountingProgress::default();
        let report = write_archive(src.path(), &files, &dest, &mut progress)?;

        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 1);
        assert_eq!(progress.completed, 3);
        assert!(!progress.advanced.contains(&"link".to_string()));
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures[0].0.name(), "link");
        assert!(matches!(failures[0].1, EntryFailure::Stream(_)));

        assert_eq!(
            read_back(&dest),
            vec![
                ("a.txt".to_string(), b"a".to_vec()),
                ("realdir/x.txt".to_string(), b"x".to_vec()),
                ("z.txt".to_string(), b"z".to_vec()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_all_failures_still_produce_archive() -> Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        let dest = out.path().join("out.zip");
        let report = write_archive(
            src.path(),
            &entries(&["gone-1", "gone-2"]),
            &dest,
            &mut CountingProgress::default(),
        )?;
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 2);
        assert!(read_back(&dest).is_empty());
        Ok(())
    }

    #[test]
    fn test_existing_destination_is_truncated() -> Result<()> {
        let src = tempdir()?;
        let out = tempdir()?;
        fs::write(src.path().join("x.txt"), "x")?;
        let dest = out.path().join("out.zip");
        fs::write(&dest, vec![b'!'; 64 * 1024])?;

        write_archive(src.path(), &entries(&["x.txt"]), &dest, &mut CountingProgress::default())?;
        assert_eq!(read_back(&dest), vec![("x.txt".to_string(), b"x".to_vec())]);
        Ok(())
    }

    #[test]
    fn test_uncreatable_destination_is_fatal() {
        let src = tempdir().unwrap();
        let dest = src.path().join("no/such/dir/out.zip");
        let err = write_archive(src.path(), &[], &dest, &mut CountingProgress::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ZipdirError>(),
            Some(ZipdirError::CreateArchive { .. })
        ));
    }
}
