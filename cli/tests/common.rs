//! # zipdir CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: locating the
//! compiled binary, building sample source trees and reading archives back.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::io::Read;
use std::path::Path;

/// # Get zipdir Command (`zipdir_cmd`)
///
/// Creates an `assert_cmd::Command` for the `zipdir` binary built for this test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn zipdir_cmd() -> Command {
    Command::cargo_bin("zipdir").expect("Failed to find zipdir binary for testing")
}

/// Creates `a.txt`, `b.log`, `sub/c.txt` and `sub/d.log` under `root`.
pub fn write_sample_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).expect("Failed to create sample tree");
    fs::write(root.join("a.txt"), "alpha").expect("Failed to write a.txt");
    fs::write(root.join("b.log"), "beta").expect("Failed to write b.log");
    fs::write(root.join("sub/c.txt"), "gamma").expect("Failed to write sub/c.txt");
    fs::write(root.join("sub/d.log"), "delta").expect("Failed to write sub/d.log");
}

/// Returns the archive's `(entry name, content)` pairs in entry order.
pub fn read_archive(path: &Path) -> Vec<(String, String)> {
    let file = fs::File::open(path).expect("Archive should exist");
    let mut archive = zip::ZipArchive::new(file).expect("Archive should be a valid zip");
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).expect("Entry should be readable");
            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .expect("Entry content should be UTF-8");
            (entry.name().to_string(), content)
        })
        .collect()
}

/// Returns only the entry names of an archive, in order.
pub fn archive_names(path: &Path) -> Vec<String> {
    read_archive(path).into_iter().map(|(name, _)| name).collect()
}
