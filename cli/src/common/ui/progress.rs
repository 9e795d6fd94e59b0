//! # zipdir Progress Reporting (`common::ui::progress`)
//!
//! File: cli/src/common/ui/progress.rs
//!
//! ## Overview
//!
//! The archive writer reports progress through the `ProgressSink` trait instead
//! of touching the terminal directly. This keeps the writer testable and lets
//! the caller decide how (or whether) progress is shown:
//!
//! - `TerminalProgress`: an `indicatif` progress bar on stderr. It hides itself
//!   automatically when stderr is not a terminal.
//! - `SilentProgress` and `CountingProgress` (test builds): discard or record
//!   the calls.
//!
//! The counter only advances for entries that were written completely.
//!
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Receives progress events from the archive writer.
pub trait ProgressSink {
    /// Called once, before the first entry, with the number of entries to write.
    fn begin(&mut self, total: u64);
    /// Called after an entry has been fully written.
    fn advance(&mut self, entry_name: &str);
    /// Called once, after the last entry has been processed.
    fn finish(&mut self);
}

/// Progress bar shown while the archive is written.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn begin(&mut self, total: u64) {
        let bar = ProgressBar::new(total);
        match ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
        {
            Ok(style) => bar.set_style(style.progress_chars("=> ")),
            Err(e) => debug!("Falling back to the default progress style: {}", e),
        }
        self.bar = Some(bar);
    }

    fn advance(&mut self, entry_name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(entry_name.to_string());
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// A sink that ignores all events.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct SilentProgress;

#[cfg(test)]
impl ProgressSink for SilentProgress {
    fn begin(&mut self, _total: u64) {}
    fn advance(&mut self, _entry_name: &str) {}
    fn finish(&mut self) {}
}

/// A sink that remembers what it was told.
#[cfg(test)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CountingProgress {
    pub total: u64,
    pub completed: u64,
    pub finished: bool,
    pub advanced: Vec<String>,
}

#[cfg(test)]
impl ProgressSink for CountingProgress {
    fn begin(&mut self, total: u64) {
        self.total = total;
    }

    fn advance(&mut self, entry_name: &str) {
        self.completed += 1;
        self.advanced.push(entry_name.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_progress_records_events() {
        let mut sink = CountingProgress::default();
        sink.begin(3);
        sink.advance("a.txt");
        sink.advance("sub/c.txt");
        sink.finish();
        assert_eq!(sink.total, 3);
        assert_eq!(sink.completed, 2);
        assert_eq!(sink.advanced, vec!["a.txt", "sub/c.txt"]);
        assert!(sink.finished);
    }

    #[test]
    fn test_terminal_progress_tolerates_any_call_order() {
        let mut sink = TerminalProgress::new();
        sink.advance("before-begin.txt");
        sink.begin(1);
        sink.advance("a.txt");
        sink.finish();
        sink.finish();
    }
}
