//! Run reporting.
//!
//! Per-record skips and the end-of-run summary are surfaced through the
//! [`RunObserver`] trait; the CLI installs [`StdErrObserver`] so diagnostics
//! never mix with data on stdout.

use std::fmt;
use std::sync::Arc;

use crate::error::ProjectError;
use crate::pipeline::RunSummary;

/// Observer interface for pipeline outcomes.
pub trait RunObserver: Send + Sync {
    /// Called for each record skipped with a recoverable error.
    fn on_skip(&self, _row: usize, _error: &ProjectError) {}

    /// Called once after the last record, with the final summary.
    fn on_complete(&self, _summary: &RunSummary) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn RunObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn RunObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl RunObserver for CompositeObserver {
    fn on_skip(&self, row: usize, error: &ProjectError) {
        for o in &self.observers {
            o.on_skip(row, error);
        }
    }

    fn on_complete(&self, summary: &RunSummary) {
        for o in &self.observers {
            o.on_complete(summary);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl RunObserver for StdErrObserver {
    fn on_skip(&self, row: usize, error: &ProjectError) {
        eprintln!("[project][skip] row={row} err={error}");
    }

    fn on_complete(&self, summary: &RunSummary) {
        eprintln!(
            "[project][done] written={} skipped={}",
            summary.written,
            summary.skipped.len()
        );
    }
}
