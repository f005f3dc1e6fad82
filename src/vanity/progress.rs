//! Advisory progress reporting.
//!
//! Workers report the shared evaluation counter through a sink trait so the
//! search core stays silent in tests and library use. Reporting carries no
//! correctness obligation: the counter is relaxed and lost updates under
//! contention are acceptable.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Receives periodic evaluation counts from search workers.
///
/// Implementations must be `Sync`; multiple workers call concurrently.
pub trait ProgressSink: Sync {
    /// Called roughly every few thousand evaluations with the shared total.
    fn evaluated(&self, total: u64);
}

/// Writes a carriage-return progress line, kilohashes like the classic
/// miners report.
///
/// The line is redrawn in place; callers must invoke [`finish`] after the
/// search returns so later output does not render on top of a stale line.
///
/// [`finish`]: LineProgress::finish
pub struct LineProgress<W: Write + Send> {
    out: Mutex<W>,
    dirty: AtomicBool,
}

impl<W: Write + Send> LineProgress<W> {
    /// Reports to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            dirty: AtomicBool::new(false),
        }
    }

    /// Terminates the in-place line with a newline, once, if any progress
    /// was written.
    pub fn finish(&self) {
        if self.dirty.swap(false, Ordering::Relaxed) {
            let mut out = self.lock();
            let _ = writeln!(out);
            let _ = out.flush();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl<W: Write + Send> ProgressSink for LineProgress<W> {
    fn evaluated(&self, total: u64) {
        self.dirty.store(true, Ordering::Relaxed);
        let mut out = self.lock();
        // Progress is best-effort; a closed stream must not kill a worker.
        let _ = write!(out, "khash: {}\r", total / 1000);
        let _ = out.flush();
    }
}

/// Stderr-backed progress line, the CLI default.
pub type StderrProgress = LineProgress<io::Stderr>;

impl LineProgress<io::Stderr> {
    /// Reports to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

/// Discards all progress. Default for library callers and tests.
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn evaluated(&self, _total: u64) {}
}
