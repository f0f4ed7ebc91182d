//! Per-invocation progress tracking for chunked transcription.
//!
//! One `ProgressState` is owned by a single pipeline invocation; the count of
//! resolved segments only ever goes up, so no rollback handling is needed.

use std::time::{Duration, Instant};

/// Mutable progress counter for one transcription run.
#[derive(Debug)]
pub struct ProgressState {
    done: usize,
    total: usize,
    started_at: Instant,
}

impl ProgressState {
    pub fn new(total: usize) -> Self {
        ProgressState {
            done: 0,
            total,
            started_at: Instant::now(),
        }
    }

    /// Record one resolved segment and return a snapshot for the caller's
    /// progress sink.
    pub fn record_done(&mut self) -> ProgressUpdate {
        self.done += 1;
        self.snapshot()
    }

    pub fn snapshot(&self) -> ProgressUpdate {
        let elapsed = self.started_at.elapsed();
        ProgressUpdate {
            done: self.done,
            total: self.total,
            elapsed,
            eta: estimate_eta(self.done, self.total, elapsed),
        }
    }
}

/// Immutable snapshot handed to the progress callback after each segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub done: usize,
    pub total: usize,
    pub elapsed: Duration,
    /// Estimated remaining time. `None` until at least one segment has
    /// resolved; there is nothing to extrapolate from before that.
    pub eta: Option<Duration>,
}

impl ProgressUpdate {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64 * 100.0
    }
}

/// ETA = elapsed / done * (total - done), unavailable at done == 0.
fn estimate_eta(done: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    if done == 0 {
        return None;
    }
    let remaining = total.saturating_sub(done);
    Some(elapsed / done as u32 * remaining as u32)
}

/// Render a duration as "3m 12s" (or "42s" under a minute) for status lines.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let minutes = total_secs / 60;
    let secs = total_secs % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
