//! Download progress (bytes done, elapsed, rate).
//!
//! The fetcher reports every received chunk; [`ProgressTracker`] turns that
//! into a snapshot roughly every `interval` bytes so callers see a steady
//! trickle of events instead of one per chunk.

use std::time::Instant;

/// Default spacing between progress events.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10 * 1024;

/// Snapshot of download progress.
#[derive(Debug, Clone)]
pub struct ProgressStats {
    /// Bytes received so far.
    pub bytes_done: u64,
    /// Elapsed time since download start (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }
}

/// Byte accumulator that yields a snapshot each time another `interval` bytes arrived.
#[derive(Debug)]
pub struct ProgressTracker {
    interval: u64,
    bytes_done: u64,
    last_mark: u64,
    started: Instant,
}

impl ProgressTracker {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            bytes_done: 0,
            last_mark: 0,
            started: Instant::now(),
        }
    }

    /// Record `n` more bytes; returns a snapshot when the interval was crossed.
    pub fn advance(&mut self, n: u64) -> Option<ProgressStats> {
        self.bytes_done = self.bytes_done.saturating_add(n);
        if self.bytes_done - self.last_mark < self.interval {
            return None;
        }
        self.last_mark = self.bytes_done;
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> ProgressStats {
        ProgressStats {
            bytes_done: self.bytes_done,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        }
    }
}
