//! Progress tracking utilities
//!
//! A small thread-safe counter that logs a message each time the count crosses a multiple of a
//! fixed interval.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::format_count;

/// Thread-safe progress tracker for logging progress at regular intervals.
///
/// # Example
/// ```
/// use umi_collapse_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Loaded records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs "Loaded records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: AtomicU64,
}

impl ProgressTracker {
    /// Create a new tracker with a default interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Set the logging interval. An interval of zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add `additional` to the count, logging once for every interval boundary crossed.
    ///
    /// Returns true if the new count sits exactly on an interval boundary.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let now = prev + additional;
        for milestone in (prev / self.interval + 1)..=(now / self.interval) {
            info!("{} {}", self.message, format_count(milestone * self.interval));
        }
        now > 0 && now % self.interval == 0
    }

    /// Log the final count unless it was already logged as a milestone.
    pub fn log_final(&self) {
        let count = self.count();
        if count % self.interval != 0 || count == 0 {
            info!("{} {} (complete)", self.message, format_count(count));
        }
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
