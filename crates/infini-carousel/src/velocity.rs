//! Release-velocity estimation from a short window of pointer samples.

use std::collections::VecDeque;

/// Samples older than this, relative to the release, are ignored.
pub const HORIZON_MS: f64 = 100.0;

/// A pointer that has not moved for this long is treated as stopped.
pub const ASSUME_STOPPED_MS: f64 = 40.0;

/// One pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub t_ms: f64,
}

/// Rolling window of the most recent pointer samples.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl VelocityTracker {
    /// A tracker keeping at most `capacity` samples (at least two).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample, evicting the oldest once full.
    pub fn push(&mut self, x: f64, t_ms: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { x, t_ms });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cursor velocity in px/ms at `now_ms`, from the oldest sample inside
    /// [`HORIZON_MS`] to the newest.
    ///
    /// Zero when the newest sample is more than [`ASSUME_STOPPED_MS`] old,
    /// with fewer than two usable samples, or a non-positive time span.
    pub fn velocity(&self, now_ms: f64) -> f64 {
        let Some(last) = self.samples.back() else {
            return 0.0;
        };
        if now_ms - last.t_ms > ASSUME_STOPPED_MS {
            return 0.0;
        }
        let Some(first) = self.samples.iter().find(|s| now_ms - s.t_ms <= HORIZON_MS) else {
            return 0.0;
        };
        let dt = last.t_ms - first.t_ms;
        if dt <= 0.0 {
            return 0.0;
        }
        (last.x - first.x) / dt
    }
}
