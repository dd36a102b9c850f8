//! Animation primitives: easing functions and the offset tween.

use infini_types::host::AnimationId;

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f64) -> f64 {
        t.clamp(0.0, 1.0)
    }

    /// Cubic ease-out: `1 - (1 - t)^3`.
    pub fn ease_out_cubic(t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        1.0 - inv * inv * inv
    }
}

/// A time-based interpolation of the scroll offset.
///
/// Unlike a frame-counting tween, progress comes from wall-clock
/// timestamps, so dropped frames do not slow the animation down.
#[derive(Debug, Clone)]
pub struct Tween {
    /// Token this tween was started under.
    pub id: AnimationId,
    /// Offset at animation start.
    pub from: f64,
    /// Target offset.
    pub to: f64,
    /// Timestamp the animation started at, in ms.
    pub start_ms: f64,
    /// Total duration in ms.
    pub duration_ms: f64,
    easing: fn(f64) -> f64,
}

impl Tween {
    /// Create a new tween starting at `start_ms`.
    pub fn new(
        id: AnimationId,
        from: f64,
        to: f64,
        start_ms: f64,
        duration_ms: f64,
        easing: fn(f64) -> f64,
    ) -> Self {
        Self {
            id,
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    /// Linear progress in `[0, 1]` at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now_ms`. Exactly `to` once finished.
    pub fn sample(&self, now_ms: f64) -> f64 {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * (self.easing)(p)
    }

    /// Whether the tween has reached its target at `now_ms`.
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

/// Issues animation ids and remembers which one is live.
#[derive(Debug, Default)]
pub struct AnimationClock {
    current: AnimationId,
}

impl AnimationClock {
    /// Invalidate every outstanding id and return a fresh one.
    pub fn advance(&mut self) -> AnimationId {
        self.current = self.current.next();
        self.current
    }

    /// Whether `id` is still the live token.
    pub fn is_current(&self, id: AnimationId) -> bool {
        self.current == id
    }
}
