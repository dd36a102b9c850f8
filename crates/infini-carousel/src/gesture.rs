//! Pointer drag tracking with direction lock.

use crate::velocity::VelocityTracker;

/// Axis a gesture has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// What a pointer move did to the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Not yet classified, or horizontal but still inside the tap threshold.
    Holding,
    /// Classified vertical; the carousel must let native scrolling take over.
    Abandoned,
    /// Horizontal drag past the threshold; the new scroll offset.
    Scrolled(f64),
}

/// Thresholds governing classification.
#[derive(Debug, Clone, Copy)]
pub struct DragThresholds {
    /// Movement on either axis that triggers classification.
    pub lock_px: f64,
    /// Horizontal movement at or below which the gesture is a tap.
    pub move_px: f64,
}

/// One press-move-release gesture.
#[derive(Debug, Clone)]
pub struct DragGesture {
    start_x: f64,
    start_y: f64,
    start_offset: f64,
    axis: Option<Axis>,
    moved: bool,
    tracker: VelocityTracker,
}

impl DragGesture {
    /// Start a gesture at `(x, y)` with the ring at `start_offset`.
    pub fn begin(x: f64, y: f64, t_ms: f64, start_offset: f64, window: usize) -> Self {
        let mut tracker = VelocityTracker::new(window);
        tracker.push(x, t_ms);
        Self {
            start_x: x,
            start_y: y,
            start_offset,
            axis: None,
            moved: false,
            tracker,
        }
    }

    /// Feed a pointer move.
    ///
    /// Once classified, the axis never changes for this gesture.
    pub fn update(&mut self, x: f64, y: f64, t_ms: f64, th: DragThresholds) -> DragUpdate {
        let dx = x - self.start_x;
        let dy = y - self.start_y;

        if self.axis.is_none() && (dx.abs() > th.lock_px || dy.abs() > th.lock_px) {
            self.axis = Some(if dx.abs() > dy.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            });
        }

        match self.axis {
            None => DragUpdate::Holding,
            Some(Axis::Vertical) => DragUpdate::Abandoned,
            Some(Axis::Horizontal) => {
                self.tracker.push(x, t_ms);
                if self.moved || dx.abs() > th.move_px {
                    self.moved = true;
                    DragUpdate::Scrolled(self.start_offset - dx)
                } else {
                    DragUpdate::Holding
                }
            }
        }
    }

    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    /// Whether the gesture ever left the tap threshold.
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Cursor velocity for a release at `now_ms`, px/ms. Zero if the
    /// pointer sat still before letting go.
    pub fn release_velocity(&self, now_ms: f64) -> f64 {
        self.tracker.velocity(now_ms)
    }
}
