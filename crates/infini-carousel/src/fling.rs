//! Release decision: snap in place or project a fling.

use infini_types::config::CarouselConfig;

use crate::layout::RingLayout;
use crate::snap::{self, SnapTarget};

/// Kinematic parameters for release handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingParams {
    /// Cursor speed (px/ms) at or below which no travel is projected.
    pub threshold: f64,
    /// Constant deceleration in px/ms^2.
    pub deceleration: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl From<&CarouselConfig> for FlingParams {
    fn from(cfg: &CarouselConfig) -> Self {
        Self {
            threshold: cfg.fling_threshold,
            deceleration: cfg.deceleration,
            min_ms: f64::from(cfg.min_fling_ms),
            max_ms: f64::from(cfg.max_fling_ms),
        }
    }
}

/// Where a released drag ends up and how long it takes to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleasePlan {
    /// Extra scroll distance projected from the release velocity.
    /// Zero on the snap-in-place path.
    pub projected_travel: f64,
    pub target: SnapTarget,
    pub duration_ms: f64,
}

/// Scroll distance covered while decelerating from `scroll_velocity` to
/// rest. Sign follows the velocity.
pub fn fling_distance(scroll_velocity: f64, deceleration: f64) -> f64 {
    scroll_velocity * scroll_velocity.abs() / (2.0 * deceleration)
}

/// Decide the outcome of releasing a drag at `offset` with the cursor moving
/// at `cursor_velocity` px/ms.
///
/// Returns `None` when the ring is not ready.
pub fn plan_release(
    layout: &RingLayout,
    offset: f64,
    cursor_velocity: f64,
    params: FlingParams,
) -> Option<ReleasePlan> {
    let speed = cursor_velocity.abs();
    let projected_travel = if speed <= params.threshold {
        0.0
    } else {
        // Dragging right scrolls towards lower offsets.
        fling_distance(-cursor_velocity, params.deceleration)
    };

    let target = snap::resolve(layout, offset + projected_travel)?;

    // Time to cover the remaining distance under constant deceleration:
    // d = v * t / 2.
    let remaining = (target.offset - offset).abs();
    let duration_ms = (2.0 * remaining / speed.max(params.threshold))
        .clamp(params.min_ms, params.max_ms);

    Some(ReleasePlan {
        projected_travel,
        target,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infini_types::host::Measurement;

    fn ring() -> RingLayout {
        let mut l = RingLayout::new(0.0);
        l.apply(
            &Measurement {
                item_widths: vec![200.0; 5],
                viewport_width: 600.0,
            },
            5,
        )
        .unwrap();
        l
    }

    fn params() -> FlingParams {
        FlingParams::from(&CarouselConfig::default())
    }

    #[test]
    fn distance_follows_kinematics() {
        // v^2 / 2a = 1 / 0.006
        assert!((fling_distance(1.0, 0.003) - 166.666_666).abs() < 1e-3);
        assert!((fling_distance(-1.0, 0.003) + 166.666_666).abs() < 1e-3);
        assert_eq!(fling_distance(0.0, 0.003), 0.0);
    }

    #[test]
    fn threshold_velocity_snaps_in_place() {
        let plan = plan_release(&ring(), -130.0, 0.3, params()).unwrap();
        assert_eq!(plan.projected_travel, 0.0);
        assert_eq!(plan.target.index, 0);
        assert_eq!(plan.target.offset, -200.0);
    }

    #[test]
    fn just_above_threshold_projects_travel() {
        let plan = plan_release(&ring(), -130.0, 0.31, params()).unwrap();
        assert!(plan.projected_travel.abs() > 0.0);
        // Cursor moving right => offset decreases.
        assert!(plan.projected_travel < 0.0);
    }

    #[test]
    fn fast_leftward_fling_skips_items() {
        // Cursor moving left at 2 px/ms => scroll velocity +2,
        // distance 4 / 0.006 = 666.7, projected = -200 + 666.7 = 466.7.
        let plan = plan_release(&ring(), -200.0, -2.0, params()).unwrap();
        assert!(plan.projected_travel > 600.0);
        assert_eq!(plan.target.index, 3);
        assert_eq!(plan.target.offset, 400.0);
    }

    #[test]
    fn duration_is_clamped() {
        let short = plan_release(&ring(), -200.0, 0.0, params()).unwrap();
        assert_eq!(short.duration_ms, 200.0);

        let long = plan_release(&ring(), -200.0, -2.0, params()).unwrap();
        // 2 * 600 / 2 = 600: right at the ceiling.
        assert_eq!(long.duration_ms, 600.0);

        let huge = plan_release(&ring(), -200.0, -0.5, params()).unwrap();
        assert!(huge.duration_ms <= 600.0 && huge.duration_ms >= 200.0);
    }

    #[test]
    fn not_ready_ring_has_no_plan() {
        let l = RingLayout::new(0.0);
        assert_eq!(plan_release(&l, 0.0, 5.0, params()), None);
    }
}
