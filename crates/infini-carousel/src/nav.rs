//! Discrete navigation: arrow steps and dot jumps.

use infini_types::input::Direction;

use crate::layout::RingLayout;
use crate::snap::SnapTarget;

/// Target for a one-item arrow step from `from_index`.
///
/// `reference` is the offset the step is measured against (the live offset,
/// or the in-flight target while an animation runs). The naive nearest
/// repetition of the neighbouring item is pushed one lap further whenever it
/// would not lie strictly past `reference` in `direction`; equality counts
/// as "not past", so a single-item ring advances a whole lap.
pub fn step_target(
    layout: &RingLayout,
    from_index: usize,
    reference: f64,
    direction: Direction,
) -> Option<SnapTarget> {
    let n = layout.len();
    if from_index >= n {
        return None;
    }
    let index = match direction {
        Direction::Next => (from_index + 1) % n,
        Direction::Prev => (from_index + n - 1) % n,
    };
    let mut offset = layout.offset_centering(index, reference)?;
    let lap = layout.total_width();
    match direction {
        Direction::Next if offset <= reference => offset += lap,
        Direction::Prev if offset >= reference => offset -= lap,
        _ => {}
    }
    Some(SnapTarget { index, offset })
}

/// Target for jumping straight to `index`: its nearest repetition, no
/// forced direction. Out-of-range indices yield `None`.
pub fn jump_target(layout: &RingLayout, index: usize, reference: f64) -> Option<SnapTarget> {
    let offset = layout.offset_centering(index, reference)?;
    Some(SnapTarget { index, offset })
}

/// An arrow button currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowHold {
    pub direction: Direction,
}
