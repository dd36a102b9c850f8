//! Platform-agnostic carousel input events.
//!
//! Every embedder maps its native pointer, keyboard, timer and observer
//! callbacks to these enums. The engine never sees raw platform input.

use serde::{Deserialize, Serialize};

use crate::host::AnimationId;

/// Navigation direction along the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards lower indices (content moves right).
    Prev,
    /// Towards higher indices (content moves left).
    Next,
}

/// A platform-agnostic carousel event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CarouselEvent {
    /// Pointer pressed on the track (not on an arrow or dot).
    PointerDown { x: f64, y: f64 },
    /// Pointer moved anywhere in the document while pressed.
    PointerMove { x: f64, y: f64 },
    /// Pointer released.
    PointerUp,
    /// Pointer gesture cancelled by the platform.
    PointerCancel,
    /// Arrow button pressed.
    ArrowPress(Direction),
    /// Arrow button released or left.
    ArrowRelease,
    /// The repeat timer started by an arrow press fired.
    RepeatTick,
    /// Dot indicator clicked.
    DotClick(usize),
    /// Keyboard arrow key.
    Key(Direction),
    /// The carousel's bounding box changed size.
    Resize,
    /// All images inside the items finished loading (or failed).
    ContentLoaded,
    /// Display frame callback previously requested with this token.
    Frame(AnimationId),
}
