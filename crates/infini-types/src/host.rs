//! The host trait the carousel engine drives.
//!
//! A host owns the real item nodes (DOM elements, scene-graph objects, or a
//! recording double in tests) and the platform timers. The engine never
//! touches nodes directly; it addresses them by slot index.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Monotonic animation token.
///
/// Every animate-to call mints a new id. A frame callback carrying an older
/// id belongs to a superseded animation and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Natural dimensions read from the host in one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurement {
    /// Rendered width of each item, in item order.
    pub item_widths: Vec<f64>,
    /// Width of the carousel viewport.
    pub viewport_width: f64,
}

/// Navigation controls the host creates at mount, with their labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    /// Label for the "previous" arrow.
    pub prev_label: String,
    /// Label for the "next" arrow.
    pub next_label: String,
    /// One label per dot, in item order.
    pub dot_labels: Vec<String>,
}

impl Controls {
    /// Standard labels for a carousel of `count` items.
    pub fn for_items(count: usize) -> Self {
        Self {
            prev_label: "Previous card".to_string(),
            next_label: "Next card".to_string(),
            dot_labels: (1..=count).map(|i| format!("Go to card {i}")).collect(),
        }
    }
}

/// Side-effect surface of a carousel embedder.
pub trait CarouselHost {
    /// Create the arrow buttons and one dot per item.
    fn build_controls(&mut self, controls: &Controls) -> Result<()>;

    /// Read every item's natural width and the viewport width.
    ///
    /// Implementations must lay items out in normal flow for the read and
    /// restore absolute positioning afterwards.
    fn measure(&mut self) -> Result<Measurement>;

    /// Translate the node in `slot` to screen-space `x`.
    fn place_item(&mut self, slot: usize, x: f64) -> Result<()>;

    /// Toggle the "active" state of a dot indicator.
    fn set_dot_active(&mut self, dot: usize, active: bool) -> Result<()>;

    /// Show or clear the grabbing cursor.
    fn set_grabbing(&mut self, grabbing: bool) -> Result<()>;

    /// Schedule one display-frame callback delivering `id`.
    fn request_frame(&mut self, id: AnimationId) -> Result<()>;

    /// Start a repeating timer delivering `RepeatTick` every `interval_ms`.
    fn start_repeat(&mut self, interval_ms: u32) -> Result<()>;

    /// Cancel the repeating timer, if any.
    fn stop_repeat(&mut self) -> Result<()>;

    /// Drop every document-level listener and observer registered for this
    /// carousel.
    fn teardown(&mut self) -> Result<()>;
}
