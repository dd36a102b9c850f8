//! Headless infinite carousel engine.
//!
//! Items are laid out on a horizontal ring and projected into the viewport
//! for any scroll offset, so scrolling never reaches an end. The engine owns
//! the ring geometry, snap resolution, drag and fling physics and the eased
//! offset animator; everything visible goes through a
//! [`CarouselHost`](infini_types::host::CarouselHost).

// Re-exports from infini-types (configuration, errors, host seam, input).
pub use infini_types::config;
pub use infini_types::error;
pub use infini_types::host;
pub use infini_types::input;

pub mod animation;
pub mod carousel;
pub mod fling;
pub mod gesture;
pub mod layout;
pub mod nav;
pub mod snap;
pub mod track;
pub mod velocity;

#[cfg(test)]
pub(crate) mod test_utils;

pub use carousel::{InfiniCarousel, Phase};
pub use layout::RingLayout;
pub use snap::SnapTarget;
