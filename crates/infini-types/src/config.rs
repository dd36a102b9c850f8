//! Carousel tuning parameters, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// Physics and navigation settings for one carousel instance.
///
/// Every field has a default, so a TOML table only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Horizontal gap after each item, in px.
    pub gap: f64,
    /// Movement on either axis beyond which a gesture is classified.
    pub direction_lock_px: f64,
    /// Horizontal movement at or below which a gesture counts as a tap.
    pub drag_threshold_px: f64,
    /// Capacity of the release-velocity sample window.
    pub velocity_samples: usize,
    /// Release speed (px/ms) at or below which the carousel snaps in place.
    pub fling_threshold: f64,
    /// Constant deceleration (px/ms^2) used to project a fling.
    pub deceleration: f64,
    /// Shortest fling/snap animation.
    pub min_fling_ms: u32,
    /// Longest fling/snap animation.
    pub max_fling_ms: u32,
    /// Duration of arrow, dot and keyboard navigation.
    pub nav_duration_ms: u32,
    /// Interval between repeated steps while an arrow is held.
    pub arrow_repeat_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap: 0.0,
            direction_lock_px: 3.0,
            drag_threshold_px: 5.0,
            velocity_samples: 5,
            fling_threshold: 0.3,
            deceleration: 0.003,
            min_fling_ms: 200,
            max_fling_ms: 600,
            nav_duration_ms: 350,
            arrow_repeat_ms: 400,
        }
    }
}

impl CarouselConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the physics cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.gap.is_nan() || self.gap < 0.0 {
            return Err(CarouselError::Config(format!(
                "gap must be non-negative, got {}",
                self.gap
            )));
        }
        if [self.direction_lock_px, self.drag_threshold_px]
            .iter()
            .any(|v| v.is_nan() || *v < 0.0)
        {
            return Err(CarouselError::Config(
                "gesture thresholds must be non-negative".into(),
            ));
        }
        if self.velocity_samples < 2 {
            return Err(CarouselError::Config(format!(
                "velocity_samples must be at least 2, got {}",
                self.velocity_samples
            )));
        }
        if self.fling_threshold.is_nan() || self.fling_threshold <= 0.0 {
            return Err(CarouselError::Config(format!(
                "fling_threshold must be positive, got {}",
                self.fling_threshold
            )));
        }
        if self.deceleration.is_nan() || self.deceleration <= 0.0 {
            return Err(CarouselError::Config(format!(
                "deceleration must be positive, got {}",
                self.deceleration
            )));
        }
        if self.min_fling_ms > self.max_fling_ms {
            return Err(CarouselError::Config(format!(
                "min_fling_ms ({}) exceeds max_fling_ms ({})",
                self.min_fling_ms, self.max_fling_ms
            )));
        }
        if self.arrow_repeat_ms == 0 {
            return Err(CarouselError::Config(
                "arrow_repeat_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
