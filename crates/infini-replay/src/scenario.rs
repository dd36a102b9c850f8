//! Scenario files: a carousel setup plus a timed list of input steps.
//!
//! ```toml
//! name = "five nexts"
//! viewport_width = 600.0
//! item_widths = [200.0, 200.0, 200.0, 200.0, 200.0]
//!
//! [carousel]
//! nav_duration_ms = 350
//!
//! [[steps]]
//! at_ms = 0.0
//! event = { Key = "Next" }
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use infini_carousel::config::CarouselConfig;
use infini_carousel::input::CarouselEvent;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub viewport_width: f64,
    pub item_widths: Vec<f64>,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted input at a point in simulated time.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub at_ms: f64,
    #[serde(default)]
    pub event: Option<CarouselEvent>,
    /// New item widths, applied before `event`. Pair with a `Resize` or
    /// `ContentLoaded` event for the carousel to pick them up.
    #[serde(default)]
    pub item_widths: Option<Vec<f64>>,
    #[serde(default)]
    pub viewport_width: Option<f64>,
}

impl Scenario {
    /// Parse and validate a scenario. Steps are ordered by time; steps
    /// sharing a timestamp keep their file order.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut scenario: Self = toml::from_str(text)?;
        scenario.carousel.validate()?;
        scenario.validate()?;
        scenario.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let mut scenario = Self::from_toml(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if self.viewport_width.is_nan() || self.viewport_width < 0.0 {
            bail!("viewport_width must be non-negative");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if !step.at_ms.is_finite() || step.at_ms < 0.0 {
                bail!("step {i}: at_ms must be a finite, non-negative time");
            }
            match step.event {
                Some(CarouselEvent::Frame(_)) | Some(CarouselEvent::RepeatTick) => {
                    bail!("step {i}: frames and repeat ticks are generated by the simulator")
                }
                None if step.item_widths.is_none() && step.viewport_width.is_none() => {
                    bail!("step {i} has no event and changes nothing")
                }
                _ => {}
            }
        }
        Ok(())
    }
}
