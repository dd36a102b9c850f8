//! The live track: one recycled host slot per item, plus dot indicators.
//!
//! Slots are never created or destroyed after mount. Each projection step
//! rewrites the cached placement of every slot in place and forwards only
//! the transforms that changed.

use infini_types::error::Result;
use infini_types::host::CarouselHost;

use crate::layout::RingLayout;

/// Cached screen position of each slot.
#[derive(Debug, Clone)]
pub struct Track {
    placed: Vec<Option<f64>>,
}

impl Track {
    pub fn new(slots: usize) -> Self {
        Self {
            placed: vec![None; slots],
        }
    }

    /// Last position sent for `slot`.
    pub fn placement(&self, slot: usize) -> Option<f64> {
        self.placed.get(slot).copied().flatten()
    }

    /// Forget cached placements so the next render re-sends every slot.
    pub fn invalidate(&mut self) {
        self.placed.fill(None);
    }

    /// Project every item at `offset` and push changed transforms to the
    /// host. Returns how many slots were updated.
    pub fn render<H: CarouselHost>(
        &mut self,
        layout: &RingLayout,
        offset: f64,
        host: &mut H,
    ) -> Result<usize> {
        let mut updated = 0;
        for (slot, cached) in self.placed.iter_mut().enumerate() {
            let Some(x) = layout.project(slot, offset) else {
                continue;
            };
            if *cached != Some(x) {
                host.place_item(slot, x)?;
                *cached = Some(x);
                updated += 1;
            }
        }
        Ok(updated)
    }
}

/// Which dot indicator is lit.
#[derive(Debug, Clone, Default)]
pub struct Dots {
    count: usize,
    active: Option<usize>,
}

impl Dots {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Light `index` and darken the previously lit dot.
    pub fn sync<H: CarouselHost>(&mut self, index: usize, host: &mut H) -> Result<()> {
        if index >= self.count || self.active == Some(index) {
            return Ok(());
        }
        if let Some(prev) = self.active {
            host.set_dot_active(prev, false)?;
        }
        host.set_dot_active(index, true)?;
        self.active = Some(index);
        Ok(())
    }
}
