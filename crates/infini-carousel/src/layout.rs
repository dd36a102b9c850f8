//! Ring layout: measured item widths, cumulative positions, and projection
//! of items into screen space for an unbounded scroll offset.

use infini_types::error::{CarouselError, Result};
use infini_types::host::Measurement;

/// Position table for one lap of the ring.
#[derive(Debug, Clone, Default)]
pub struct RingLayout {
    gap: f64,
    widths: Vec<f64>,
    positions: Vec<f64>,
    total_width: f64,
    viewport_width: f64,
}

impl RingLayout {
    /// An unmeasured layout. Every query short-circuits until
    /// [`RingLayout::apply`] supplies non-zero widths.
    pub fn new(gap: f64) -> Self {
        Self {
            gap: gap.max(0.0),
            ..Self::default()
        }
    }

    /// Rebuild the position table from a fresh measurement.
    ///
    /// Negative or non-finite widths are treated as zero (an item that is
    /// not laid out yet).
    pub fn apply(&mut self, m: &Measurement, item_count: usize) -> Result<()> {
        if m.item_widths.len() != item_count {
            return Err(CarouselError::Measurement(format!(
                "expected {item_count} item widths, got {}",
                m.item_widths.len()
            )));
        }

        self.widths.clear();
        self.positions.clear();
        let mut x = 0.0;
        for &w in &m.item_widths {
            let w = if w.is_finite() { w.max(0.0) } else { 0.0 };
            self.widths.push(w);
            self.positions.push(x);
            x += w + self.gap;
        }
        // A ring of zero-width items is not ready no matter the gap.
        self.total_width = if self.widths.iter().any(|&w| w > 0.0) {
            x
        } else {
            0.0
        };
        self.viewport_width = if m.viewport_width.is_finite() {
            m.viewport_width.max(0.0)
        } else {
            0.0
        };
        log::debug!(
            "ring measured: {} items, lap {:.1}px, viewport {:.1}px",
            self.widths.len(),
            self.total_width,
            self.viewport_width
        );
        Ok(())
    }

    /// Number of items in one lap.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Whether the ring has no items.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Whether offsets can be computed (items present and a non-zero lap).
    pub fn is_ready(&self) -> bool {
        !self.widths.is_empty() && self.total_width > 0.0
    }

    /// Width of one full lap, gaps included. Zero when not ready.
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn viewport_center(&self) -> f64 {
        self.viewport_width / 2.0
    }

    pub fn width(&self, index: usize) -> Option<f64> {
        self.widths.get(index).copied()
    }

    /// Left edge of `index` within one lap.
    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Centre of `index` within one lap.
    pub fn item_center(&self, index: usize) -> Option<f64> {
        Some(self.positions.get(index)? + self.widths.get(index)? / 2.0)
    }

    /// Screen-space left edge of `index` at `scroll_offset`.
    ///
    /// Picks whichever of the two candidate repetitions puts the item's
    /// centre nearer the viewport centre. Returns `None` when the ring is
    /// not ready or the index is out of range.
    pub fn project(&self, index: usize, scroll_offset: f64) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        let pos = self.position(index)?;
        let half = self.width(index)? / 2.0;
        let sx = wrap(pos - scroll_offset, self.total_width);
        let alt = sx - self.total_width;
        let vc = self.viewport_center();
        if (alt + half - vc).abs() < (sx + half - vc).abs() {
            Some(alt)
        } else {
            Some(sx)
        }
    }

    /// The offset that exactly centres `index`, choosing the repetition
    /// nearest to `near`.
    pub fn offset_centering(&self, index: usize, near: f64) -> Option<f64> {
        if !self.is_ready() {
            return None;
        }
        let center = self.item_center(index)?;
        let target = near + self.viewport_center();
        let k = ((target - center) / self.total_width).round();
        Some(center + k * self.total_width - self.viewport_center())
    }
}

/// `value mod period`, normalised into `[0, period)`.
fn wrap(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    // rem_euclid can round up to `period` for tiny negative inputs.
    if r >= period { r - period } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(widths: &[f64], viewport: f64, gap: f64) -> RingLayout {
        let mut l = RingLayout::new(gap);
        l.apply(
            &Measurement {
                item_widths: widths.to_vec(),
                viewport_width: viewport,
            },
            widths.len(),
        )
        .unwrap();
        l
    }

    #[test]
    fn positions_are_cumulative() {
        let l = ring(&[100.0, 50.0, 200.0], 300.0, 0.0);
        assert_eq!(l.position(0), Some(0.0));
        assert_eq!(l.position(1), Some(100.0));
        assert_eq!(l.position(2), Some(150.0));
        assert_eq!(l.total_width(), 350.0);
    }

    #[test]
    fn gap_follows_every_item() {
        let l = ring(&[100.0, 100.0], 300.0, 10.0);
        assert_eq!(l.position(1), Some(110.0));
        assert_eq!(l.total_width(), 220.0);
        assert_eq!(l.item_center(1), Some(160.0));
    }

    #[test]
    fn empty_ring_is_not_ready() {
        let l = ring(&[], 600.0, 0.0);
        assert!(l.is_empty());
        assert!(!l.is_ready());
        assert_eq!(l.project(0, 0.0), None);
        assert_eq!(l.offset_centering(0, 0.0), None);
    }

    #[test]
    fn zero_width_items_are_not_ready() {
        let l = ring(&[0.0, 0.0], 600.0, 16.0);
        assert!(!l.is_ready());
        assert_eq!(l.total_width(), 0.0);
        assert_eq!(l.project(1, 50.0), None);
    }

    #[test]
    fn bad_widths_count_as_zero() {
        let l = ring(&[f64::NAN, -5.0, 100.0], 300.0, 0.0);
        assert_eq!(l.width(0), Some(0.0));
        assert_eq!(l.width(1), Some(0.0));
        assert_eq!(l.total_width(), 100.0);
    }

    #[test]
    fn width_count_mismatch_is_an_error() {
        let mut l = RingLayout::new(0.0);
        let err = l
            .apply(
                &Measurement {
                    item_widths: vec![1.0],
                    viewport_width: 10.0,
                },
                2,
            )
            .unwrap_err();
        assert!(matches!(err, CarouselError::Measurement(_)));
    }

    #[test]
    fn project_at_zero_offset() {
        // 5 x 200 in a 600 viewport: items 0..=2 fill the screen, item 3
        // waits just past the right edge and item 4 wraps to the left.
        let l = ring(&[200.0; 5], 600.0, 0.0);
        assert_eq!(l.project(0, 0.0), Some(0.0));
        assert_eq!(l.project(1, 0.0), Some(200.0));
        assert_eq!(l.project(2, 0.0), Some(400.0));
        assert_eq!(l.project(3, 0.0), Some(600.0));
        assert_eq!(l.project(4, 0.0), Some(-200.0));
    }

    #[test]
    fn project_wraps_in_both_directions() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        assert_eq!(l.project(0, 150.0), Some(-150.0));
        assert_eq!(l.project(0, -150.0), Some(150.0));
        assert_eq!(l.project(4, -150.0), Some(-50.0));
    }

    #[test]
    fn project_out_of_range_index() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        assert_eq!(l.project(5, 0.0), None);
    }

    #[test]
    fn offset_centering_picks_nearest_lap() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        // Item 0 centre = 100, viewport centre = 300.
        assert_eq!(l.offset_centering(0, 0.0), Some(-200.0));
        assert_eq!(l.offset_centering(0, 900.0), Some(800.0));
        assert_eq!(l.offset_centering(0, -1100.0), Some(-1200.0));
    }

    #[test]
    fn wrap_normalises_into_period() {
        assert_eq!(wrap(-1.0, 10.0), 9.0);
        assert_eq!(wrap(25.0, 10.0), 5.0);
        assert!(wrap(-1e-18, 10.0) < 10.0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_ring() -> impl Strategy<Value = RingLayout> {
            (
                proptest::collection::vec(1u32..400, 1..8),
                100u32..1200,
                0u32..32,
            )
                .prop_map(|(widths, viewport, gap)| {
                    let widths: Vec<f64> = widths.into_iter().map(f64::from).collect();
                    ring(&widths, f64::from(viewport), f64::from(gap))
                })
        }

        proptest! {
            #[test]
            fn projection_is_periodic(
                l in arb_ring(),
                s in -100_000i32..100_000,
                k in -50i32..50,
            ) {
                let s = f64::from(s);
                let shifted = s + f64::from(k) * l.total_width();
                for i in 0..l.len() {
                    let a = l.project(i, s).unwrap();
                    let b = l.project(i, shifted).unwrap();
                    prop_assert!((a - b).abs() < 1e-6, "item {i}: {a} vs {b}");
                }
            }

            #[test]
            fn projection_is_within_one_lap_of_viewport(
                l in arb_ring(),
                s in -100_000i32..100_000,
            ) {
                let s = f64::from(s);
                for i in 0..l.len() {
                    let x = l.project(i, s).unwrap();
                    prop_assert!(x >= -l.total_width() && x < l.total_width());
                }
            }

            #[test]
            fn centering_offset_centres_the_item(
                l in arb_ring(),
                near in -100_000i32..100_000,
            ) {
                for i in 0..l.len() {
                    let off = l.offset_centering(i, f64::from(near)).unwrap();
                    let x = l.project(i, off).unwrap();
                    let centre = x + l.width(i).unwrap() / 2.0;
                    prop_assert!((centre - l.viewport_center()).abs() < 1e-6);
                }
            }
        }
    }
}
