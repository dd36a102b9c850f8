//! Snap-target resolution across the wrapping ring.

use crate::layout::RingLayout;

/// An item and the exact offset that centres it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    pub index: usize,
    pub offset: f64,
}

/// Find the item whose centre lies nearest the viewport centre when the
/// ring is scrolled to `candidate`.
///
/// Each item's nearest repetition is found analytically
/// (`k = round((target - centre) / lap)`), so the cost is linear in the item
/// count regardless of how many laps `candidate` is away from zero. Ties go
/// to the lowest index. Returns `None` when the ring is not ready.
pub fn resolve(layout: &RingLayout, candidate: f64) -> Option<SnapTarget> {
    if !layout.is_ready() {
        return None;
    }
    let lap = layout.total_width();
    let vc = layout.viewport_center();
    let target = candidate + vc;

    let mut best: Option<(usize, f64, f64)> = None;
    for index in 0..layout.len() {
        let center = layout.item_center(index)?;
        let k = ((target - center) / lap).round();
        let snapped = center + k * lap;
        let dist = (snapped - target).abs();
        match best {
            Some((_, _, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, snapped, dist)),
        }
    }

    best.map(|(index, snapped, _)| SnapTarget {
        index,
        offset: snapped - vc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infini_types::host::Measurement;

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
    fn not_ready_ring_has_no_target() {
        let l = ring(&[], 600.0, 0.0);
        assert_eq!(resolve(&l, 0.0), None);
    }

    #[test]
    fn snaps_to_nearest_item() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        // Item 0 is centred at -200, item 1 at 0.
        assert_eq!(
            resolve(&l, -120.0),
            Some(SnapTarget {
                index: 0,
                offset: -200.0
            })
        );
        assert_eq!(
            resolve(&l, -60.0),
            Some(SnapTarget {
                index: 1,
                offset: 0.0
            })
        );
    }

    #[test]
    fn snaps_across_the_wrap() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        // Far to the left: item 4 of the previous lap.
        assert_eq!(
            resolve(&l, -410.0),
            Some(SnapTarget {
                index: 4,
                offset: -400.0
            })
        );
        // Several laps out.
        assert_eq!(
            resolve(&l, 10_790.0),
            Some(SnapTarget {
                index: 0,
                offset: 10_800.0
            })
        );
    }

    #[test]
    fn tie_goes_to_first_item() {
        let l = ring(&[200.0; 5], 600.0, 0.0);
        // -100 is exactly between item 0 (-200) and item 1 (0).
        assert_eq!(resolve(&l, -100.0).unwrap().index, 0);
    }

    #[test]
    fn variable_widths_snap_by_centre() {
        let l = ring(&[100.0, 300.0, 50.0], 400.0, 0.0);
        // Centres: 50, 250, 425; lap 450; viewport centre 200.
        let t = resolve(&l, 40.0).unwrap();
        assert_eq!(t.index, 1);
        assert_eq!(t.offset, 50.0);
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
            fn snapping_is_idempotent(l in arb_ring(), s in -100_000i32..100_000) {
                let first = resolve(&l, f64::from(s)).unwrap();
                let second = resolve(&l, first.offset).unwrap();
                prop_assert_eq!(first.index, second.index);
                prop_assert!((first.offset - second.offset).abs() < 1e-9);
            }

            #[test]
            fn snap_never_moves_more_than_half_a_lap(
                l in arb_ring(),
                s in -100_000i32..100_000,
            ) {
                let s = f64::from(s);
                let t = resolve(&l, s).unwrap();
                prop_assert!((t.offset - s).abs() <= l.total_width() / 2.0 + 1e-9);
            }
        }
    }
}
