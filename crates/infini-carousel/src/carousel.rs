//! The carousel state machine.
//!
//! ```text
//! Idle      -- pointer down ------------------> Pressed
//! Pressed   -- horizontal past lock ----------> Dragging
//! Pressed   -- vertical past lock / release --> Idle (snap if off-grid)
//! Dragging  -- release ------------------------> Animating (fling or snap)
//! Animating -- frame reaches target ----------> Idle
//! Animating -- pointer down -------------------> Pressed (animation cancelled)
//! Idle/Animating -- arrow, key, dot ----------> Animating
//! ```
//!
//! All time is supplied by the caller as `now_ms`. Frame callbacks carry the
//! [`AnimationId`] they were requested with; anything but the live id is a
//! superseded animation and is ignored.

use infini_types::config::CarouselConfig;
use infini_types::error::Result;
use infini_types::host::{AnimationId, CarouselHost, Controls};
use infini_types::input::{CarouselEvent, Direction};

use crate::animation::{AnimationClock, Tween, easing};
use crate::fling::{self, FlingParams};
use crate::gesture::{Axis, DragGesture, DragThresholds, DragUpdate};
use crate::layout::RingLayout;
use crate::nav::{self, ArrowHold};
use crate::snap::{self, SnapTarget};
use crate::track::{Dots, Track};

/// Offsets closer than this to a snap target count as already settled.
const SETTLE_EPSILON: f64 = 1e-6;

/// Coarse interaction state, derived from the live gesture and tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Pointer is down but the gesture has not committed to an axis.
    Pressed,
    Dragging,
    Animating,
}

/// One infinite carousel bound to a host.
pub struct InfiniCarousel<H: CarouselHost> {
    host: H,
    config: CarouselConfig,
    item_count: usize,
    layout: RingLayout,
    track: Track,
    dots: Dots,
    offset: f64,
    current_index: usize,
    gesture: Option<DragGesture>,
    tween: Option<Tween>,
    tween_index: Option<usize>,
    clock: AnimationClock,
    hold: Option<ArrowHold>,
    remeasure_pending: bool,
    mounted: bool,
}

impl<H: CarouselHost> InfiniCarousel<H> {
    /// Bind a carousel of `item_count` items to `host`. Nothing is sent to
    /// the host until [`InfiniCarousel::mount`].
    pub fn new(host: H, config: CarouselConfig, item_count: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            layout: RingLayout::new(config.gap),
            config,
            item_count,
            track: Track::new(item_count),
            dots: Dots::new(item_count),
            offset: 0.0,
            current_index: 0,
            gesture: None,
            tween: None,
            tween_index: None,
            clock: AnimationClock::default(),
            hold: None,
            remeasure_pending: false,
            mounted: false,
        })
    }

    /// Create the controls, take the first measurement and centre item 0.
    ///
    /// A carousel whose items have no width yet stays inert until a
    /// [`CarouselEvent::ContentLoaded`] or [`CarouselEvent::Resize`] brings
    /// a usable measurement.
    pub fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Ok(());
        }
        self.host
            .build_controls(&Controls::for_items(self.item_count))?;
        self.mounted = true;
        self.current_index = 0;
        self.remeasure()
    }

    /// Stop timers, invalidate any in-flight frame and release the host's
    /// listeners. The carousel ignores every later event.
    pub fn unmount(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        if self.hold.take().is_some() {
            self.host.stop_repeat()?;
        }
        if self.gesture.take().is_some() {
            self.host.set_grabbing(false)?;
        }
        self.tween = None;
        self.tween_index = None;
        self.clock.advance();
        self.remeasure_pending = false;
        // The host rebuilds its controls and nodes on the next mount.
        self.dots = Dots::new(self.item_count);
        self.track.invalidate();
        self.mounted = false;
        self.host.teardown()
    }

    /// Dispatch a platform event.
    pub fn handle_event(&mut self, event: &CarouselEvent, now_ms: f64) -> Result<()> {
        match *event {
            CarouselEvent::PointerDown { x, y } => self.pointer_down(x, y, now_ms),
            CarouselEvent::PointerMove { x, y } => self.pointer_move(x, y, now_ms),
            CarouselEvent::PointerUp | CarouselEvent::PointerCancel => self.pointer_up(now_ms),
            CarouselEvent::ArrowPress(direction) => self.arrow_press(direction, now_ms),
            CarouselEvent::ArrowRelease => self.arrow_release(),
            CarouselEvent::RepeatTick => self.repeat_tick(now_ms),
            CarouselEvent::DotClick(index) => self.go_to(index, now_ms),
            CarouselEvent::Key(direction) => self.step(direction, now_ms),
            CarouselEvent::Resize | CarouselEvent::ContentLoaded => self.invalidate_layout(),
            CarouselEvent::Frame(id) => self.frame(id, now_ms),
        }
    }

    // -- Accessors --

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Index of the item shown as active by the dots.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether navigation can do anything (mounted with a measured ring).
    pub fn is_ready(&self) -> bool {
        self.mounted && self.layout.is_ready()
    }

    /// The live animation token, if an animation is running.
    pub fn animation_id(&self) -> Option<AnimationId> {
        self.tween.as_ref().map(|t| t.id)
    }

    /// Duration of the running animation, in ms.
    pub fn animation_duration(&self) -> Option<f64> {
        self.tween.as_ref().map(|t| t.duration_ms)
    }

    /// Offset the running animation is heading to.
    pub fn animation_target(&self) -> Option<f64> {
        self.tween.as_ref().map(|t| t.to)
    }

    pub fn phase(&self) -> Phase {
        match (&self.gesture, &self.tween) {
            (Some(g), _) if g.axis() == Some(Axis::Horizontal) => Phase::Dragging,
            (Some(_), _) => Phase::Pressed,
            (None, Some(_)) => Phase::Animating,
            (None, None) => Phase::Idle,
        }
    }

    // -- Pointer input --

    /// Pointer pressed on the track. Cancels any running animation.
    pub fn pointer_down(&mut self, x: f64, y: f64, now_ms: f64) -> Result<()> {
        if !self.is_ready() || self.gesture.is_some() {
            return Ok(());
        }
        if self.tween.take().is_some() {
            self.clock.advance();
            self.tween_index = None;
            log::debug!("drag interrupted animation at {:.1}", self.offset);
        }
        self.gesture = Some(DragGesture::begin(
            x,
            y,
            now_ms,
            self.offset,
            self.config.velocity_samples,
        ));
        self.host.set_grabbing(true)
    }

    /// Pointer moved while pressed.
    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> Result<()> {
        let thresholds = DragThresholds {
            lock_px: self.config.direction_lock_px,
            move_px: self.config.drag_threshold_px,
        };
        let Some(gesture) = self.gesture.as_mut() else {
            return Ok(());
        };
        match gesture.update(x, y, now_ms, thresholds) {
            DragUpdate::Holding => Ok(()),
            DragUpdate::Abandoned => {
                log::trace!("vertical gesture, releasing to native scroll");
                self.gesture = None;
                self.host.set_grabbing(false)?;
                self.settle(now_ms)
            }
            DragUpdate::Scrolled(offset) => {
                self.offset = offset;
                self.track.render(&self.layout, self.offset, &mut self.host)?;
                Ok(())
            }
        }
    }

    /// Pointer released or cancelled.
    pub fn pointer_up(&mut self, now_ms: f64) -> Result<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        self.host.set_grabbing(false)?;
        if !gesture.moved() {
            return self.settle(now_ms);
        }

        let velocity = gesture.release_velocity(now_ms);
        let params = FlingParams::from(&self.config);
        let Some(plan) = fling::plan_release(&self.layout, self.offset, velocity, params) else {
            return Ok(());
        };
        log::debug!(
            "release at {:.1} v={velocity:.3}px/ms travel={:.1} -> item {} at {:.1} over {:.0}ms",
            self.offset,
            plan.projected_travel,
            plan.target.index,
            plan.target.offset,
            plan.duration_ms
        );
        self.animate_to(plan.target, plan.duration_ms, now_ms)
    }

    // -- Discrete navigation --

    /// Step one item in `direction`, always moving visibly that way.
    ///
    /// While an animation runs the step chains from its target, so rapid
    /// presses queue up rather than collapse.
    pub fn step(&mut self, direction: Direction, now_ms: f64) -> Result<()> {
        if !self.is_ready() || self.gesture.is_some() {
            return Ok(());
        }
        let from = self.tween_index.unwrap_or(self.current_index);
        let reference = self.animation_target().unwrap_or(self.offset);
        let Some(target) = nav::step_target(&self.layout, from, reference, direction) else {
            return Ok(());
        };
        log::debug!("step {direction:?}: item {from} -> {}", target.index);
        let duration = f64::from(self.config.nav_duration_ms);
        self.animate_to(target, duration, now_ms)
    }

    /// Arrow button pressed: step now and keep stepping until released.
    pub fn arrow_press(&mut self, direction: Direction, now_ms: f64) -> Result<()> {
        if !self.is_ready() || self.gesture.is_some() {
            return Ok(());
        }
        if self.hold.is_some() {
            self.host.stop_repeat()?;
        }
        self.step(direction, now_ms)?;
        self.hold = Some(ArrowHold { direction });
        self.host.start_repeat(self.config.arrow_repeat_ms)
    }

    /// Arrow button released, left or cancelled.
    pub fn arrow_release(&mut self) -> Result<()> {
        if self.hold.take().is_some() {
            self.host.stop_repeat()?;
        }
        Ok(())
    }

    /// The hold-to-repeat timer fired.
    pub fn repeat_tick(&mut self, now_ms: f64) -> Result<()> {
        match self.hold {
            Some(hold) => self.step(hold.direction, now_ms),
            None => Ok(()),
        }
    }

    /// Jump straight to `index` (dot click). Out-of-range indices are
    /// ignored.
    pub fn go_to(&mut self, index: usize, now_ms: f64) -> Result<()> {
        if !self.is_ready() || self.gesture.is_some() || index >= self.item_count {
            return Ok(());
        }
        let Some(target) = nav::jump_target(&self.layout, index, self.offset) else {
            return Ok(());
        };
        log::debug!("jump to item {index} at {:.1}", target.offset);
        self.current_index = index;
        self.dots.sync(index, &mut self.host)?;
        let duration = f64::from(self.config.nav_duration_ms);
        self.animate_to(target, duration, now_ms)
    }

    // -- Layout --

    /// Resize or image-load notification. Deferred while the carousel is
    /// being dragged or animated.
    pub fn invalidate_layout(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        if self.gesture.is_some() || self.tween.is_some() {
            self.remeasure_pending = true;
            return Ok(());
        }
        self.remeasure()
    }

    /// Measure again and re-centre the active item.
    fn remeasure(&mut self) -> Result<()> {
        self.remeasure_pending = false;
        if self.item_count == 0 {
            return Ok(());
        }
        let old_lap = self.layout.total_width();
        let old_offset = self.offset;

        let measurement = self.host.measure()?;
        self.layout.apply(&measurement, self.item_count)?;
        self.track.invalidate();
        if !self.layout.is_ready() {
            log::warn!("carousel measured with zero lap width; staying inert");
            return Ok(());
        }

        // Stay on the same lap, proportionally, so offsets do not jump by
        // whole laps when widths change.
        let hint = if old_lap > 0.0 {
            old_offset / old_lap * self.layout.total_width()
        } else {
            0.0
        };
        if let Some(offset) = self.layout.offset_centering(self.current_index, hint) {
            log::debug!(
                "re-centred item {}: {old_offset:.1} -> {offset:.1}",
                self.current_index
            );
            self.offset = offset;
        }
        self.track.render(&self.layout, self.offset, &mut self.host)?;
        self.dots.sync(self.current_index, &mut self.host)
    }

    // -- Animation --

    /// Start animating towards `target`, superseding any running animation.
    fn animate_to(&mut self, target: SnapTarget, duration_ms: f64, now_ms: f64) -> Result<()> {
        let id = self.clock.advance();
        self.tween = Some(Tween::new(
            id,
            self.offset,
            target.offset,
            now_ms,
            duration_ms,
            easing::ease_out_cubic,
        ));
        self.tween_index = Some(target.index);
        self.host.request_frame(id)
    }

    /// Frame callback. Stale ids are dropped.
    pub fn frame(&mut self, id: AnimationId, now_ms: f64) -> Result<()> {
        if !self.clock.is_current(id) {
            log::trace!("dropping stale frame {id:?}");
            return Ok(());
        }
        let Some(tween) = self.tween.as_ref() else {
            return Ok(());
        };
        let finished = tween.is_finished(now_ms);
        self.offset = tween.sample(now_ms);
        log::trace!("frame {id:?} offset {:.2}", self.offset);
        self.track.render(&self.layout, self.offset, &mut self.host)?;

        if finished {
            self.tween = None;
            self.tween_index = None;
            self.finish()
        } else {
            self.host.request_frame(id)
        }
    }

    /// Snap to the nearest item from wherever the ring is now.
    fn settle(&mut self, now_ms: f64) -> Result<()> {
        let Some(target) = snap::resolve(&self.layout, self.offset) else {
            return Ok(());
        };
        if (target.offset - self.offset).abs() < SETTLE_EPSILON {
            return self.finish();
        }
        let params = FlingParams::from(&self.config);
        match fling::plan_release(&self.layout, self.offset, 0.0, params) {
            Some(plan) => self.animate_to(plan.target, plan.duration_ms, now_ms),
            None => Ok(()),
        }
    }

    /// Resting state reached: refresh the cached index and run any
    /// measurement deferred while busy.
    fn finish(&mut self) -> Result<()> {
        if let Some(target) = snap::resolve(&self.layout, self.offset) {
            self.current_index = target.index;
            self.dots.sync(target.index, &mut self.host)?;
        }
        if self.remeasure_pending {
            self.remeasure()?;
        }
        Ok(())
    }
}
