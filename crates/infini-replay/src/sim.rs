//! Simulated host and the fixed 60 Hz clock that drives a scenario.

use anyhow::Result;
use serde::Serialize;

use infini_carousel::error::Result as CarouselResult;
use infini_carousel::host::{AnimationId, CarouselHost, Controls, Measurement};
use infini_carousel::input::CarouselEvent;
use infini_carousel::{InfiniCarousel, Phase};

use crate::scenario::Scenario;

/// Interval between simulated display frames.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// In-memory host standing in for a browser page.
#[derive(Debug, Default)]
pub struct SimHost {
    pub item_widths: Vec<f64>,
    pub viewport_width: f64,
    pub placements: Vec<Option<f64>>,
    pub active_dot: Option<usize>,
    pending_frame: Option<AnimationId>,
    repeat_ms: Option<u32>,
    repeat_armed: bool,
}

impl SimHost {
    pub fn new(item_widths: Vec<f64>, viewport_width: f64) -> Self {
        Self {
            placements: vec![None; item_widths.len()],
            item_widths,
            viewport_width,
            ..Self::default()
        }
    }
}

impl CarouselHost for SimHost {
    fn build_controls(&mut self, controls: &Controls) -> CarouselResult<()> {
        log::debug!(
            "controls: '{}' / '{}' + {} dots",
            controls.prev_label,
            controls.next_label,
            controls.dot_labels.len()
        );
        Ok(())
    }

    fn measure(&mut self) -> CarouselResult<Measurement> {
        Ok(Measurement {
            item_widths: self.item_widths.clone(),
            viewport_width: self.viewport_width,
        })
    }

    fn place_item(&mut self, slot: usize, x: f64) -> CarouselResult<()> {
        if slot >= self.placements.len() {
            self.placements.resize(slot + 1, None);
        }
        self.placements[slot] = Some(x);
        Ok(())
    }

    fn set_dot_active(&mut self, dot: usize, active: bool) -> CarouselResult<()> {
        if active {
            self.active_dot = Some(dot);
        } else if self.active_dot == Some(dot) {
            self.active_dot = None;
        }
        Ok(())
    }

    fn set_grabbing(&mut self, grabbing: bool) -> CarouselResult<()> {
        log::trace!("grabbing: {grabbing}");
        Ok(())
    }

    fn request_frame(&mut self, id: AnimationId) -> CarouselResult<()> {
        self.pending_frame = Some(id);
        Ok(())
    }

    fn start_repeat(&mut self, interval_ms: u32) -> CarouselResult<()> {
        self.repeat_ms = Some(interval_ms);
        self.repeat_armed = true;
        Ok(())
    }

    fn stop_repeat(&mut self) -> CarouselResult<()> {
        self.repeat_ms = None;
        self.repeat_armed = false;
        Ok(())
    }

    fn teardown(&mut self) -> CarouselResult<()> {
        self.pending_frame = None;
        self.repeat_ms = None;
        self.repeat_armed = false;
        Ok(())
    }
}

/// Carousel state at a moment where nothing is moving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkpoint {
    pub at_ms: f64,
    pub index: usize,
    pub offset: f64,
    pub active_dot: Option<usize>,
    pub placements: Vec<Option<f64>>,
}

struct Simulation {
    carousel: InfiniCarousel<SimHost>,
    now: f64,
    /// Index of the next display frame on the 60 Hz grid.
    frame_no: u64,
    next_repeat: Option<f64>,
    last: Option<(usize, f64)>,
    checkpoints: Vec<Checkpoint>,
}

impl Simulation {
    fn frame_time(&self) -> f64 {
        self.frame_no as f64 * FRAME_MS
    }

    /// Earliest frame on the grid strictly after `now`.
    fn next_frame_time(&mut self) -> f64 {
        while self.frame_time() <= self.now {
            self.frame_no += 1;
        }
        self.frame_time()
    }

    fn dispatch(&mut self, event: &CarouselEvent) -> Result<()> {
        self.carousel.handle_event(event, self.now)?;
        let host = self.carousel.host_mut();
        if host.repeat_armed {
            host.repeat_armed = false;
            self.next_repeat = host.repeat_ms.map(|ms| self.now + f64::from(ms));
        } else if host.repeat_ms.is_none() {
            self.next_repeat = None;
        }
        self.record_if_settled();
        Ok(())
    }

    /// Deliver every frame and repeat tick due at or before `until`.
    fn advance_to(&mut self, until: f64) -> Result<()> {
        loop {
            let frame_pending = self.carousel.host().pending_frame.is_some();
            let frame_at = if frame_pending {
                Some(self.next_frame_time())
            } else {
                None
            };
            let due = match (frame_at, self.next_repeat) {
                (Some(f), Some(r)) if r < f => Some((r, false)),
                (Some(f), _) => Some((f, true)),
                (None, Some(r)) => Some((r, false)),
                (None, None) => None,
            };
            let Some((at, is_frame)) = due.filter(|(at, _)| *at <= until) else {
                break;
            };
            self.now = at;
            if is_frame {
                if let Some(id) = self.carousel.host_mut().pending_frame.take() {
                    self.dispatch(&CarouselEvent::Frame(id))?;
                }
            } else {
                let interval = self
                    .carousel
                    .host()
                    .repeat_ms
                    .map(f64::from)
                    .unwrap_or(f64::INFINITY);
                self.next_repeat = Some(at + interval);
                self.dispatch(&CarouselEvent::RepeatTick)?;
            }
        }
        if until.is_finite() {
            self.now = self.now.max(until);
        }
        Ok(())
    }

    fn record_if_settled(&mut self) {
        if self.carousel.phase() != Phase::Idle || self.carousel.host().pending_frame.is_some() {
            return;
        }
        let state = (self.carousel.current_index(), self.carousel.offset());
        if self.last == Some(state) {
            return;
        }
        self.last = Some(state);
        let host = self.carousel.host();
        self.checkpoints.push(Checkpoint {
            at_ms: self.now,
            index: state.0,
            offset: state.1,
            active_dot: host.active_dot,
            placements: host.placements.clone(),
        });
    }
}

/// Replay `scenario` and return every settled checkpoint, starting with the
/// state right after mount.
pub fn run(scenario: &Scenario) -> Result<Vec<Checkpoint>> {
    let host = SimHost::new(scenario.item_widths.clone(), scenario.viewport_width);
    let mut carousel = InfiniCarousel::new(
        host,
        scenario.carousel.clone(),
        scenario.item_widths.len(),
    )?;
    carousel.mount()?;

    let mut sim = Simulation {
        carousel,
        now: 0.0,
        frame_no: 0,
        next_repeat: None,
        last: None,
        checkpoints: Vec::new(),
    };
    sim.record_if_settled();

    for step in &scenario.steps {
        sim.advance_to(step.at_ms)?;
        if let Some(widths) = &step.item_widths {
            sim.carousel.host_mut().item_widths = widths.clone();
        }
        if let Some(viewport) = step.viewport_width {
            sim.carousel.host_mut().viewport_width = viewport;
        }
        if let Some(event) = &step.event {
            log::debug!("{:>8.1}ms {event:?}", sim.now);
            sim.dispatch(event)?;
        }
    }

    if sim.next_repeat.take().is_some() {
        log::warn!("arrow still held when scenario '{}' ended", scenario.name);
    }
    sim.advance_to(f64::INFINITY)?;
    sim.carousel.unmount()?;
    Ok(sim.checkpoints)
}
