//! Shared test utilities for carousel tests.
//!
//! Provides a [`MockHost`] that records every host call for assertion and
//! serves measurements from plain fields the test can change.

use infini_types::error::{CarouselError, Result};
use infini_types::host::{AnimationId, CarouselHost, Controls, Measurement};

/// A recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    BuildControls(usize),
    Measure,
    Place(usize, f64),
    SetDot(usize, bool),
    Grabbing(bool),
    RequestFrame(AnimationId),
    StartRepeat(u32),
    StopRepeat,
    Teardown,
}

/// A host double backed by in-memory widths.
pub struct MockHost {
    pub item_widths: Vec<f64>,
    pub viewport_width: f64,
    pub calls: Vec<HostCall>,
    /// Makes `measure` fail, to exercise error propagation.
    pub fail_measure: bool,
}

impl MockHost {
    pub fn new(item_widths: Vec<f64>, viewport_width: f64) -> Self {
        Self {
            item_widths,
            viewport_width,
            calls: Vec::new(),
            fail_measure: false,
        }
    }

    /// Most recent position sent for `slot`.
    pub fn placement(&self, slot: usize) -> Option<f64> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::Place(s, x) if *s == slot => Some(*x),
            _ => None,
        })
    }

    /// Most recently requested frame token.
    pub fn last_frame_request(&self) -> Option<AnimationId> {
        self.calls.iter().rev().find_map(|c| match c {
            HostCall::RequestFrame(id) => Some(*id),
            _ => None,
        })
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl CarouselHost for MockHost {
    fn build_controls(&mut self, controls: &Controls) -> Result<()> {
        self.calls
            .push(HostCall::BuildControls(controls.dot_labels.len()));
        Ok(())
    }

    fn measure(&mut self) -> Result<Measurement> {
        self.calls.push(HostCall::Measure);
        if self.fail_measure {
            return Err(CarouselError::Host("layout unavailable".into()));
        }
        Ok(Measurement {
            item_widths: self.item_widths.clone(),
            viewport_width: self.viewport_width,
        })
    }

    fn place_item(&mut self, slot: usize, x: f64) -> Result<()> {
        self.calls.push(HostCall::Place(slot, x));
        Ok(())
    }

    fn set_dot_active(&mut self, dot: usize, active: bool) -> Result<()> {
        self.calls.push(HostCall::SetDot(dot, active));
        Ok(())
    }

    fn set_grabbing(&mut self, grabbing: bool) -> Result<()> {
        self.calls.push(HostCall::Grabbing(grabbing));
        Ok(())
    }

    fn request_frame(&mut self, id: AnimationId) -> Result<()> {
        self.calls.push(HostCall::RequestFrame(id));
        Ok(())
    }

    fn start_repeat(&mut self, interval_ms: u32) -> Result<()> {
        self.calls.push(HostCall::StartRepeat(interval_ms));
        Ok(())
    }

    fn stop_repeat(&mut self) -> Result<()> {
        self.calls.push(HostCall::StopRepeat);
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        self.calls.push(HostCall::Teardown);
        Ok(())
    }
}
