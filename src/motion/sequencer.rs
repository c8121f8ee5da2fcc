// src/motion/sequencer.rs - Raster traversal of the circular and elevation axes
//!
//! The circular axis performs the fast inner sweep and the elevation axis
//! takes one slow outer step every time the circular axis returns to its
//! first segment. Every visited position gets one servo trigger cycle.

use std::iter::FusedIterator;

use serde::Serialize;
use thiserror::Error;

use super::axis::Axis;
use super::machine::{MachineState, ServoParameters};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("scan did not finish within {budget} events; axis configuration never reaches both maxima together")]
    ExceededStepBudget { budget: usize },
}

/// One trigger-and-release cycle, executed in field order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Actuation {
    pub pre_delay_s: f64,
    pub actuate_position: u32,
    pub actuate_delay_s: f64,
    pub release_position: u32,
    pub post_delay_s: f64,
}

impl From<&ServoParameters> for Actuation {
    fn from(servo: &ServoParameters) -> Self {
        Self {
            pre_delay_s: servo.pre_delay_s,
            actuate_position: servo.actuate_position,
            actuate_delay_s: servo.actuate_delay_s,
            release_position: servo.release_position,
            post_delay_s: servo.post_delay_s,
        }
    }
}

/// One stop of the scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionEvent {
    /// Zero-based position of this event in the sequence.
    pub index: usize,
    pub circular_index: usize,
    pub circular_position: f64,
    /// The circular zero reference was just re-established.
    pub circular_reference_reset: bool,
    pub elevation_index: usize,
    /// Only set when the elevation axis has to move (or on the first event).
    pub elevation_position: Option<f64>,
    pub actuation: Actuation,
}

/// Lazily walks the scan pattern, mutating the machine's axes in place.
///
/// A sequencer runs once; the axes are left at their final position, so a
/// new scan needs a freshly validated [`MachineState`].
pub struct Sequencer<'a> {
    machine: &'a mut MachineState,
    actuation: Actuation,
    flush_elevation: bool,
    reset_circular_reference: bool,
    emitted: usize,
    budget: usize,
    finished: bool,
}

impl<'a> Sequencer<'a> {
    pub fn new(machine: &'a mut MachineState) -> Self {
        let budget = Self::default_step_budget(machine);
        let actuation = Actuation::from(machine.servo());
        Self {
            machine,
            actuation,
            flush_elevation: true,
            reset_circular_reference: false,
            emitted: 0,
            budget,
            finished: false,
        }
    }

    /// Replace the default step budget.
    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    /// Upper bound on the events of any terminating scan: `2·Nc·Ne + Nc + Ne`.
    ///
    /// An oscillating circular axis needs `2·(Nc-1)` steps per elevation
    /// step, plus at most `Nc` steps before the first and after the last.
    pub fn default_step_budget(machine: &MachineState) -> usize {
        let nc = machine.circular().grid().segment_count();
        let ne = machine.elevation().grid().segment_count();
        nc.saturating_mul(ne)
            .saturating_mul(2)
            .saturating_add(nc)
            .saturating_add(ne)
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Number of events produced so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn current_event(&self) -> PositionEvent {
        let circular = &self.machine.circular;
        let elevation = &self.machine.elevation;
        PositionEvent {
            index: self.emitted,
            circular_index: circular.current_idx(),
            circular_position: circular.current_pos(),
            circular_reference_reset: self.reset_circular_reference,
            elevation_index: elevation.current_idx(),
            elevation_position: self.flush_elevation.then(|| elevation.current_pos()),
            actuation: self.actuation,
        }
    }

    fn scan_complete(&self) -> bool {
        self.machine.circular.is_at_max() && self.machine.elevation.is_at_max()
    }
}

impl Iterator for Sequencer<'_> {
    type Item = Result<PositionEvent, SequenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.emitted >= self.budget {
            self.finished = true;
            tracing::warn!("Scan exceeded step budget of {} events", self.budget);
            return Some(Err(SequenceError::ExceededStepBudget {
                budget: self.budget,
            }));
        }

        let event = self.current_event();
        self.emitted += 1;
        self.flush_elevation = false;
        self.reset_circular_reference = false;
        tracing::trace!(
            "Event {}: circular #{} elevation #{}",
            event.index,
            event.circular_index,
            event.elevation_index
        );

        if self.scan_complete() {
            self.finished = true;
            tracing::debug!("Scan complete after {} events", self.emitted);
            return Some(Ok(event));
        }

        self.machine.circular.advance();
        if self.machine.circular.is_at_min() {
            self.machine.elevation.advance();
            self.flush_elevation = true;
            self.reset_circular_reference = true;
        }

        Some(Ok(event))
    }
}

impl FusedIterator for Sequencer<'_> {}
