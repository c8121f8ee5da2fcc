// src/motion/axis.rs - Runtime axis position and traversal policies
use std::f64::consts::PI;

use super::grid::{GridError, SegmentGrid};

/// Mutable position of one axis on its segment grid.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    grid: SegmentGrid,
    current_idx: usize,
    current_pos: f64,
    direction_increment: bool,
}

impl AxisState {
    /// Place the axis on the first segment of its movement window.
    pub fn new(grid: SegmentGrid) -> Self {
        let current_idx = grid.movement_start_idx();
        let current_pos = grid.position_of(current_idx);
        Self {
            grid,
            current_idx,
            current_pos,
            direction_increment: true,
        }
    }

    pub fn grid(&self) -> &SegmentGrid {
        &self.grid
    }

    pub fn current_idx(&self) -> usize {
        self.current_idx
    }

    pub fn current_pos(&self) -> f64 {
        self.current_pos
    }

    pub fn direction_increment(&self) -> bool {
        self.direction_increment
    }

    pub fn is_at_min(&self) -> bool {
        self.current_idx <= self.grid.segment_min_idx()
    }

    pub fn is_at_max(&self) -> bool {
        self.current_idx >= self.grid.segment_max_idx()
    }

    /// Move one segment up or down.
    fn step(&mut self, increment: bool) {
        let length = self.grid.segment_length();
        if increment {
            self.current_idx += 1;
            self.current_pos += length;
        } else {
            self.current_idx -= 1;
            self.current_pos -= length;
        }
    }

    fn jump_to_origin(&mut self) {
        self.current_idx = 0;
        self.current_pos = 0.0;
    }

    /// Bounce between the full-grid min and max segments.
    ///
    /// The direction only flips on a grid boundary; in between, the previous
    /// direction is kept. A single-segment grid has nowhere to go and holds.
    fn oscillate(&mut self) {
        if self.grid.segment_min_idx() == self.grid.segment_max_idx() {
            return;
        }

        if self.is_at_min() {
            self.direction_increment = true;
        } else if self.is_at_max() {
            self.direction_increment = false;
        }
        self.step(self.direction_increment);
    }
}

/// Traversal policy of an axis over its segment grid.
pub trait Axis {
    fn state(&self) -> &AxisState;

    /// Move to the next segment according to this axis' policy.
    fn advance(&mut self);

    fn current_idx(&self) -> usize {
        self.state().current_idx()
    }

    fn current_pos(&self) -> f64 {
        self.state().current_pos()
    }

    fn is_at_min(&self) -> bool {
        self.state().is_at_min()
    }

    fn is_at_max(&self) -> bool {
        self.state().is_at_max()
    }

    fn grid(&self) -> &SegmentGrid {
        self.state().grid()
    }
}

/// Linear axis: oscillates from min to max and back.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAxis {
    state: AxisState,
}

impl LinearAxis {
    pub fn new(grid: SegmentGrid) -> Self {
        Self {
            state: AxisState::new(grid),
        }
    }
}

impl Axis for LinearAxis {
    fn state(&self) -> &AxisState {
        &self.state
    }

    fn advance(&mut self) {
        self.state.oscillate();
    }
}

/// Rotary axis whose travel is the perimeter of a circle.
///
/// With a movement window covering the whole perimeter the axis keeps
/// turning forward and wraps to zero after the last segment. Any narrower
/// window makes it oscillate like a [`LinearAxis`].
#[derive(Debug, Clone, PartialEq)]
pub struct CircularAxis {
    state: AxisState,
    radius: f64,
}

impl CircularAxis {
    pub fn new(
        radius: f64,
        segment_count: usize,
        movement_start_idx: usize,
        movement_stop_idx: usize,
    ) -> Result<Self, GridError> {
        let perimeter = 2.0 * PI * radius;
        let grid = SegmentGrid::new(0.0, perimeter, segment_count, movement_start_idx, movement_stop_idx)?;
        let mut state = AxisState::new(grid);
        if state.grid().window_spans_grid() {
            state.current_pos = 0.0;
        }
        Ok(Self { state, radius })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn perimeter(&self) -> f64 {
        self.state.grid().pos_max()
    }

    /// True when the movement window spans the whole circle.
    pub fn represents_circle(&self) -> bool {
        self.state.grid().window_spans_grid()
    }
}

impl Axis for CircularAxis {
    fn state(&self) -> &AxisState {
        &self.state
    }

    fn advance(&mut self) {
        if !self.represents_circle() {
            self.state.oscillate();
            return;
        }

        if self.state.is_at_max() {
            self.state.jump_to_origin();
        } else {
            self.state.step(true);
        }
    }
}
