// src/motion/grid.rs - Axis travel range split into equal segments
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("segment count must be greater than zero")]
    NoSegments,
    #[error("travel must be positive and finite (min {min}, max {max})")]
    InvalidTravel { min: f64, max: f64 },
    #[error("movement window {start}..={stop} is out of order or outside segments 0..={max_idx}")]
    InvalidMovementWindow {
        start: usize,
        stop: usize,
        max_idx: usize,
    },
}

/// Travel range of one axis divided into `segment_count` equal segments,
/// plus the window of segments the scan is meant to visit.
///
/// Only constructible through [`SegmentGrid::new`], so every instance
/// satisfies `pos_max > pos_min`, `segment_count > 0` and
/// `0 <= movement_start_idx <= movement_stop_idx <= segment_count - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGrid {
    pos_min: f64,
    pos_max: f64,
    segment_count: usize,
    segment_length: f64,
    movement_start_idx: usize,
    movement_stop_idx: usize,
}

impl SegmentGrid {
    /// Validate the raw bounds and derive the segment length.
    pub fn new(
        pos_min: f64,
        pos_max: f64,
        segment_count: usize,
        movement_start_idx: usize,
        movement_stop_idx: usize,
    ) -> Result<Self, GridError> {
        if segment_count == 0 {
            return Err(GridError::NoSegments);
        }

        let travel = pos_max - pos_min;
        if !pos_min.is_finite() || !pos_max.is_finite() || !(travel > 0.0) {
            return Err(GridError::InvalidTravel {
                min: pos_min,
                max: pos_max,
            });
        }

        let max_idx = segment_count - 1;
        if movement_start_idx > movement_stop_idx || movement_stop_idx > max_idx {
            return Err(GridError::InvalidMovementWindow {
                start: movement_start_idx,
                stop: movement_stop_idx,
                max_idx,
            });
        }

        Ok(Self {
            pos_min,
            pos_max,
            segment_count,
            segment_length: travel / segment_count as f64,
            movement_start_idx,
            movement_stop_idx,
        })
    }

    pub fn pos_min(&self) -> f64 {
        self.pos_min
    }

    pub fn pos_max(&self) -> f64 {
        self.pos_max
    }

    pub fn travel(&self) -> f64 {
        self.pos_max - self.pos_min
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    pub fn segment_min_idx(&self) -> usize {
        0
    }

    pub fn segment_max_idx(&self) -> usize {
        self.segment_count - 1
    }

    pub fn movement_start_idx(&self) -> usize {
        self.movement_start_idx
    }

    pub fn movement_stop_idx(&self) -> usize {
        self.movement_stop_idx
    }

    /// Number of segments inside the movement window.
    pub fn movement_len(&self) -> usize {
        self.movement_stop_idx - self.movement_start_idx + 1
    }

    /// True when the movement window covers every segment of the grid.
    pub fn window_spans_grid(&self) -> bool {
        self.segment_count == self.movement_len()
    }

    /// Physical position of the start of segment `idx`.
    pub fn position_of(&self, idx: usize) -> f64 {
        self.pos_min + idx as f64 * self.segment_length
    }
}
