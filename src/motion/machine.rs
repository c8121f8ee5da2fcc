// src/motion/machine.rs - Validated machine model owned by one scan
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::axis::{Axis, CircularAxis, LinearAxis};
use super::grid::{GridError, SegmentGrid};
use crate::config::{MachineParameters, MachineSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Circular,
    Elevation,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Circular => write!(f, "circular"),
            AxisKind::Elevation => write!(f, "elevation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    #[error("invalid grid for {axis} axis: {source}")]
    InvalidGrid {
        axis: AxisKind,
        #[source]
        source: GridError,
    },
}

/// Timing and positions of one trigger-and-release cycle of the servo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServoParameters {
    pub release_position: u32,
    pub actuate_position: u32,
    pub pre_delay_s: f64,
    pub actuate_delay_s: f64,
    pub post_delay_s: f64,
}

/// Both axes, the servo block and the pass-through machine settings.
#[derive(Debug, Clone)]
pub struct MachineState {
    pub(crate) circular: CircularAxis,
    pub(crate) elevation: LinearAxis,
    servo: ServoParameters,
    settings: MachineSettings,
}

impl MachineState {
    /// Build and validate both axis grids. The circular axis goes first so
    /// its perimeter is derived before the elevation grid is checked.
    pub fn validate_and_derive(params: &MachineParameters) -> Result<Self, MachineError> {
        let circular = CircularAxis::new(
            params.circular.radius_mm,
            params.circular.segments,
            params.circular.movement_start,
            params.circular.movement_stop,
        )
        .map_err(|source| MachineError::InvalidGrid {
            axis: AxisKind::Circular,
            source,
        })?;

        let elevation_grid = SegmentGrid::new(
            params.elevation.min_mm,
            params.elevation.max_mm,
            params.elevation.segments,
            params.elevation.movement_start,
            params.elevation.movement_stop,
        )
        .map_err(|source| MachineError::InvalidGrid {
            axis: AxisKind::Elevation,
            source,
        })?;
        let elevation = LinearAxis::new(elevation_grid);

        tracing::debug!(
            "Derived circular perimeter {:.3} mm, segment length {:.3} mm, full circle: {}",
            circular.perimeter(),
            circular.grid().segment_length(),
            circular.represents_circle()
        );
        tracing::debug!(
            "Derived elevation travel {:.3} mm, segment length {:.3} mm",
            elevation.grid().travel(),
            elevation.grid().segment_length()
        );

        Ok(Self {
            circular,
            elevation,
            servo: ServoParameters {
                release_position: params.servo.release_position,
                actuate_position: params.servo.actuate_position,
                pre_delay_s: params.servo.pre_actuate_dwell_s,
                actuate_delay_s: params.servo.actuate_dwell_s,
                post_delay_s: params.servo.post_actuate_dwell_s,
            },
            settings: params.machine.clone(),
        })
    }

    pub fn circular(&self) -> &CircularAxis {
        &self.circular
    }

    pub fn elevation(&self) -> &LinearAxis {
        &self.elevation
    }

    pub fn servo(&self) -> &ServoParameters {
        &self.servo
    }

    pub fn settings(&self) -> &MachineSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let machine = MachineState::validate_and_derive(&MachineParameters::default()).unwrap();
        assert!(machine.circular().represents_circle());
        assert_eq!(machine.circular().current_idx(), 0);
        assert_eq!(machine.elevation().current_idx(), 0);
        assert_eq!(machine.elevation().grid().segment_length(), 40.0);
        assert_eq!(machine.servo().actuate_position, 1000);
    }

    #[test]
    fn test_elevation_starts_inside_window() {
        let mut params = MachineParameters::default();
        params.elevation.min_mm = 100.0;
        params.elevation.max_mm = 200.0;
        params.elevation.segments = 4;
        params.elevation.movement_start = 2;
        params.elevation.movement_stop = 3;
        let machine = MachineState::validate_and_derive(&params).unwrap();
        assert_eq!(machine.elevation().current_idx(), 2);
        assert_eq!(machine.elevation().current_pos(), 150.0);
    }

    #[test]
    fn test_circular_error_reported_first() {
        let mut params = MachineParameters::default();
        params.circular.movement_stop = 10;
        params.elevation.segments = 0;
        let err = MachineState::validate_and_derive(&params).unwrap_err();
        assert!(matches!(
            err,
            MachineError::InvalidGrid {
                axis: AxisKind::Circular,
                source: GridError::InvalidMovementWindow { .. }
            }
        ));
    }

    #[test]
    fn test_elevation_error() {
        let mut params = MachineParameters::default();
        params.elevation.max_mm = params.elevation.min_mm;
        let err = MachineState::validate_and_derive(&params).unwrap_err();
        assert!(matches!(
            err,
            MachineError::InvalidGrid {
                axis: AxisKind::Elevation,
                source: GridError::InvalidTravel { .. }
            }
        ));
        assert!(err.to_string().starts_with("invalid grid for elevation axis"));
    }
}
