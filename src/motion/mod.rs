// src/motion/mod.rs - Axis model and scan traversal

pub mod axis;
pub mod grid;
pub mod machine;
pub mod sequencer;

pub use axis::{Axis, AxisState, CircularAxis, LinearAxis};
pub use grid::{GridError, SegmentGrid};
pub use machine::{AxisKind, MachineError, MachineState, ServoParameters};
pub use sequencer::{Actuation, PositionEvent, SequenceError, Sequencer};
