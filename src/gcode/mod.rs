// src/gcode/mod.rs
//! Rendering of a scan into GRBL-flavoured G-code.

pub mod compress;
pub mod generator;
pub mod summary;

pub use compress::compress;
pub use generator::CircularFirstGenerator;
pub use summary::summary;

use crate::motion::{MachineState, PositionEvent};

/// Turns a validated machine and its scan events into program text.
///
/// `preamble` is rendered before the sequencer starts, so it sees the axes
/// at their start positions. `postamble` only needs the static settings.
pub trait CodeGenerator {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn preamble(&self, machine: &MachineState) -> Vec<String>;

    fn render_event(&self, event: &PositionEvent) -> Vec<String>;

    fn postamble(&self, machine: &MachineState) -> Vec<String>;
}
