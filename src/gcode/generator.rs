// src/gcode/generator.rs - Circular-first raster program for GRBL
use super::CodeGenerator;
use crate::motion::{Axis, MachineState, PositionEvent};

/// Sweeps the circular segments and takes one elevation step each time the
/// circular axis is back at its origin, triggering the servo at every stop.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircularFirstGenerator;

impl CircularFirstGenerator {
    pub fn new() -> Self {
        Self
    }

    /// GRBL `$` settings for the configured pass-through values.
    fn machine_settings(&self, machine: &MachineState) -> Vec<String> {
        let settings = machine.settings();
        let grbl_ids = [100, 102, 110, 112, 120, 122, 24, 25];

        let mut lines: Vec<String> = settings
            .pass_through()
            .into_iter()
            .zip(grbl_ids)
            .filter_map(|((name, value), id)| {
                value.map(|value| format!("${}={:.3} ; {}", id, value, name))
            })
            .collect();
        if !lines.is_empty() {
            lines.insert(0, "; machine settings".to_string());
            lines.push(String::new());
        }
        lines
    }
}

impl CodeGenerator for CircularFirstGenerator {
    fn name(&self) -> &'static str {
        "circular-first-then-elevation"
    }

    fn description(&self) -> &'static str {
        "Moves through circular segments (min to max and vice versa) and advances one elevation \
         step at each circular boundary. Repeats until circular and elevation max are reached."
    }

    fn preamble(&self, machine: &MachineState) -> Vec<String> {
        let mut lines = vec![String::new()];
        lines.extend(self.machine_settings(machine));
        lines.extend(
            [
                "; home",
                "$H",
                "; absolute positioning",
                "G90",
                "; stop spindle/servo",
                "M5",
                "; disable servo signal",
                "S0",
                "",
                "; feed rate",
            ]
            .map(String::from),
        );
        lines.push(format!("F{}", machine.settings().feed_rate_mm_min));
        lines.extend(
            [
                "; unit is mm",
                "G21",
                "; work in machine coordinates",
                "G53",
                "",
                "; set current position manually to (X,Z)=(0,0)",
                "G92 X0 Z0",
                "; move to position (0,0): eliminates one GRBL error message",
                "G1 X0 Z0",
                "",
                "; enable spindle/servo",
                "M3",
                "; move servo to min pos",
            ]
            .map(String::from),
        );
        lines.push(format!("S{}", machine.servo().release_position));
        lines.push("; disable stepper driver idling".to_string());
        lines.push("$1=255".to_string());
        lines.push("; go to Z-start position".to_string());
        lines.push(format!("Z{:.1}", machine.elevation().current_pos()));
        lines
    }

    fn render_event(&self, event: &PositionEvent) -> Vec<String> {
        let mut lines = vec![format!("X{:.1}", event.circular_position)];
        if event.circular_reference_reset {
            lines.push("; set current position manually to X=0".to_string());
            lines.push("G92 X0".to_string());
        }
        if let Some(elevation) = event.elevation_position {
            lines.push(format!("Z{:.1}", elevation));
        }

        let actuation = &event.actuation;
        lines.push(String::new());
        lines.push(format!("G4 P{:.1}", actuation.pre_delay_s));
        lines.push(format!("S{}", actuation.actuate_position));
        lines.push(format!("G4 P{:.1}", actuation.actuate_delay_s));
        lines.push(format!("S{}", actuation.release_position));
        lines.push(format!("G4 P{:.1}", actuation.post_delay_s));
        lines
    }

    fn postamble(&self, _machine: &MachineState) -> Vec<String> {
        [
            "",
            "; re-enable stepper driver idling of 25ms and request movement of 0mm to activate new parameter",
            "$1=25",
            "G91",
            "Z+0.01",
            "Z-0.01",
            "",
            "; stop servo signal, stop spindle, end program",
            "S0",
            "M5",
            "M2",
            "",
            "; program terminated",
        ]
        .map(String::from)
        .into()
    }
}
