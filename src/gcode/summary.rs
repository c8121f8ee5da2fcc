// src/gcode/summary.rs - Human readable parameter report
use super::CodeGenerator;
use crate::motion::{Axis, MachineState};

/// Report the generator and the derived machine parameters, one line each.
pub fn summary(generator: &dyn CodeGenerator, machine: &MachineState) -> Vec<String> {
    let circular = machine.circular();
    let elevation = machine.elevation();
    let servo = machine.servo();

    vec![
        format!("Generator: {}", generator.name()),
        format!("  {}", generator.description()),
        "Machine settings".to_string(),
        format!("  feed rate [mm/min]:   {}", machine.settings().feed_rate_mm_min),
        "Circular info".to_string(),
        "  x-axis [mm]".to_string(),
        format!("    min (soft limit):   {:.3}", circular.grid().pos_min()),
        format!("    max (soft limit):   {:.3}", circular.grid().pos_max()),
        format!("    travel (perimeter): {:.3}", circular.perimeter()),
        format!("    radius:             {}", circular.radius()),
        format!("  segment(s):           {}", circular.grid().segment_count()),
        format!("    length [mm]:        {:.3}", circular.grid().segment_length()),
        format!("    move from #:        {}", circular.grid().movement_start_idx()),
        format!("    move to   #:        {}", circular.grid().movement_stop_idx()),
        format!("    represent circle:   {}", circular.represents_circle()),
        "Elevation info".to_string(),
        "  z-axis [mm]".to_string(),
        format!("    min:                {}", elevation.grid().pos_min()),
        format!("    max:                {}", elevation.grid().pos_max()),
        format!("    travel:             {}", elevation.grid().travel()),
        format!("  segment(s):           {}", elevation.grid().segment_count()),
        format!("    length [mm]:        {:.3}", elevation.grid().segment_length()),
        format!("    move from #:        {}", elevation.grid().movement_start_idx()),
        format!("    move to   #:        {}", elevation.grid().movement_stop_idx()),
        "Servo info".to_string(),
        "  position".to_string(),
        format!("    release:            {}", servo.release_position),
        format!("    actuate:            {}", servo.actuate_position),
        "  actuate delay [s]".to_string(),
        format!("    pre actuate:        {:.1}", servo.pre_delay_s),
        format!("    while actuating:    {:.1}", servo.actuate_delay_s),
        format!("    post actuate:       {:.1}", servo.post_delay_s),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MachineParameters;
    use crate::gcode::CircularFirstGenerator;

    #[test]
    fn test_summary_reports_derived_values() {
        let mut params = MachineParameters::default();
        params.circular.movement_stop = 4;
        let machine = MachineState::validate_and_derive(&params).unwrap();
        let lines = summary(&CircularFirstGenerator, &machine);
        assert_eq!(lines[0], "Generator: circular-first-then-elevation");
        assert!(lines.iter().any(|l| l.ends_with("represent circle:   false")));
        assert!(lines.iter().any(|l| l.ends_with("travel:             400")));
        assert!(lines.iter().any(|l| l.ends_with("pre actuate:        0.8")));
    }
}
