// Integration tests for program rendering and file export

#[cfg(test)]
mod tests {
    use scanrig::config::MachineParameters;
    use scanrig::exporter::{ExportError, ExportOptions, Exporter, OutputFormat};
    use scanrig::file_manager::FileError;
    use scanrig::motion::{MachineError, SequenceError};
    use std::fs;
    use tempfile::tempdir;

    // 2 circular x 2 elevation segments: four stops
    fn small_params() -> MachineParameters {
        let mut params = MachineParameters::default();
        params.circular.segments = 2;
        params.circular.movement_stop = 1;
        params.elevation.segments = 2;
        params.elevation.movement_stop = 1;
        params
    }

    fn count(text: &str, line: &str) -> usize {
        text.lines().filter(|l| *l == line).count()
    }

    #[test]
    fn test_render_gcode_program() {
        let exporter = Exporter::new(ExportOptions::default());
        let rendered = exporter.render(&small_params()).unwrap();
        assert_eq!(rendered.events, 4);

        let text = &rendered.text;
        assert!(text.ends_with("; program terminated\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("G4 P")).count(), 12);
        assert_eq!(count(text, "S1000"), 4);
        assert_eq!(count(text, "G92 X0"), 1);
        assert_eq!(count(text, "Z200.0"), 1);
        // preamble start position plus the first event
        assert_eq!(count(text, "Z0.0"), 2);
        assert_eq!(count(text, "M2"), 1);

        let homing = text.find("$H").unwrap();
        let first_move = text.find("X0.0").unwrap();
        let program_end = text.find("M2").unwrap();
        assert!(homing < first_move && first_move < program_end);
    }

    #[test]
    fn test_render_compressed() {
        let options = ExportOptions {
            compress: true,
            ..ExportOptions::default()
        };
        let rendered = Exporter::new(options).render(&small_params()).unwrap();
        assert!(rendered.text.ends_with("M2\n"));
        for line in rendered.text.lines() {
            assert!(!line.is_empty());
            assert!(!line.starts_with(';'));
            assert_eq!(line, line.trim());
        }
        assert_eq!(count(&rendered.text, "G92 X0"), 1);
    }

    #[test]
    fn test_render_jsonl() {
        let options = ExportOptions {
            format: OutputFormat::Jsonl,
            ..ExportOptions::default()
        };
        let rendered = Exporter::new(options).render(&small_params()).unwrap();
        let events: Vec<serde_json::Value> = rendered
            .text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0]["elevation_position"], serde_json::json!(0.0));
        assert!(events[1]["elevation_position"].is_null());
        assert_eq!(events[2]["circular_reference_reset"], serde_json::json!(true));
        assert_eq!(events[3]["actuation"]["actuate_position"], serde_json::json!(1000));
    }

    #[test]
    fn test_run_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.g");
        let options = ExportOptions {
            output: path.clone(),
            ..ExportOptions::default()
        };
        let report = Exporter::new(options).run(&small_params()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(report.bytes, written.len() as u64);
        assert_eq!(report.events, 4);
        assert_eq!(report.path, path);
    }

    #[test]
    fn test_run_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.g");
        fs::write(&path, "previous").unwrap();
        let options = ExportOptions {
            output: path.clone(),
            ..ExportOptions::default()
        };
        let result = Exporter::new(options.clone()).run(&small_params());
        assert!(matches!(result, Err(ExportError::File(FileError::AlreadyExists(_)))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");

        let forced = ExportOptions { force: true, ..options };
        Exporter::new(forced).run(&small_params()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("M2"));
    }

    #[test]
    fn test_invalid_grid_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.g");
        let mut params = small_params();
        params.circular.movement_stop = 2;
        let options = ExportOptions {
            output: path.clone(),
            ..ExportOptions::default()
        };
        let result = Exporter::new(options).run(&params);
        assert!(matches!(result, Err(ExportError::Machine(MachineError::InvalidGrid { .. }))));
        assert!(!path.exists());
    }

    #[test]
    fn test_budget_exceeded_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scan.g");
        let options = ExportOptions {
            output: path.clone(),
            step_budget: Some(2),
            ..ExportOptions::default()
        };
        let result = Exporter::new(options).run(&small_params());
        assert!(matches!(
            result,
            Err(ExportError::Sequence(SequenceError::ExceededStepBudget { budget: 2 }))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_out_of_range_servo_rejected() {
        let mut params = small_params();
        params.servo.release_position = 20_000;
        let result = Exporter::new(ExportOptions::default()).render(&params);
        assert!(matches!(result, Err(ExportError::Config(_))));
    }

    #[test]
    fn test_identical_parameters_identical_program() {
        let exporter = Exporter::new(ExportOptions::default());
        let a = exporter.render(&MachineParameters::default()).unwrap();
        let b = exporter.render(&MachineParameters::default()).unwrap();
        assert_eq!(a, b);
    }
}
