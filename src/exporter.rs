// src/exporter.rs - Validate, sequence, render and write one scan program
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{ConfigError, MachineParameters};
use crate::file_manager::{FileError, FileManager};
use crate::gcode::{self, CircularFirstGenerator, CodeGenerator};
use crate::motion::{MachineError, MachineState, SequenceError, Sequencer};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),
    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),
    #[error("File error: {0}")]
    File(#[from] FileError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialization of the scan events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// G-code program with preamble and postamble
    #[default]
    Gcode,
    /// One JSON position event per line
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub force: bool,
    pub compress: bool,
    pub format: OutputFormat,
    pub step_budget: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./out.g"),
            force: false,
            compress: false,
            format: OutputFormat::Gcode,
            step_budget: None,
        }
    }
}

/// Program text held in memory until every event rendered successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedProgram {
    pub text: String,
    pub events: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub events: usize,
}

pub struct Exporter<G: CodeGenerator = CircularFirstGenerator> {
    generator: G,
    options: ExportOptions,
}

impl Exporter<CircularFirstGenerator> {
    pub fn new(options: ExportOptions) -> Self {
        Self::with_generator(CircularFirstGenerator::new(), options)
    }
}

impl<G: CodeGenerator> Exporter<G> {
    pub fn with_generator(generator: G, options: ExportOptions) -> Self {
        Self { generator, options }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Validate the parameters and render the whole scan.
    ///
    /// Nothing is returned unless the complete sequence was produced, so a
    /// failing scan never leaves a truncated program behind.
    pub fn render(&self, params: &MachineParameters) -> Result<RenderedProgram, ExportError> {
        params.validate()?;
        let mut machine = MachineState::validate_and_derive(params)?;
        for line in gcode::summary(&self.generator, &machine) {
            tracing::info!("{}", line);
        }

        match self.options.format {
            OutputFormat::Gcode => self.render_gcode(&mut machine),
            OutputFormat::Jsonl => self.render_jsonl(&mut machine),
        }
    }

    fn sequencer<'a>(&self, machine: &'a mut MachineState) -> Sequencer<'a> {
        let sequencer = Sequencer::new(machine);
        match self.options.step_budget {
            Some(budget) => sequencer.with_step_budget(budget),
            None => sequencer,
        }
    }

    fn render_gcode(&self, machine: &mut MachineState) -> Result<RenderedProgram, ExportError> {
        let preamble = self.generator.preamble(machine);

        let mut program = Vec::new();
        let mut events = 0;
        for event in self.sequencer(machine) {
            program.extend(self.generator.render_event(&event?));
            events += 1;
        }

        let postamble = self.generator.postamble(machine);

        let mut text = String::new();
        for section in [preamble, program, postamble] {
            let section = if self.options.compress {
                gcode::compress(section)
            } else {
                section
            };
            text.push_str(&section.join("\n"));
            text.push('\n');
        }
        Ok(RenderedProgram { text, events })
    }

    fn render_jsonl(&self, machine: &mut MachineState) -> Result<RenderedProgram, ExportError> {
        let mut text = String::new();
        let mut events = 0;
        for event in self.sequencer(machine) {
            text.push_str(&serde_json::to_string(&event?)?);
            text.push('\n');
            events += 1;
        }
        Ok(RenderedProgram { text, events })
    }

    /// Render the scan and write it to the configured output file.
    pub fn run(&self, params: &MachineParameters) -> Result<ExportReport, ExportError> {
        let rendered = self.render(params)?;
        let path = self.options.output.clone();
        let bytes = FileManager::new(self.options.force).write_gcode_file(&path, &rendered.text)?;
        tracing::info!(
            "exported {} bytes ({} positions) to file '{}' using generator '{}' ({})",
            bytes,
            rendered.events,
            path.display(),
            self.generator.name(),
            self.generator.description()
        );
        Ok(ExportReport {
            path,
            bytes,
            events: rendered.events,
        })
    }
}
