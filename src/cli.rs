//! Command line interface: output options plus per-parameter overrides.
//!
//! Precedence for every scan parameter is command line, then the matching
//! `SCANRIG_*` environment variable, then the TOML config file, then the
//! built-in default.

use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

use crate::config::MachineParameters;
use crate::exporter::{ExportOptions, OutputFormat};

/// Scan rig G-code generator
#[derive(Parser, Debug)]
#[command(
    name = "scanrig",
    version,
    about = "Generate a circular/elevation raster scan program with a servo trigger at every stop."
)]
pub struct Cli {
    /// Path to a TOML config file (overridden by the options below)
    #[arg(long, env = "SCANRIG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub overrides: ParameterOverrides,
}

#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "Output")]
pub struct OutputArgs {
    /// Output file name
    #[arg(short, long, env = "SCANRIG_OUTPUT", default_value = "./out.g")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,

    /// Remove comments and empty lines, strip whitespace
    #[arg(short, long)]
    pub compress: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Gcode)]
    pub format: OutputFormat,

    /// Maximum number of positions before the scan is aborted
    #[arg(long, env = "SCANRIG_STEP_BUDGET")]
    pub step_budget: Option<usize>,
}

impl OutputArgs {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            output: self.output.clone(),
            force: self.force,
            compress: self.compress,
            format: self.format,
            step_budget: self.step_budget,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Scan parameters")]
pub struct ParameterOverrides {
    /// Feed rate in [mm/minute]
    #[arg(long, env = "SCANRIG_FEED_RATE_MM_MIN")]
    pub feed_rate_mm_min: Option<f64>,

    /// Circle radius in [mm]
    #[arg(long, env = "SCANRIG_CIRCLE_RADIUS")]
    pub circle_radius: Option<f64>,

    /// Segments per circle perimeter
    #[arg(long, env = "SCANRIG_CIRCLE_SEGMENTS")]
    pub circle_segments: Option<usize>,

    /// First circle segment to visit
    #[arg(long, env = "SCANRIG_CIRCLE_SEGMENT_START")]
    pub circle_segment_start: Option<usize>,

    /// Last circle segment to visit, range [start, circle_segments-1]
    #[arg(long, env = "SCANRIG_CIRCLE_SEGMENT_END")]
    pub circle_segment_end: Option<usize>,

    /// Min position along the z-axis in [mm] (approximate, not an angle)
    #[arg(long, env = "SCANRIG_ELEVATION_MIN", allow_negative_numbers = true)]
    pub elevation_min: Option<f64>,

    /// Max position along the z-axis in [mm] (approximate, not an angle)
    #[arg(long, env = "SCANRIG_ELEVATION_MAX", allow_negative_numbers = true)]
    pub elevation_max: Option<f64>,

    /// Segments per total elevation travel
    #[arg(long, env = "SCANRIG_ELEVATION_SEGMENTS")]
    pub elevation_segments: Option<usize>,

    /// First elevation segment to visit
    #[arg(long, env = "SCANRIG_ELEVATION_SEGMENT_START")]
    pub elevation_segment_start: Option<usize>,

    /// Last elevation segment to visit, range [start, elevation_segments-1]
    #[arg(long, env = "SCANRIG_ELEVATION_SEGMENT_END")]
    pub elevation_segment_end: Option<usize>,

    /// Servo position when not actuating, range [0-10000]; 0=off, 1=min, 10000=max
    #[arg(long, env = "SCANRIG_SERVO_POSITION_RELEASE")]
    pub servo_position_release: Option<u32>,

    /// Servo position when actuating, range [0-10000]; 0=off, 1=min, 10000=max
    #[arg(long, env = "SCANRIG_SERVO_POSITION_ACTUATE")]
    pub servo_position_actuate: Option<u32>,

    /// Delay in [s] to wait before actuating
    #[arg(long, env = "SCANRIG_SERVO_PRE_ACTUATE_DWELL")]
    pub servo_pre_actuate_dwell: Option<f64>,

    /// Delay in [s] to wait while actuated
    #[arg(long, env = "SCANRIG_SERVO_ACTUATE_DWELL")]
    pub servo_actuate_dwell: Option<f64>,

    /// Delay in [s] to wait after release
    #[arg(long, env = "SCANRIG_SERVO_POST_ACTUATE_DWELL")]
    pub servo_post_actuate_dwell: Option<f64>,
}

fn set<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

impl ParameterOverrides {
    /// Replace every parameter that was given on the command line or in the
    /// environment.
    pub fn apply(&self, params: &mut MachineParameters) {
        set(&mut params.machine.feed_rate_mm_min, self.feed_rate_mm_min);

        set(&mut params.circular.radius_mm, self.circle_radius);
        set(&mut params.circular.segments, self.circle_segments);
        set(&mut params.circular.movement_start, self.circle_segment_start);
        set(&mut params.circular.movement_stop, self.circle_segment_end);

        set(&mut params.elevation.min_mm, self.elevation_min);
        set(&mut params.elevation.max_mm, self.elevation_max);
        set(&mut params.elevation.segments, self.elevation_segments);
        set(&mut params.elevation.movement_start, self.elevation_segment_start);
        set(&mut params.elevation.movement_stop, self.elevation_segment_end);

        set(&mut params.servo.release_position, self.servo_position_release);
        set(&mut params.servo.actuate_position, self.servo_position_actuate);
        set(&mut params.servo.pre_actuate_dwell_s, self.servo_pre_actuate_dwell);
        set(&mut params.servo.actuate_dwell_s, self.servo_actuate_dwell);
        set(&mut params.servo.post_actuate_dwell_s, self.servo_post_actuate_dwell);
    }
}
