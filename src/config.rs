//! # Scan Rig Configuration
//!
//! Machine, axis and servo parameters for a scan, loaded from TOML and
//! overridable from the command line.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! [machine]
//! feed_rate_mm_min = 8000.0
//! steps_per_mm_x = 80.0
//!
//! [circular]
//! radius_mm = 250.0
//! segments = 12
//! movement_stop = 11
//!
//! [elevation]
//! min_mm = 0.0
//! max_mm = 300.0
//! segments = 6
//! movement_stop = 5
//!
//! [servo]
//! actuate_position = 1200
//! pre_actuate_dwell_s = 0.5
//! ```
//!
//! Every field is optional; missing values fall back to the defaults below.
//! Grid consistency (movement windows, travel) is checked later by
//! [`crate::motion::MachineState::validate_and_derive`]; this module only
//! range-checks individual values.

// src/config.rs - Single configuration file
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Highest servo position the controller accepts (`S` word).
pub const SERVO_POSITION_MAX: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Complete parameter set for one scan.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MachineParameters {
    #[serde(default)]
    pub machine: MachineSettings,
    #[serde(default)]
    pub circular: CircularSettings,
    #[serde(default)]
    pub elevation: ElevationSettings,
    #[serde(default)]
    pub servo: ServoSettings,
}

/// Feed rate plus GRBL settings forwarded untouched into the preamble.
/// X is the circular axis, Z the elevation axis.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MachineSettings {
    #[serde(default = "default_feed_rate")]
    pub feed_rate_mm_min: f64,
    #[serde(default)]
    pub steps_per_mm_x: Option<f64>,
    #[serde(default)]
    pub steps_per_mm_z: Option<f64>,
    #[serde(default)]
    pub max_rate_x: Option<f64>,
    #[serde(default)]
    pub max_rate_z: Option<f64>,
    #[serde(default)]
    pub acceleration_x: Option<f64>,
    #[serde(default)]
    pub acceleration_z: Option<f64>,
    #[serde(default)]
    pub homing_feed_rate: Option<f64>,
    #[serde(default)]
    pub homing_seek_rate: Option<f64>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            feed_rate_mm_min: default_feed_rate(),
            steps_per_mm_x: None,
            steps_per_mm_z: None,
            max_rate_x: None,
            max_rate_z: None,
            acceleration_x: None,
            acceleration_z: None,
            homing_feed_rate: None,
            homing_seek_rate: None,
        }
    }
}

impl MachineSettings {
    /// Pass-through values paired with their names, in preamble order.
    pub fn pass_through(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("steps_per_mm_x", self.steps_per_mm_x),
            ("steps_per_mm_z", self.steps_per_mm_z),
            ("max_rate_x", self.max_rate_x),
            ("max_rate_z", self.max_rate_z),
            ("acceleration_x", self.acceleration_x),
            ("acceleration_z", self.acceleration_z),
            ("homing_feed_rate", self.homing_feed_rate),
            ("homing_seek_rate", self.homing_seek_rate),
        ]
    }
}

/// Rotary axis: segments laid out along the circle perimeter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CircularSettings {
    #[serde(default = "default_circle_radius")]
    pub radius_mm: f64,
    #[serde(default = "default_segments")]
    pub segments: usize,
    #[serde(default)]
    pub movement_start: usize,
    #[serde(default = "default_movement_stop")]
    pub movement_stop: usize,
}

impl Default for CircularSettings {
    fn default() -> Self {
        Self {
            radius_mm: default_circle_radius(),
            segments: default_segments(),
            movement_start: 0,
            movement_stop: default_movement_stop(),
        }
    }
}

/// Linear axis. Positions are approximate machine millimetres, not angles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ElevationSettings {
    #[serde(default)]
    pub min_mm: f64,
    #[serde(default = "default_elevation_max")]
    pub max_mm: f64,
    #[serde(default = "default_segments")]
    pub segments: usize,
    #[serde(default)]
    pub movement_start: usize,
    #[serde(default = "default_movement_stop")]
    pub movement_stop: usize,
}

impl Default for ElevationSettings {
    fn default() -> Self {
        Self {
            min_mm: 0.0,
            max_mm: default_elevation_max(),
            segments: default_segments(),
            movement_start: 0,
            movement_stop: default_movement_stop(),
        }
    }
}

/// Shutter servo. Positions use the `S` word range: 0 = signal off,
/// 1 = servo min, 10000 = servo max.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServoSettings {
    #[serde(default = "default_release_position")]
    pub release_position: u32,
    #[serde(default = "default_actuate_position")]
    pub actuate_position: u32,
    #[serde(default = "default_pre_actuate_dwell")]
    pub pre_actuate_dwell_s: f64,
    #[serde(default = "default_actuate_dwell")]
    pub actuate_dwell_s: f64,
    #[serde(default = "default_post_actuate_dwell")]
    pub post_actuate_dwell_s: f64,
}

impl Default for ServoSettings {
    fn default() -> Self {
        Self {
            release_position: default_release_position(),
            actuate_position: default_actuate_position(),
            pre_actuate_dwell_s: default_pre_actuate_dwell(),
            actuate_dwell_s: default_actuate_dwell(),
            post_actuate_dwell_s: default_post_actuate_dwell(),
        }
    }
}

impl MachineParameters {
    /// Range-check individual values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("machine.feed_rate_mm_min", self.machine.feed_rate_mm_min)?;
        for (name, value) in self.machine.pass_through() {
            if let Some(value) = value {
                positive(name, value)?;
            }
        }

        positive("circular.radius_mm", self.circular.radius_mm)?;
        non_zero("circular.segments", self.circular.segments)?;

        if !self.elevation.min_mm.is_finite() {
            return Err(invalid("elevation.min_mm", "must be finite"));
        }
        if !self.elevation.max_mm.is_finite() {
            return Err(invalid("elevation.max_mm", "must be finite"));
        }
        non_zero("elevation.segments", self.elevation.segments)?;

        servo_position("servo.release_position", self.servo.release_position)?;
        servo_position("servo.actuate_position", self.servo.actuate_position)?;
        dwell("servo.pre_actuate_dwell_s", self.servo.pre_actuate_dwell_s)?;
        dwell("servo.actuate_dwell_s", self.servo.actuate_dwell_s)?;
        dwell("servo.post_actuate_dwell_s", self.servo.post_actuate_dwell_s)?;
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a finite value > 0, got {}", value)))
    }
}

fn non_zero(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(name, "must be at least 1"));
    }
    Ok(())
}

fn servo_position(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > SERVO_POSITION_MAX {
        return Err(invalid(
            name,
            format!("must be within [0, {}], got {}", SERVO_POSITION_MAX, value),
        ));
    }
    Ok(())
}

fn dwell(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be a finite value >= 0, got {}", value)))
    }
}

// Default value functions
fn default_feed_rate() -> f64 { 10_000.0 }
fn default_circle_radius() -> f64 { 1000.0 }
fn default_segments() -> usize { 10 }
fn default_movement_stop() -> usize { 9 }
fn default_elevation_max() -> f64 { 400.0 }
fn default_release_position() -> u32 { 1 }
fn default_actuate_position() -> u32 { 1000 }
fn default_pre_actuate_dwell() -> f64 { 0.8 }
fn default_actuate_dwell() -> f64 { 0.2 }
fn default_post_actuate_dwell() -> f64 { 0.2 }

/// Load scan parameters from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<MachineParameters, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(params) => Ok(params),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}
