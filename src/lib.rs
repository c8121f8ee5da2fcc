//! # scanrig
//!
//! Plans a raster scan for a rig with a rotary (circular) axis, a linear
//! (elevation) axis and a servo-actuated shutter, and renders it as a GRBL
//! G-code program.
//!
//! The circular axis sweeps its segments; each time it is back at its first
//! segment the elevation axis moves one segment. The servo fires once at
//! every stop.
//!
//! ```no_run
//! use scanrig::config::MachineParameters;
//! use scanrig::exporter::{ExportOptions, Exporter};
//!
//! let params = MachineParameters::default();
//! let report = Exporter::new(ExportOptions::default()).run(&params)?;
//! println!("{} bytes", report.bytes);
//! # Ok::<(), scanrig::exporter::ExportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod exporter;
pub mod file_manager;
pub mod gcode;
pub mod motion;

pub use config::{ConfigError, MachineParameters};
pub use exporter::{ExportError, ExportOptions, Exporter, OutputFormat};
pub use motion::{MachineState, PositionEvent, Sequencer};
