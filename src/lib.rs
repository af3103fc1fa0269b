//! # wifi-csi-sta
//!
//! ESP32 WiFi station that streams per-packet Channel State Information
//! (CSI) over the serial console, one self-delimiting `CSI_DATA` line per
//! measurement.
//!
//! ## Architecture
//!
//! Two state machines share the radio:
//! - [`station::StationMachine`] owns the association lifecycle with a
//!   bounded retry budget and settles into a single terminal
//!   [`station::Outcome`] per run.
//! - [`sink::CsiSink`] converts each driver callback into exactly one output
//!   line without blocking, allocating, or surfacing errors to the driver.
//!
//! The modules above are portable and host-testable; everything that touches
//! ESP-IDF lives under [`platform`] and is compiled only for the device.

pub mod capture;
pub mod config;
pub mod csi;
pub mod format;
pub mod sink;
pub mod station;
pub mod stats;

#[cfg(target_os = "espidf")]
pub mod platform;

pub use capture::{CaptureError, CsiRadio};
pub use config::{AuthThreshold, ConfigError, StationConfig};
pub use csi::{CsiConfig, CsiRecord};
pub use sink::{CsiSink, RecordWriter, WriteError};
pub use station::{LinkEvent, Outcome, OutcomeCell, StaState, StationMachine};
pub use stats::{CaptureStats, StatsSnapshot};
