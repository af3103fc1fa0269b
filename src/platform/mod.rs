//! Module: platform
//!
//! Purpose: ESP-IDF bindings for the portable core — the persistent config
//! store, the WiFi lifecycle, CSI activation, and the console transport.
//! Compiled only for `target_os = "espidf"`.

pub mod capture;
pub mod console;
pub mod nvs;
pub mod wifi;
