//! Configuration types
//!
//! Board-agnostic panel and touch calibration constants. These are fixed
//! at build time; the firmware generates them from `panel.toml`.

pub mod calibration;
pub mod panel;

pub use calibration::{CalibrationError, TouchCalibration};
pub use panel::PanelConfig;
