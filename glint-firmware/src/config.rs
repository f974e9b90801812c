//! Panel configuration
//!
//! Compiled in from `panel.toml`; build.rs has already checked every
//! value, the asserts below only catch what the generator cannot.

use glint_core::config::{PanelConfig, TouchCalibration};

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));

/// Pixels in one frame
pub const PIXELS: usize = PANEL.pixels();

/// Bytes in one RGB565 frame
pub const FRAME_BYTES: usize = PANEL.frame_bytes();

const _: () = assert!(PANEL.touch.validate().is_ok());
const _: () = assert!(PANEL.max_transfer > 0);
