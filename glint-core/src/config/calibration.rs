//! Resistive touch calibration
//!
//! Raw ADC readings at the physical panel edges, measured once per
//! sensor model. Readings outside the range are clamped, never
//! extrapolated.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calibration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// An axis has `min >= max`
    EmptyRange,
}

/// Raw sensor span per axis plus the fixed axis orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchCalibration {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    /// Sensor X drives screen Y and vice versa
    pub swap_axes: bool,
}

impl TouchCalibration {
    /// ADS7846 on the Waveshare 2.8" (A) panel
    pub const ADS7846_WAVESHARE_28: Self = Self {
        x_min: 198,
        x_max: 3679,
        y_min: 292,
        y_max: 3800,
        swap_axes: true,
    };

    pub const fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32, swap_axes: bool) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            swap_axes,
        }
    }

    /// Same ranges with a different orientation
    pub const fn with_swap(self, swap_axes: bool) -> Self {
        Self { swap_axes, ..self }
    }

    /// Check both axes have a non-empty span
    pub const fn validate(&self) -> Result<(), CalibrationError> {
        if self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(CalibrationError::EmptyRange);
        }
        Ok(())
    }
}

impl Default for TouchCalibration {
    fn default() -> Self {
        Self::ADS7846_WAVESHARE_28
    }
}
