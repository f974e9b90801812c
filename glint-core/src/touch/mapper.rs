//! Raw sensor to screen coordinate mapping
//!
//! `clamp -> normalize -> (swap) -> scale -> truncate`, in integer
//! arithmetic. Each axis is monotonic non-decreasing in its raw input,
//! the calibration minimum maps to pixel 0 and the maximum to the last
//! pixel.

use super::ScreenPoint;
use crate::config::{CalibrationError, TouchCalibration};

/// Calibrated mapping for one panel orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoordinateMapper {
    cal: TouchCalibration,
    width: u16,
    height: u16,
}

impl CoordinateMapper {
    /// Build a mapper; both calibration spans must be non-empty
    pub fn new(
        cal: TouchCalibration,
        width: u16,
        height: u16,
    ) -> Result<Self, CalibrationError> {
        cal.validate()?;
        Ok(Self { cal, width, height })
    }

    pub fn calibration(&self) -> &TouchCalibration {
        &self.cal
    }

    /// Screen size `(width, height)`
    pub fn screen(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Map a raw reading to a pixel inside the screen
    pub fn map(&self, raw_x: i32, raw_y: i32) -> ScreenPoint {
        let c = &self.cal;
        if c.swap_axes {
            ScreenPoint {
                x: scale(raw_y, c.y_min, c.y_max, self.width),
                y: scale(raw_x, c.x_min, c.x_max, self.height),
            }
        } else {
            ScreenPoint {
                x: scale(raw_x, c.x_min, c.x_max, self.width),
                y: scale(raw_y, c.y_min, c.y_max, self.height),
            }
        }
    }
}

fn scale(raw: i32, min: i32, max: i32, dim: u16) -> u16 {
    let clamped = i64::from(raw.clamp(min, max));
    let span = i64::from(max) - i64::from(min);
    let offset = clamped - i64::from(min);
    let scaled = offset * i64::from(dim) / span;
    // raw == max lands exactly on `dim`, one past the last pixel
    scaled.min(i64::from(dim.saturating_sub(1))) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: TouchCalibration = TouchCalibration::ADS7846_WAVESHARE_28;

    fn unswapped() -> CoordinateMapper {
        CoordinateMapper::new(CAL.with_swap(false), 240, 320).unwrap()
    }

    #[test]
    fn test_range_ends() {
        let m = unswapped();
        assert_eq!(m.map(198, 292), ScreenPoint::new(0, 0));
        assert_eq!(m.map(3679, 3800), ScreenPoint::new(239, 319));
    }

    #[test]
    fn test_clamps_instead_of_extrapolating() {
        let m = unswapped();
        assert_eq!(m.map(0, -50), m.map(198, 292));
        assert_eq!(m.map(9999, 4095), m.map(3679, 3800));
    }

    #[test]
    fn test_midpoint() {
        let p = unswapped().map(1938, 2046);
        assert_eq!(p, ScreenPoint::new(119, 160));
    }

    #[test]
    fn test_swap_exchanges_axes() {
        let m = CoordinateMapper::new(CAL, 240, 320).unwrap();
        // Sensor X min / Y max -> screen x max, y min
        assert_eq!(m.map(198, 3800), ScreenPoint::new(239, 0));
        assert_eq!(m.map(3679, 292), ScreenPoint::new(0, 319));
    }

    #[test]
    fn test_invalid_calibration() {
        let cal = TouchCalibration::new(10, 5, 0, 100, false);
        assert_eq!(
            CoordinateMapper::new(cal, 240, 320),
            Err(CalibrationError::EmptyRange)
        );
    }
}
