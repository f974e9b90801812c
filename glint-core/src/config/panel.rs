//! Panel configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::TouchCalibration;

/// Physical panel and bus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Largest single bus write in bytes
    pub max_transfer: usize,
    /// SPI clock in Hz
    pub spi_frequency_hz: u32,
    /// Touch sensor calibration
    pub touch: TouchCalibration,
}

impl PanelConfig {
    /// Waveshare 2.8" (A): ILI9341 + ADS7846, portrait
    pub const WAVESHARE_28: Self = Self {
        width: 240,
        height: 320,
        max_transfer: 4096,
        spi_frequency_hz: 32_000_000,
        touch: TouchCalibration::ADS7846_WAVESHARE_28,
    };

    /// Pixel count
    pub const fn pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes in one RGB565 frame
    pub const fn frame_bytes(&self) -> usize {
        self.pixels() * 2
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::WAVESHARE_28
    }
}
