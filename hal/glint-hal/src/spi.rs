//! SPI bus configuration
//!
//! Board crates translate this into their chip HAL's SPI config.

/// Per-call transfer limit of the Linux spidev driver (its default
/// `bufsiz`), and a sane DMA chunk size elsewhere.
pub const DEFAULT_MAX_TRANSFER: usize = 4096;

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Largest number of bytes a single write may carry
    pub max_transfer: usize,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 32_000_000, // 32 MHz
            mode: Mode::Mode0,
            max_transfer: DEFAULT_MAX_TRANSFER,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

impl From<Mode> for embedded_hal::spi::Mode {
    fn from(mode: Mode) -> Self {
        use embedded_hal::spi::{MODE_0, MODE_1, MODE_2, MODE_3};
        match mode {
            Mode::Mode0 => MODE_0,
            Mode::Mode1 => MODE_1,
            Mode::Mode2 => MODE_2,
            Mode::Mode3 => MODE_3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_panel_wiring() {
        let config = SpiConfig::default();
        assert_eq!(config.frequency, 32_000_000);
        assert_eq!(config.mode, Mode::Mode0);
        assert_eq!(config.max_transfer, 4096);
    }

    #[test]
    fn test_mode_split() {
        let (pol, pha): (Polarity, Phase) = Mode::Mode3.into();
        assert_eq!(pol, Polarity::IdleHigh);
        assert_eq!(pha, Phase::CaptureOnSecondTransition);

        let eh: embedded_hal::spi::Mode = Mode::Mode0.into();
        assert_eq!(eh, embedded_hal::spi::MODE_0);
    }
}
