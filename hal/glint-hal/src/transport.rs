//! Panel transport
//!
//! Four-wire SPI panels frame every byte as either a command or data via
//! a separate data/command (DC) line, and carry an active-low reset line.
//! [`Transport`] captures exactly that surface so the protocol engine can
//! be driven by a recording mock on the host.

use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal_async::spi::{Error as _, SpiDevice};

use crate::spi::DEFAULT_MAX_TRANSFER;

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// SPI bus failure
    Bus(embedded_hal::spi::ErrorKind),
    /// Control line (DC / RST / backlight switch) failure
    Pin(embedded_hal::digital::ErrorKind),
    /// Backlight PWM failure
    Pwm(embedded_hal::pwm::ErrorKind),
    /// Bus used before [`Transport::open`]
    NotOpen,
    /// Single write larger than [`Transport::max_transfer`]
    Oversize,
}

/// Byte transport with command/data framing and a reset line
pub trait Transport {
    /// Largest byte count a single [`Transport::write`] accepts
    fn max_transfer(&self) -> usize;

    /// Bring the lines to their idle levels (reset released, data mode)
    fn open(&mut self) -> Result<(), TransportError>;

    /// Select data (`true`) or command (`false`) framing for following writes
    fn set_data_mode(&mut self, data: bool) -> Result<(), TransportError>;

    /// Drive the reset line (`true` = released / high)
    fn set_reset(&mut self, high: bool) -> Result<(), TransportError>;

    /// Write bytes in the current framing mode
    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError>;
}

/// [`Transport`] over an `embedded-hal-async` SPI device and two GPIOs
///
/// Chip select is owned by the `SpiDevice` (e.g. `embedded-hal-bus`
/// `ExclusiveDevice`), so it is toggled per write.
pub struct SpiTransport<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    max_transfer: usize,
    open: bool,
}

impl<SPI, DC, RST> SpiTransport<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus with the default 4096-byte transfer limit
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self::with_max_transfer(spi, dc, rst, DEFAULT_MAX_TRANSFER)
    }

    /// Wrap the bus with an explicit per-write limit (minimum 1)
    pub fn with_max_transfer(spi: SPI, dc: DC, rst: RST, max_transfer: usize) -> Self {
        Self {
            spi,
            dc,
            rst,
            max_transfer: max_transfer.max(1),
            open: false,
        }
    }

    /// Whether [`Transport::open`] has succeeded
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), TransportError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|e| TransportError::Pin(e.kind()))
}

impl<SPI, DC, RST> Transport for SpiTransport<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn max_transfer(&self) -> usize {
        self.max_transfer
    }

    fn open(&mut self) -> Result<(), TransportError> {
        drive(&mut self.rst, true)?;
        drive(&mut self.dc, true)?;
        self.open = true;
        Ok(())
    }

    fn set_data_mode(&mut self, data: bool) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        drive(&mut self.dc, data)
    }

    fn set_reset(&mut self, high: bool) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        drive(&mut self.rst, high)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        if bytes.len() > self.max_transfer {
            return Err(TransportError::Oversize);
        }
        if bytes.is_empty() {
            return Ok(());
        }
        self.spi
            .write(bytes)
            .await
            .map_err(|e| TransportError::Bus(e.kind()))
    }
}
