//! ADS7846 / XPT2046 resistive touch controller
//!
//! Polls the pen interrupt line and, while it is asserted, reads both
//! axes in one 5-byte transfer. Readings are turned into the same
//! axis / contact / sync event stream a kernel input device produces, so
//! the sampler does not care where events come from.
//!
//! Control bytes are shifted left by 5 so each 12-bit result lands
//! right-aligned in a big-endian byte pair:
//!
//! ```text
//! tx: [X>>3] [X<<5] [Y>>3] [Y<<5] [0]
//! rx:  ---   [x hi] [x lo] [y hi] [y lo]
//! ```

use embedded_hal::digital::{self, InputPin};
use embedded_hal::spi;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;
use glint_core::traits::TouchEventSource;
use glint_protocol::InputEvent;
use heapless::Deque;

/// Start bit, channel, 12-bit, differential, power-down between reads
const READ_X: u8 = 0b1_001_0_0_00;
const READ_Y: u8 = 0b1_101_0_0_00;

const XY_TX: [u8; 5] = {
    let x = ((READ_X as u16) << 5).to_be_bytes();
    let y = ((READ_Y as u16) << 5).to_be_bytes();
    [x[0], x[1], y[0], y[1], 0]
};

const SAMPLE_MASK: u16 = 0x0FFF;

/// Default pen poll period
pub const POLL_INTERVAL_MS: u32 = 10;

/// Name reported for discovery
pub const DEVICE_NAME: &str = "ADS7846 Touchscreen";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ads7846Error {
    Spi(spi::ErrorKind),
    Irq(digital::ErrorKind),
}

/// Polled ADS7846 event source
///
/// - `SPI`: the controller's SPI device (chip select handled by the device)
/// - `IRQ`: pen interrupt, active low
/// - `D`: poll delay
pub struct Ads7846<SPI, IRQ, D> {
    spi: SPI,
    irq: IRQ,
    delay: D,
    poll_ms: u32,
    touching: bool,
    queue: Deque<InputEvent, 8>,
}

impl<SPI, IRQ, D> Ads7846<SPI, IRQ, D>
where
    SPI: SpiDevice,
    IRQ: InputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, irq: IRQ, delay: D) -> Self {
        Self {
            spi,
            irq,
            delay,
            poll_ms: POLL_INTERVAL_MS,
            touching: false,
            queue: Deque::new(),
        }
    }

    pub fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_ms = ms;
        self
    }

    /// One throwaway conversion; fails if the bus is not wired up
    pub async fn probe(&mut self) -> Result<(), Ads7846Error> {
        self.read_xy().await.map(|_| ())
    }

    /// Raw 12-bit (x, y)
    pub async fn read_xy(&mut self) -> Result<(u16, u16), Ads7846Error> {
        let mut rx = [0u8; XY_TX.len()];
        self.spi
            .transfer(&mut rx, &XY_TX)
            .await
            .map_err(|e| Ads7846Error::Spi(spi::Error::kind(&e)))?;

        let x = u16::from_be_bytes([rx[1], rx[2]]) & SAMPLE_MASK;
        let y = u16::from_be_bytes([rx[3], rx[4]]) & SAMPLE_MASK;
        Ok((x, y))
    }

    fn pen_down(&mut self) -> Result<bool, Ads7846Error> {
        self.irq
            .is_low()
            .map_err(|e| Ads7846Error::Irq(digital::Error::kind(&e)))
    }

    /// Wait one period, then queue whatever changed
    async fn poll(&mut self) -> Result<(), Ads7846Error> {
        self.delay.delay_ms(self.poll_ms).await;

        if self.pen_down()? {
            let (x, y) = self.read_xy().await?;
            self.push(InputEvent::AbsX(i32::from(x)));
            self.push(InputEvent::AbsY(i32::from(y)));
            if !self.touching {
                self.touching = true;
                self.push(InputEvent::Contact(true));
            }
            self.push(InputEvent::Sync);
        } else if self.touching {
            self.touching = false;
            self.push(InputEvent::Contact(false));
            self.push(InputEvent::Sync);
        }
        Ok(())
    }

    fn push(&mut self, event: InputEvent) {
        // At most four events per poll and polls only run on an empty queue
        let _ = self.queue.push_back(event);
    }

    pub fn release(self) -> (SPI, IRQ, D) {
        (self.spi, self.irq, self.delay)
    }
}

impl<SPI, IRQ, D> TouchEventSource for Ads7846<SPI, IRQ, D>
where
    SPI: SpiDevice,
    IRQ: InputPin,
    D: DelayNs,
{
    type Error = Ads7846Error;

    fn name(&self) -> &str {
        DEVICE_NAME
    }

    async fn next_event(&mut self) -> Result<InputEvent, Ads7846Error> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(event);
            }
            self.poll().await?;
        }
    }
}
