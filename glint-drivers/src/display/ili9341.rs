//! ILI9341 protocol engine
//!
//! Command/data framing over a [`Transport`], the reset pulse, the
//! table-driven power-on sequence and address window setup. This is the
//! only place the D/C line is toggled.

use core::num::NonZeroUsize;

use embedded_hal_async::delay::DelayNs;
use glint_core::state::{DriverOp, DriverState};
use glint_display::DisplayError;
use glint_hal::Transport;
use glint_protocol::{cmd, AddressWindow, PackedFrame, INIT_SEQUENCE};

/// Reset line hold / release time
pub const RESET_PULSE_MS: u32 = 100;

/// Bring-up progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Stage {
    Fresh,
    Reset,
    Initialized,
}

/// ILI9341 controller behind a transport
pub struct Ili9341<T, D> {
    transport: T,
    delay: D,
    width: u16,
    height: u16,
    stage: Stage,
}

impl<T, D> Ili9341<T, D>
where
    T: Transport,
    D: DelayNs,
{
    pub fn new(transport: T, delay: D, width: u16, height: u16) -> Self {
        Self {
            transport,
            delay,
            width,
            height,
            stage: Stage::Fresh,
        }
    }

    /// Panel size `(width, height)`
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Lifecycle view of the bring-up stage
    pub fn state(&self) -> DriverState {
        match self.stage {
            Stage::Fresh | Stage::Reset => DriverState::Uninitialized,
            Stage::Initialized => DriverState::Ready,
        }
    }

    fn reject(&self, op: DriverOp) -> DisplayError {
        DisplayError::InvalidState {
            state: self.state(),
            op,
        }
    }

    /// Open the transport (lines to idle levels)
    pub fn open(&mut self) -> Result<(), DisplayError> {
        self.transport.open()?;
        Ok(())
    }

    /// Pulse the reset line high, low, high
    ///
    /// Valid exactly once before [`Ili9341::initialize`].
    pub async fn reset(&mut self) -> Result<(), DisplayError> {
        if self.stage != Stage::Fresh {
            return Err(self.reject(DriverOp::Reset));
        }
        for level in [true, false, true] {
            self.transport.set_reset(level)?;
            self.delay.delay_ms(RESET_PULSE_MS).await;
        }
        self.stage = Stage::Reset;
        Ok(())
    }

    /// Replay the power-on table
    pub async fn initialize(&mut self) -> Result<(), DisplayError> {
        if self.stage != Stage::Reset {
            return Err(self.reject(DriverOp::Initialize));
        }
        for step in INIT_SEQUENCE {
            self.write_command(step.command).await?;
            if !step.params.is_empty() {
                self.write_data(step.params).await?;
            }
            if step.settle_ms > 0 {
                self.delay.delay_ms(step.settle_ms).await;
            }
        }
        self.stage = Stage::Initialized;
        Ok(())
    }

    /// Forget bring-up progress so the next attempt starts with a reset
    pub fn abort(&mut self) {
        self.stage = Stage::Fresh;
    }

    /// Set the inclusive window for the next pixel stream and start RAMWR
    pub async fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), DisplayError> {
        let window = AddressWindow::new(x0, y0, x1, y1, self.width, self.height)?;
        self.apply_window(window).await
    }

    /// Whole-panel window
    pub async fn set_full_window(&mut self) -> Result<(), DisplayError> {
        let window = AddressWindow::full(self.width, self.height)?;
        self.apply_window(window).await
    }

    async fn apply_window(&mut self, window: AddressWindow) -> Result<(), DisplayError> {
        if self.stage != Stage::Initialized {
            return Err(self.reject(DriverOp::SetWindow));
        }
        self.write_command(cmd::CASET).await?;
        self.write_data(&window.column_bytes()).await?;
        self.write_command(cmd::PASET).await?;
        self.write_data(&window.row_bytes()).await?;
        self.write_command(cmd::RAMWR).await
    }

    /// Send one command byte (D/C low)
    pub async fn write_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.transport.set_data_mode(false)?;
        self.transport.write(&[command]).await?;
        Ok(())
    }

    /// Send parameter or pixel bytes (D/C high), split at the transfer limit
    pub async fn write_data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.write_frame(PackedFrame::from_bytes(bytes)).await
    }

    /// Stream a packed frame in transport-sized chunks
    pub async fn write_frame(&mut self, frame: PackedFrame<'_>) -> Result<(), DisplayError> {
        self.transport.set_data_mode(true)?;
        let max = NonZeroUsize::new(self.transport.max_transfer()).unwrap_or(NonZeroUsize::MIN);
        for chunk in frame.chunks(max) {
            self.transport.write(chunk).await?;
        }
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport and delay back
    pub fn release(self) -> (T, D) {
        (self.transport, self.delay)
    }
}
