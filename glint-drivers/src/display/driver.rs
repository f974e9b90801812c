//! Display driver
//!
//! Composes the ILI9341 engine, the RGB565 codec and the backlight into
//! the [`FrameSink`] the UI layer drives:
//!
//! ```text
//! Uninitialized ──initialize──► Ready ──close──► Closed
//!       │                        │  ▲
//!       └────────close───────────┼──┘ push_frame / set_backlight
//!                                ▼
//! ```
//!
//! A failed `initialize` leaves the driver `Uninitialized` (retry starts
//! over with a reset). A failed `push_frame` leaves it `Ready`.

use embedded_hal_async::delay::DelayNs;
use glint_core::state::{DriverOp, DriverState};
use glint_display::{DisplayError, FrameSink, PixelSurface};
use glint_hal::{Backlight, Transport};
use glint_protocol::FrameEncoder;

use super::ili9341::Ili9341;

#[cfg(feature = "defmt")]
use defmt::{info, warn};

/// Hardware held between construction and close
struct Hardware<T, B, D> {
    panel: Ili9341<T, D>,
    backlight: B,
}

/// Whole-frame ILI9341 display driver
///
/// - `T`: panel transport
/// - `B`: backlight
/// - `D`: async delay for reset and settle times
/// - `F`: encode buffer, at least `2 * width * height` bytes
pub struct DisplayDriver<T, B, D, F> {
    hw: Option<Hardware<T, B, D>>,
    encoder: FrameEncoder<F>,
    state: DriverState,
    has_brightness: bool,
    width: u16,
    height: u16,
}

impl<T, B, D, F> DisplayDriver<T, B, D, F>
where
    T: Transport,
    B: Backlight,
    D: DelayNs,
    F: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Take ownership of the hardware; nothing is driven until `initialize`
    pub fn new(
        transport: T,
        backlight: B,
        delay: D,
        encode_buf: F,
        width: u16,
        height: u16,
    ) -> Self {
        let has_brightness = backlight.supports_brightness();
        #[cfg(feature = "defmt")]
        info!("Backlight brightness control: {}", has_brightness);

        Self {
            hw: Some(Hardware {
                panel: Ili9341::new(transport, delay, width, height),
                backlight,
            }),
            encoder: FrameEncoder::new(encode_buf),
            state: DriverState::Uninitialized,
            has_brightness,
            width,
            height,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    fn hardware(&mut self, op: DriverOp) -> Result<&mut Hardware<T, B, D>, DisplayError> {
        self.state.check(op)?;
        let state = self.state;
        self.hw
            .as_mut()
            .ok_or(DisplayError::InvalidState { state, op })
    }

    /// Open the bus, pulse reset, run the init table, light the panel
    pub async fn initialize(&mut self) -> Result<(), DisplayError> {
        let hw = self.hardware(DriverOp::Initialize)?;

        let result = async {
            hw.panel.open()?;
            hw.panel.reset().await?;
            hw.panel.initialize().await?;
            hw.backlight.apply(true, 1.0)?;
            Ok::<(), DisplayError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.state = self.state.transition(DriverOp::Initialize)?;
                #[cfg(feature = "defmt")]
                info!("Display initialized ({}x{})", self.width, self.height);
                Ok(())
            }
            Err(e) => {
                hw.panel.abort();
                #[cfg(feature = "defmt")]
                warn!("Display initialization failed: {}", e);
                Err(e)
            }
        }
    }

    /// Encode `surface` and stream it to the full panel window
    pub async fn push_frame<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> Result<(), DisplayError> {
        self.state.check(DriverOp::PushFrame)?;
        if surface.dimensions() != (self.width, self.height) {
            return Err(DisplayError::SurfaceMismatch);
        }
        let Some(hw) = self.hw.as_mut() else {
            return Err(DisplayError::InvalidState {
                state: self.state,
                op: DriverOp::PushFrame,
            });
        };

        let frame = self.encoder.encode(surface.pixels())?;
        let result = async {
            hw.panel.set_full_window().await?;
            hw.panel.write_frame(frame).await
        }
        .await;

        if let Err(_e) = &result {
            #[cfg(feature = "defmt")]
            warn!("Frame push failed: {}", _e);
        }
        result
    }

    /// Backlight level; without brightness control only `on` matters
    pub fn set_backlight(&mut self, on: bool, brightness: f32) -> Result<(), DisplayError> {
        let has_brightness = self.has_brightness;
        let hw = self.hardware(DriverOp::SetBacklight)?;
        let level = if has_brightness { brightness } else { 1.0 };
        hw.backlight.apply(on, level)?;
        Ok(())
    }

    /// Switch off and drop all hardware handles
    ///
    /// Safe in any state; the first call after a failed push still
    /// releases everything. Returns the backlight error, if any, after
    /// the handles are gone.
    pub fn close(&mut self) -> Result<(), DisplayError> {
        let Some(mut hw) = self.hw.take() else {
            self.state = DriverState::Closed;
            return Ok(());
        };
        let result = hw.backlight.apply(false, 0.0);
        drop(hw);

        self.state = self.state.transition(DriverOp::Close)?;
        #[cfg(feature = "defmt")]
        info!("Display closed");
        result.map_err(DisplayError::from)
    }

    pub fn has_brightness_control(&self) -> bool {
        self.has_brightness
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Engine access for partial-window tools and tests
    pub fn panel(&self) -> Option<&Ili9341<T, D>> {
        self.hw.as_ref().map(|hw| &hw.panel)
    }
}

impl<T, B, D, F> FrameSink for DisplayDriver<T, B, D, F>
where
    T: Transport,
    B: Backlight,
    D: DelayNs,
    F: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> (u16, u16) {
        DisplayDriver::size(self)
    }

    fn has_brightness_control(&self) -> bool {
        self.has_brightness
    }

    async fn initialize(&mut self) -> Result<(), DisplayError> {
        DisplayDriver::initialize(self).await
    }

    async fn push_frame<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> Result<(), DisplayError> {
        DisplayDriver::push_frame(self, surface).await
    }

    fn set_backlight(&mut self, on: bool, brightness: f32) -> Result<(), DisplayError> {
        DisplayDriver::set_backlight(self, on, brightness)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        DisplayDriver::close(self)
    }
}
