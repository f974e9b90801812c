//! Frame sink trait
//!
//! The interface the UI layer drives a panel through. Implementations
//! own all transport handles; the UI only hands over finished frames.

use crate::error::DisplayError;
use crate::surface::PixelSurface;

/// Whole-frame display driver
pub trait FrameSink {
    /// Panel size `(width, height)` in pixels
    fn size(&self) -> (u16, u16);

    /// Whether `set_backlight` honours intermediate brightness
    fn has_brightness_control(&self) -> bool;

    /// Bring the panel up; valid once, before anything else
    async fn initialize(&mut self) -> Result<(), DisplayError>;

    /// Send one full frame
    ///
    /// - `surface`: must match [`FrameSink::size`]
    async fn push_frame<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> Result<(), DisplayError>;

    /// Backlight on/off with a brightness in `[0.0, 1.0]` (clamped)
    fn set_backlight(&mut self, on: bool, brightness: f32) -> Result<(), DisplayError>;

    /// Switch off and release the hardware; repeated calls are no-ops
    fn close(&mut self) -> Result<(), DisplayError>;
}
