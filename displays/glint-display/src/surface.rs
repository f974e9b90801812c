//! RGB888 pixel surface
//!
//! Row-major, `width * height` pixels over caller-provided storage
//! (a static array on firmware, a `Vec` in tests).

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::Rgb888;
use embedded_graphics_core::Pixel;

use crate::error::DisplayError;

/// Read-only view of a finished frame
pub trait PixelSurface {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Exactly `width * height` pixels, row-major
    fn pixels(&self) -> &[Rgb888];
}

/// Mutable framebuffer the UI draws into
pub struct Surface<B> {
    buf: B,
    width: u16,
    height: u16,
}

impl<B> Surface<B>
where
    B: AsRef<[Rgb888]> + AsMut<[Rgb888]>,
{
    /// Wrap storage holding at least `width * height` pixels
    pub fn new(buf: B, width: u16, height: u16) -> Result<Self, DisplayError> {
        let needed = usize::from(width) * usize::from(height);
        if buf.as_ref().len() < needed {
            return Err(DisplayError::BufferTooSmall);
        }
        Ok(Self { buf, width, height })
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.buf.as_ref()[i])
    }

    /// Set one pixel; off-surface writes are dropped
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Rgb888) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.buf.as_mut()[i] = color;
                true
            }
            None => false,
        }
    }

    pub fn fill(&mut self, color: Rgb888) {
        let len = self.len();
        self.buf.as_mut()[..len].fill(color);
    }

    fn len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub fn release(self) -> B {
        self.buf
    }
}

impl<B> PixelSurface for Surface<B>
where
    B: AsRef<[Rgb888]> + AsMut<[Rgb888]>,
{
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn pixels(&self) -> &[Rgb888] {
        &self.buf.as_ref()[..self.len()]
    }
}

impl<B> OriginDimensions for Surface<B> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl<B> DrawTarget for Surface<B>
where
    B: AsRef<[Rgb888]> + AsMut<[Rgb888]>,
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn test_storage_too_small() {
        let buf = [Rgb888::BLACK; 11];
        assert!(matches!(
            Surface::new(buf, 4, 3),
            Err(DisplayError::BufferTooSmall)
        ));
    }

    #[test]
    fn test_oversized_storage_is_trimmed() {
        let surface = Surface::new([Rgb888::BLACK; 20], 4, 4).unwrap();
        assert_eq!(surface.pixels().len(), 16);
        assert_eq!(surface.dimensions(), (4, 4));
    }

    #[test]
    fn test_row_major_layout() {
        let mut surface = Surface::new([Rgb888::BLACK; 12], 4, 3).unwrap();
        assert!(surface.set_pixel(1, 2, Rgb888::RED));
        assert!(!surface.set_pixel(4, 0, Rgb888::RED));

        assert_eq!(surface.pixels()[2 * 4 + 1], Rgb888::RED);
        assert_eq!(surface.pixel(1, 2), Some(Rgb888::RED));
        assert_eq!(surface.pixel(0, 3), None);
    }

    #[test]
    fn test_draws_with_embedded_graphics() {
        let mut surface = Surface::new([Rgb888::BLACK; 16], 4, 4).unwrap();
        surface.clear(Rgb888::WHITE).unwrap();

        // Partly off-surface; clipped silently
        Rectangle::new(Point::new(2, 2), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
            .draw(&mut surface)
            .unwrap();

        assert_eq!(surface.pixel(1, 1), Some(Rgb888::WHITE));
        assert_eq!(surface.pixel(2, 2), Some(Rgb888::GREEN));
        assert_eq!(surface.pixel(3, 3), Some(Rgb888::GREEN));
        assert_eq!(surface.bounding_box().size, Size::new(4, 4));
    }
}
