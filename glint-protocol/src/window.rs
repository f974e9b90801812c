//! Address window encoding
//!
//! The column (CASET) and page (PASET) address commands each take a
//! start and end bound as big-endian 16-bit values. Both bounds are
//! inclusive.

/// Window construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowError {
    /// Start bound after end bound
    Inverted,
    /// Bound outside the panel
    OutOfBounds,
    /// Zero-sized panel
    Empty,
}

/// Inclusive rectangle the next pixel stream fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressWindow {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl AddressWindow {
    /// Validate a window against a `width` x `height` panel
    pub fn new(
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        width: u16,
        height: u16,
    ) -> Result<Self, WindowError> {
        if width == 0 || height == 0 {
            return Err(WindowError::Empty);
        }
        if x0 > x1 || y0 > y1 {
            return Err(WindowError::Inverted);
        }
        if x1 >= width || y1 >= height {
            return Err(WindowError::OutOfBounds);
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Whole-panel window
    pub fn full(width: u16, height: u16) -> Result<Self, WindowError> {
        if width == 0 || height == 0 {
            return Err(WindowError::Empty);
        }
        Ok(Self {
            x0: 0,
            y0: 0,
            x1: width - 1,
            y1: height - 1,
        })
    }

    /// CASET parameter bytes
    pub fn column_bytes(&self) -> [u8; 4] {
        bounds(self.x0, self.x1)
    }

    /// PASET parameter bytes
    pub fn row_bytes(&self) -> [u8; 4] {
        bounds(self.y0, self.y1)
    }

    /// Pixel count covered by the window
    pub fn area(&self) -> usize {
        let w = usize::from(self.x1 - self.x0) + 1;
        let h = usize::from(self.y1 - self.y0) + 1;
        w * h
    }
}

fn bounds(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}
