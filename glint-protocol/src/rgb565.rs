//! RGB565 framebuffer codec
//!
//! Packs 24-bit pixels into the controller's native 16-bit big-endian
//! format and slices the result into bounded transfers.
//!
//! ```text
//!  high byte            low byte
//! ┌─────────┬──────┐  ┌──────┬─────────┐
//! │ R7..R3  │G7..G5│  │G4..G2│ B7..B3  │
//! └─────────┴──────┘  └──────┴─────────┘
//! ```

use core::num::NonZeroUsize;
use core::slice::Chunks;

use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

/// Bytes per packed pixel
pub const BYTES_PER_PIXEL: usize = 2;

/// Codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Output buffer cannot hold `2 * pixels` bytes
    BufferTooSmall { needed: usize, available: usize },
}

/// Pack one pixel
#[inline]
pub const fn pack(r: u8, g: u8, b: u8) -> [u8; 2] {
    [(r & 0xF8) | (g >> 5), ((g << 3) & 0xE0) | (b >> 3)]
}

/// Recover the high bits of a packed pixel; low bits read as zero
#[inline]
pub const fn unpack(bytes: [u8; 2]) -> (u8, u8, u8) {
    let [hi, lo] = bytes;
    let r = hi & 0xF8;
    let g = ((hi & 0x07) << 5) | ((lo & 0xE0) >> 3);
    let b = (lo & 0x1F) << 3;
    (r, g, b)
}

/// Packed size of `pixels` pixels
pub const fn packed_len(pixels: usize) -> usize {
    pixels * BYTES_PER_PIXEL
}

/// Encoder over a caller-provided byte buffer
///
/// The buffer is reused across frames; nothing is allocated per push.
pub struct FrameEncoder<B> {
    buf: B,
}

impl<B> FrameEncoder<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    /// Bytes available for a packed frame
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Pack `pixels` into the front of the buffer
    pub fn encode(&mut self, pixels: &[Rgb888]) -> Result<PackedFrame<'_>, CodecError> {
        let needed = packed_len(pixels.len());
        let out = self.buf.as_mut();
        if out.len() < needed {
            return Err(CodecError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        let out = &mut out[..needed];
        for (px, dst) in pixels.iter().zip(out.chunks_exact_mut(BYTES_PER_PIXEL)) {
            dst.copy_from_slice(&pack(px.r(), px.g(), px.b()));
        }

        Ok(PackedFrame { bytes: out })
    }

    pub fn release(self) -> B {
        self.buf
    }
}

/// One encoded frame, borrowed from the encoder's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> PackedFrame<'a> {
    /// Treat already-packed bytes as a frame
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consecutive transfers of at most `max_len` bytes
    ///
    /// The frame is `Copy`, so calling this again restarts from the
    /// first byte without re-encoding.
    pub fn chunks(&self, max_len: NonZeroUsize) -> Chunks<'a, u8> {
        self.bytes.chunks(max_len.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_primaries() {
        assert_eq!(pack(0, 0, 0), [0x00, 0x00]);
        assert_eq!(pack(255, 255, 255), [0xFF, 0xFF]);
        assert_eq!(pack(255, 0, 0), [0xF8, 0x00]);
        assert_eq!(pack(0, 255, 0), [0x07, 0xE0]);
        assert_eq!(pack(0, 0, 255), [0x00, 0x1F]);
    }

    #[test]
    fn test_pack_matches_u16_form() {
        let (r, g, b) = (0x12, 0xAB, 0xCD);
        let word = (u16::from(r & 0xF8) << 8) | (u16::from(g & 0xFC) << 3) | u16::from(b >> 3);
        assert_eq!(pack(r, g, b), word.to_be_bytes());
    }

    #[test]
    fn test_encode_into_reused_buffer() {
        let mut encoder = FrameEncoder::new([0xAAu8; 8]);
        let pixels = [Rgb888::WHITE, Rgb888::BLACK, Rgb888::RED];

        let frame = encoder.encode(&pixels).unwrap();
        assert_eq!(frame.as_bytes(), &[0xFF, 0xFF, 0x00, 0x00, 0xF8, 0x00]);

        let frame = encoder.encode(&[Rgb888::BLUE]).unwrap();
        assert_eq!(frame.as_bytes(), &[0x00, 0x1F]);
        assert_eq!(encoder.capacity(), 8);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut encoder = FrameEncoder::new([0u8; 3]);
        assert_eq!(
            encoder.encode(&[Rgb888::BLACK, Rgb888::BLACK]),
            Err(CodecError::BufferTooSmall {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_chunks_restart() {
        let bytes = [1u8, 2, 3, 4, 5];
        let frame = PackedFrame::from_bytes(&bytes);
        let max = NonZeroUsize::new(2).unwrap();

        let first: [&[u8]; 3] = [&[1, 2], &[3, 4], &[5]];
        assert!(frame.chunks(max).eq(first.iter().copied()));
        // Second pass sees the same pieces
        assert_eq!(frame.chunks(max).count(), 3);
        assert_eq!(frame.chunks(max).next(), Some(&[1u8, 2][..]));
    }
}
