//! Property-based tests for the framebuffer codec.
//! Bit packing and chunking must hold for every input, not just primaries.

use std::num::NonZeroUsize;

use embedded_graphics_core::pixelcolor::Rgb888;
use glint_protocol::{pack, unpack, FrameEncoder, PackedFrame};
use proptest::prelude::*;

proptest! {
    /// Red and blue keep their top 5 bits, green its top 6.
    #[test]
    fn packing_loses_only_low_bits(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let (r2, g2, b2) = unpack(pack(r, g, b));
        prop_assert!(r2 <= r && r - r2 < 8, "red {} -> {}", r, r2);
        prop_assert!(g2 <= g && g - g2 < 4, "green {} -> {}", g, g2);
        prop_assert!(b2 <= b && b - b2 < 8, "blue {} -> {}", b, b2);
    }

    /// Packed length is exactly two bytes per pixel.
    #[test]
    fn encoded_length_is_two_per_pixel(w in 1usize..48, h in 1usize..48, seed in any::<u32>()) {
        let pixels: Vec<Rgb888> = (0..w * h)
            .map(|i| {
                let v = seed.wrapping_mul(i as u32 + 1).to_le_bytes();
                Rgb888::new(v[0], v[1], v[2])
            })
            .collect();
        let mut encoder = FrameEncoder::new(vec![0u8; 2 * 48 * 48]);
        let frame = encoder.encode(&pixels).unwrap();
        prop_assert_eq!(frame.len(), 2 * w * h);
    }

    /// Chunks are full-sized except the last, and rejoin to the input.
    #[test]
    fn chunks_split_and_rejoin(bytes in prop::collection::vec(any::<u8>(), 0..2000), m in 1usize..600) {
        let frame = PackedFrame::from_bytes(&bytes);
        let max = NonZeroUsize::new(m).unwrap();
        let pieces: Vec<&[u8]> = frame.chunks(max).collect();

        prop_assert_eq!(pieces.len(), bytes.len().div_ceil(m));
        if let Some((last, full)) = pieces.split_last() {
            prop_assert!(full.iter().all(|p| p.len() == m));
            prop_assert!(!last.is_empty() && last.len() <= m);
        }
        prop_assert_eq!(&pieces.concat(), &bytes);
    }
}

#[test]
fn test_four_kib_transfers_for_full_panel() {
    let mut encoder = FrameEncoder::new(vec![0u8; 240 * 320 * 2]);
    let pixels = vec![Rgb888::new(0, 0, 0); 240 * 320];
    let frame = encoder.encode(&pixels).unwrap();
    let max = NonZeroUsize::new(4096).unwrap();

    // 153600 bytes = 37 full chunks + 2048
    assert_eq!(frame.chunks(max).count(), 38);
    assert_eq!(frame.chunks(max).last().map(<[u8]>::len), Some(2048));
}
