// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macro for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

/// Tolerance for animated angles sampled from a manual clock (degrees).
pub const ANGLE_EPSILON: f32 = 1e-3;

/// Encodes a 4x4 GIF with `frames` frames of `delay_ms` each.
pub fn encoded_gif(frames: u8, delay_ms: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = image_rs::codecs::gif::GifEncoder::new(&mut bytes);
        let frames = (0..frames).map(|index| {
            let shade = index.wrapping_mul(80);
            image_rs::Frame::from_parts(
                image_rs::RgbaImage::from_pixel(4, 4, image_rs::Rgba([shade, 0, 255 - shade, 255])),
                0,
                0,
                image_rs::Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });
        encoder
            .encode_frames(frames)
            .expect("failed to encode gif");
    }
    bytes
}
