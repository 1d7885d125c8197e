//! Pixel buffer type shared by the engine and its callers.
//!
//! [`PixelBuffer`] is both the input and the output of every transform:
//! tightly packed, row-major RGBA with 8 bits per channel.

mod pixel_buffer;

pub use pixel_buffer::{expected_len, PixelBuffer, CHANNELS};
pub(crate) use pixel_buffer::validate;
