//! Test images and pinned simulation results.

use cvd_engine::PixelBuffer;
use cvdsim::rendering::{decode_png, encode_png, SizeLimit};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREY: [u8; 4] = [128, 128, 128, 255];

/// Red under full protanopia, gamma-correct
pub const RED_PROTANOPIA: [u8; 4] = [100, 73, 35, 255];
/// Red under full protanopia on encoded values
pub const RED_PROTANOPIA_ENCODED: [u8; 4] = [32, 16, 3, 255];
/// Red under half-strength protanopia
pub const RED_PROTANOPIA_HALF: [u8; 4] = [177, 37, 18, 255];
/// Red under full deuteranopia
pub const RED_DEUTERANOPIA: [u8; 4] = [224, 115, 0, 255];
/// Red under full tritanopia
pub const RED_TRITANOPIA: [u8; 4] = [255, 3, 0, 255];
/// Grey under full protanopia
pub const GREY_PROTANOPIA: [u8; 4] = [0, 146, 132, 255];

/// Encode a uniform image
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let buffer = PixelBuffer::filled(width, height, rgba).expect("valid dimensions");
    encode_png(&buffer).expect("encode")
}

/// Encode an image from explicit pixels
pub fn pixels_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    let buffer = PixelBuffer::from_pixels(width, height, pixels).expect("valid pixels");
    encode_png(&buffer).expect("encode")
}

/// Decode a PNG response body
pub fn decode(png_bytes: &[u8]) -> PixelBuffer {
    decode_png(png_bytes, SizeLimit::UNLIMITED).expect("decode")
}
