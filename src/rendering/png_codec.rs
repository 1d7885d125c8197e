//! PNG <-> [`PixelBuffer`] conversion.
//!
//! Decoding accepts every PNG color type and bit depth and normalizes to
//! 8-bit RGBA: palettes and low bit depths are expanded, 16-bit samples are
//! reduced to their high byte, and missing alpha becomes opaque.

use cvd_engine::PixelBuffer;
use std::io::Cursor;

use crate::error::SimulateError;

/// Largest image dimensions accepted by [`decode_png`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimit {
    pub max_width: u32,
    pub max_height: u32,
}

impl SizeLimit {
    pub const UNLIMITED: SizeLimit = SizeLimit {
        max_width: u32::MAX,
        max_height: u32::MAX,
    };

    fn check(&self, width: u32, height: u32) -> Result<(), SimulateError> {
        if width > self.max_width || height > self.max_height {
            return Err(SimulateError::ImageTooLarge {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }
}

/// Decode a PNG into an RGBA8 buffer.
///
/// The header is checked against `limit` before any pixel memory is
/// allocated.
pub fn decode_png(bytes: &[u8], limit: SizeLimit) -> Result<PixelBuffer, SimulateError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| SimulateError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    limit.check(width, height)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| SimulateError::PngDecode(e.to_string()))?;

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(SimulateError::PngDecode(format!(
            "unexpected bit depth {:?} after expansion",
            frame.bit_depth
        )));
    }

    let channels = match frame.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(SimulateError::PngDecode(
                "palette was not expanded".to_string(),
            ))
        }
    };

    let row_bytes = frame.width as usize * channels;
    let mut rgba = Vec::with_capacity(frame.width as usize * frame.height as usize * 4);
    for row in buf[..frame.buffer_size()]
        .chunks(frame.line_size)
        .take(frame.height as usize)
    {
        for px in row[..row_bytes].chunks_exact(channels) {
            let sample = match channels {
                1 => [px[0], px[0], px[0], 255],
                2 => [px[0], px[0], px[0], px[1]],
                3 => [px[0], px[1], px[2], 255],
                _ => [px[0], px[1], px[2], px[3]],
            };
            rgba.extend_from_slice(&sample);
        }
    }

    tracing::debug!(
        width,
        height,
        color_type = ?frame.color_type,
        "Decoded PNG"
    );

    Ok(PixelBuffer::new(frame.width, frame.height, rgba)?)
}

/// Encode an RGBA8 buffer as a PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, SimulateError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, buffer.width(), buffer.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| SimulateError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| SimulateError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
