//! Validated RGBA pixel storage.

use crate::api::CvdError;

/// Samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Byte length of a `width` x `height` RGBA buffer.
///
/// Fails when either dimension is zero or the product overflows `usize`.
pub fn expected_len(width: u32, height: u32) -> Result<usize, CvdError> {
    if width == 0 || height == 0 {
        return Err(CvdError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(CvdError::InvalidDimensions { width, height })
}

/// Check that `data` holds exactly `width * height` RGBA pixels.
pub(crate) fn validate(data: &[u8], width: u32, height: u32) -> Result<(), CvdError> {
    if data.len() % CHANNELS != 0 {
        return Err(CvdError::MisalignedLength { len: data.len() });
    }
    let expected = expected_len(width, height)?;
    if data.len() != expected {
        return Err(CvdError::LengthMismatch {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// An image as interleaved 8-bit RGBA samples.
///
/// The invariant `data.len() == width * height * 4` (with both dimensions
/// positive) is checked on construction and can never be broken afterwards,
/// since the sample vector is only exposed read-only or by value.
///
/// # Example
///
/// ```
/// use cvd_engine::PixelBuffer;
///
/// let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
/// assert_eq!(buffer.width(), 2);
/// assert_eq!(buffer.pixel(1, 0), Some([0, 0, 255, 128]));
///
/// // 3 bytes cannot be a whole pixel
/// assert!(PixelBuffer::new(1, 1, vec![0, 0, 0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA samples, row-major.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap `data` after checking it against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CvdError> {
        validate(&data, width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, CvdError> {
        let len = expected_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from a slice of whole pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Self, CvdError> {
        Self::new(width, height, pixels.concat())
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// The raw RGBA samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Give up the samples.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// The pixel at column `x`, row `y`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let p = &self.data[offset..offset + CHANNELS];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Whether both buffers have the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Wrap samples that were produced from an already validated buffer of
    /// the same dimensions.
    pub(crate) fn from_parts_unchecked(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Ok(data.len()),
            expected_len(width, height),
            "data length must match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            data,
        }
    }
}
