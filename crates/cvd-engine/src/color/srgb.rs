//! sRGB color type
//!
//! The 8-bit, display-encoded form that pixel buffers carry. All input and
//! output of the engine is in this representation.

/// An 8-bit display-encoded color sample.
///
/// This is what images and camera frames store. Do not do arithmetic on
/// these values directly; convert to
/// [`LinearRgb`](crate::color::LinearRgb) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Srgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Srgb {
    /// Create a new Srgb color from 8-bit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Take the color channels of an `[R, G, B, A]` sample, ignoring alpha.
    ///
    /// # Example
    /// ```
    /// use cvd_engine::Srgb;
    /// let c = Srgb::from_rgba([10, 20, 30, 40]);
    /// assert_eq!(c, Srgb::new(10, 20, 30));
    /// ```
    #[inline]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Combine with an alpha value into an `[R, G, B, A]` sample.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Whether all three channels are equal (a neutral grey, black or white).
    #[inline]
    pub const fn is_neutral(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl From<[u8; 3]> for Srgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}
