//! Gamma codec
//!
//! Converts between 8-bit display-encoded samples and linear light using a
//! plain power law with exponent [`GAMMA`]. Decoding goes through a lookup
//! table generated at compile time by build.rs; encoding is computed
//! directly because its input is an unbounded real.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Display gamma used for both directions of the codec.
pub const GAMMA: f64 = 2.2;

/// Map an 8-bit encoded sample to linear light: `(value / 255)^GAMMA`.
///
/// The result is in `0.0..=1.0`.
///
/// # Example
/// ```
/// use cvd_engine::color::linearize;
/// assert_eq!(linearize(0), 0.0);
/// assert_eq!(linearize(255), 1.0);
/// ```
#[inline]
pub fn linearize(channel: u8) -> f64 {
    DECODE[channel as usize]
}

/// Map linear light back to the 0..255 encoded scale: `value^(1/GAMMA) * 255`.
///
/// The result is NOT clamped or rounded; that happens once, in
/// [`blend`](crate::engine::blend). Negative inputs, which appear after a
/// cone substitution pushes a color outside the display gamut, are encoded
/// sign-symmetrically (`-(|v|^(1/GAMMA)) * 255`) so the output stays finite.
#[inline]
pub fn delinearize(channel: f64) -> f64 {
    let magnitude = channel.abs().powf(1.0 / GAMMA) * 255.0;
    if channel < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}
