//! Pixel pipeline
//!
//! Every pixel goes through the same fixed sequence:
//!
//! ```text
//! RGBA8 ─► decode (GammaMode) ─► RGB→LMS ─► cone substitution
//!       ─► LMS→RGB ─► encode (GammaMode) ─► blend + clamp ─► RGBA8
//! ```
//!
//! Alpha is copied through. Floats become bytes in exactly one place,
//! [`blend`], so out-of-gamut intermediates are clamped once instead of
//! compounding.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::api::{CvdError, Intensity, SimulationOptions};
use crate::buffer::{self, PixelBuffer, CHANNELS};
use crate::color::{Lms, Srgb};
use crate::deficiency::Deficiency;

/// Mix an original 8-bit channel with its simulated counterpart.
///
/// Computes `round(original * (1 - intensity) + simulated * intensity)`
/// and clamps to `0..=255`. `simulated` is on the 0..255 scale but may lie
/// outside it. Halfway cases round away from zero.
///
/// # Example
/// ```
/// use cvd_engine::blend;
///
/// assert_eq!(blend(200, 100.0, 0.0), 200);
/// assert_eq!(blend(200, 100.0, 1.0), 100);
/// assert_eq!(blend(200, 100.0, 0.5), 150);
/// assert_eq!(blend(200, 412.7, 1.0), 255);
/// assert_eq!(blend(10, -30.0, 1.0), 0);
/// ```
#[inline]
pub fn blend(original: u8, simulated: f64, intensity: f64) -> u8 {
    let mixed = original as f64 * (1.0 - intensity) + simulated * intensity;
    mixed.round().clamp(0.0, 255.0) as u8
}

/// Simulated color of one sample on the unclamped 0..255 scale.
///
/// Returns `None` if any channel came out NaN or infinite.
#[inline]
fn simulate_color(color: Srgb, options: &SimulationOptions) -> Option<[f64; 3]> {
    let (r, g, b) = options.gamma.decode(color.r, color.g, color.b);
    let lms = options.deficiency.simulate(Lms::from_rgb(r, g, b));
    let (r, g, b) = lms.to_rgb();
    let (r, g, b) = options.gamma.encode(r, g, b);
    if r.is_finite() && g.is_finite() && b.is_finite() {
        Some([r, g, b])
    } else {
        None
    }
}

/// Run one RGBA sample through the pipeline.
///
/// `index` is only used to label a [`CvdError::NonFiniteSample`].
#[inline]
fn simulate_sample(
    rgba: [u8; 4],
    options: &SimulationOptions,
    index: usize,
) -> Result<[u8; 4], CvdError> {
    let color = Srgb::from_rgba(rgba);
    let [r, g, b] =
        simulate_color(color, options).ok_or(CvdError::NonFiniteSample { pixel: index })?;
    let i = options.intensity.value();
    Ok(Srgb::new(blend(color.r, r, i), blend(color.g, g, i), blend(color.b, b, i))
        .with_alpha(rgba[3]))
}

/// Transform a single RGBA pixel.
///
/// # Example
/// ```
/// use cvd_engine::{simulate_rgba, Deficiency, SimulationOptions};
///
/// let options = SimulationOptions::new(Deficiency::Protanopia);
/// assert_eq!(simulate_rgba([255, 0, 0, 255], &options).unwrap(), [100, 73, 35, 255]);
/// ```
pub fn simulate_rgba(rgba: [u8; 4], options: &SimulationOptions) -> Result<[u8; 4], CvdError> {
    simulate_sample(rgba, options, 0)
}

/// Process a run of whole pixels from `src` into `dst`.
///
/// `first_pixel` is the row-major index of the first pixel in `src`.
fn transform_span(
    src: &[u8],
    dst: &mut [u8],
    first_pixel: usize,
    options: &SimulationOptions,
) -> Result<(), CvdError> {
    for (n, (s, d)) in src
        .chunks_exact(CHANNELS)
        .zip(dst.chunks_exact_mut(CHANNELS))
        .enumerate()
    {
        let out = simulate_sample([s[0], s[1], s[2], s[3]], options, first_pixel + n)?;
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Transform already validated samples into a fresh vector.
fn transform_samples(
    src: &[u8],
    width: u32,
    options: &SimulationOptions,
) -> Result<Vec<u8>, CvdError> {
    if options.intensity.is_none() {
        return Ok(src.to_vec());
    }

    let mut dst = vec![0u8; src.len()];
    let row_len = width as usize * CHANNELS;

    #[cfg(feature = "parallel")]
    {
        dst.par_chunks_mut(row_len)
            .zip(src.par_chunks(row_len))
            .enumerate()
            .try_for_each(|(y, (d, s))| transform_span(s, d, y * width as usize, options))?;
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (y, (d, s)) in dst
            .chunks_mut(row_len)
            .zip(src.chunks(row_len))
            .enumerate()
        {
            transform_span(s, d, y * width as usize, options)?;
        }
    }

    Ok(dst)
}

/// Simulate a deficiency over a whole buffer with full control over the
/// options.
///
/// The input is only read. The result is built in a new allocation with
/// the same dimensions and returned only if every pixel succeeded.
///
/// With the `parallel` feature rows are processed on the rayon pool; the
/// output bytes are identical to the sequential path. If several pixels
/// fail, which one is reported is unspecified.
pub fn transform_with(
    buffer: &PixelBuffer,
    options: &SimulationOptions,
) -> Result<PixelBuffer, CvdError> {
    let data = transform_samples(buffer.as_bytes(), buffer.width(), options)?;
    Ok(PixelBuffer::from_parts_unchecked(
        buffer.width(),
        buffer.height(),
        data,
    ))
}

/// Simulate `deficiency` at `intensity` on linear light.
///
/// # Example
/// ```
/// use cvd_engine::{transform, Deficiency, Intensity, PixelBuffer};
///
/// let red = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
/// let out = transform(&red, Deficiency::Protanopia, Intensity::FULL).unwrap();
/// assert_eq!(out.pixel(1, 1), Some([100, 73, 35, 255]));
///
/// // Intensity 0 leaves the image alone
/// let same = transform(&red, Deficiency::Protanopia, Intensity::NONE).unwrap();
/// assert_eq!(same, red);
/// ```
pub fn transform(
    buffer: &PixelBuffer,
    deficiency: Deficiency,
    intensity: Intensity,
) -> Result<PixelBuffer, CvdError> {
    transform_with(
        buffer,
        &SimulationOptions::new(deficiency).intensity(intensity),
    )
}

/// Like [`transform_with`], for callers holding bare samples.
///
/// `data` is validated against `width` and `height` first, so a short,
/// long or ragged slice fails with an `InvalidArgument` error.
pub fn transform_raw(
    data: &[u8],
    width: u32,
    height: u32,
    options: &SimulationOptions,
) -> Result<Vec<u8>, CvdError> {
    buffer::validate(data, width, height)?;
    transform_samples(data, width, options)
}
