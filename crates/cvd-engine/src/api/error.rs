//! Unified error type for the cvd-engine public API.
//!
//! Every fallible operation returns [`CvdError`]. Callers that only care
//! about the broad category can match on [`CvdError::kind()`].

use std::fmt;

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a malformed buffer, an unknown deficiency type or
    /// an out-of-range intensity.
    InvalidArgument,
    /// Arithmetic produced a non-finite value. Not expected for valid input.
    ComputationFailure,
}

/// Error type for the cvd-engine public API.
///
/// # Example
///
/// ```
/// use cvd_engine::{CvdError, Deficiency, ErrorKind};
///
/// let err = "achromatopsia".parse::<Deficiency>().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// assert!(matches!(err, CvdError::UnknownDeficiency(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CvdError {
    /// Width or height is zero, or width * height * 4 overflows `usize`
    InvalidDimensions {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
    /// Sample count is not a multiple of 4 (not whole RGBA pixels)
    MisalignedLength {
        /// Number of bytes supplied
        len: usize,
    },
    /// Sample count does not equal width * height * 4
    LengthMismatch {
        /// width * height * 4
        expected: usize,
        /// Number of bytes supplied
        actual: usize,
    },
    /// Deficiency name not recognized
    UnknownDeficiency(String),
    /// Intensity outside 0.0..=1.0, or not finite
    IntensityOutOfRange(f64),
    /// Gamma mode name not recognized
    UnknownGammaMode(String),
    /// A simulated channel was NaN or infinite
    NonFiniteSample {
        /// Index of the offending pixel (row-major)
        pixel: usize,
    },
}

impl CvdError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CvdError::NonFiniteSample { .. } => ErrorKind::ComputationFailure,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl fmt::Display for CvdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CvdError::InvalidDimensions { width, height } => {
                write!(f, "invalid buffer dimensions: {}x{}", width, height)
            }
            CvdError::MisalignedLength { len } => {
                write!(f, "buffer length {} is not a multiple of 4", len)
            }
            CvdError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            CvdError::UnknownDeficiency(name) => {
                write!(f, "unknown deficiency type: {:?}", name)
            }
            CvdError::IntensityOutOfRange(value) => {
                write!(f, "intensity {} is outside 0.0..=1.0", value)
            }
            CvdError::UnknownGammaMode(name) => {
                write!(f, "unknown gamma mode: {:?}", name)
            }
            CvdError::NonFiniteSample { pixel } => {
                write!(f, "non-finite result at pixel {}", pixel)
            }
        }
    }
}

impl std::error::Error for CvdError {}
