//! Image array conventions shared by the noise models.
//!
//! Frames are dense `u8` arrays. Color frames are `height × width × channels`
//! with 3 (RGB) or 4 (RGBA) channels; other modalities may use fewer axes.

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::error::ImageError;

/// Owned image of 8-bit samples with dynamic rank.
pub type Image = ArrayD<u8>;

/// Borrowed view of an [`Image`].
pub type ImageView<'a> = ArrayViewD<'a, u8>;

/// Largest sample value ("salt").
pub const SAMPLE_MAX: u8 = u8::MAX;

/// Smallest sample value ("pepper").
pub const SAMPLE_MIN: u8 = u8::MIN;

/// Check that `image` is a non-empty `H × W × C` color frame with 3 or 4
/// channels.
///
/// # Errors
///
/// Returns [`ImageError::UnexpectedRank`], [`ImageError::UnsupportedChannels`]
/// or [`ImageError::Empty`].
pub fn ensure_color(image: &ImageView<'_>) -> Result<(), ImageError> {
    let shape = image.shape();
    if shape.len() != 3 {
        return Err(ImageError::UnexpectedRank {
            expected: 3,
            got: shape.len(),
        });
    }
    let channels = shape[2];
    if !matches!(channels, 3 | 4) {
        return Err(ImageError::UnsupportedChannels(channels));
    }
    if image.is_empty() {
        return Err(ImageError::Empty);
    }
    Ok(())
}

/// Borrow a row-major byte buffer as an image of the given shape.
///
/// # Errors
///
/// Returns [`ImageError::LengthMismatch`] if `data.len()` is not the product
/// of `shape`.
pub fn view_from_bytes<'a>(shape: &[usize], data: &'a [u8]) -> Result<ImageView<'a>, ImageError> {
    let expected: usize = shape.iter().product();
    if expected != data.len() {
        return Err(ImageError::LengthMismatch {
            expected,
            got: data.len(),
        });
    }
    ArrayViewD::from_shape(IxDyn(shape), data).map_err(|_| ImageError::LengthMismatch {
        expected,
        got: data.len(),
    })
}

/// Map a sample to `[0.0, 1.0]`.
#[inline]
pub fn normalize(sample: u8) -> f64 {
    f64::from(sample) / 255.0
}

/// Map a value in `[0.0, 1.0]` back to a sample, rounding to nearest.
///
/// Out-of-range input saturates at the sample bounds.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, 255]
pub fn denormalize(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
