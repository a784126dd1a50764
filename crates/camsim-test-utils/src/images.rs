//! Synthetic frames for noise model tests.

use ndarray::ArrayD;

/// `height × width × channels` frame with every sample set to `value`.
pub fn uniform_image(height: usize, width: usize, channels: usize, value: u8) -> ArrayD<u8> {
    ArrayD::from_elem(vec![height, width, channels], value)
}

/// `height × width × channels` frame whose samples sweep through every value.
///
/// Sample `(y, x, c)` is `(y * width * channels + x * channels + c) mod 256`.
#[allow(clippy::cast_possible_truncation)]
pub fn gradient_image(height: usize, width: usize, channels: usize) -> ArrayD<u8> {
    ArrayD::from_shape_fn(vec![height, width, channels], |idx| {
        ((idx[0] * width + idx[1]) * channels + idx[2]) as u8
    })
}
