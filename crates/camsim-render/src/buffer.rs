//! Frame buffer between the renderer and the camera sensors.
//!
//! [`FrameBuffer`] owns one frame of row-major, interleaved pixel bytes. The
//! renderer replaces it wholesale with [`FrameBuffer::write_frame`]; sensors
//! borrow it as a `height × width × channels` image through
//! [`FrameBuffer::image`].

use camsim_noise::error::ImageError;
use camsim_noise::image::{ImageView, view_from_bytes};

use crate::config::{PixelFormat, RenderConfig};

/// Number of bytes in one `width × height` frame of `format`.
///
/// # Panics
///
/// Panics if the count does not fit in `usize`.
fn frame_len(width: u32, height: u32, format: PixelFormat) -> usize {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(format.channels()))
        .unwrap_or_else(|| panic!("a {width}x{height} {format:?} frame overflows usize"))
}

// ---------------------------------------------------------------------------
// FrameBuffer
// ---------------------------------------------------------------------------

/// The most recent clean frame produced for a sensor.
///
/// # Example
///
/// ```
/// use camsim_render::FrameBuffer;
/// use camsim_render::config::PixelFormat;
///
/// let buf = FrameBuffer::new(4, 2, PixelFormat::Rgb8);
/// assert_eq!(buf.byte_count(), 4 * 2 * 3);
/// assert_eq!(buf.image().unwrap().shape(), &[2, 4, 3]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
    frame_counter: u64,
}

impl FrameBuffer {
    /// Black frame of the given size.
    ///
    /// # Panics
    ///
    /// Panics if `width × height × channels` overflows `usize`.
    #[must_use]
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; frame_len(width, height, format)],
            frame_counter: 0,
        }
    }

    /// Black frame sized by a [`RenderConfig`].
    ///
    /// # Panics
    ///
    /// See [`new`](Self::new).
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.width, config.height, config.format)
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Row-major interleaved bytes of the current frame.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of [`data`](Self::data) in bytes.
    #[must_use]
    pub fn byte_count(&self) -> usize {
        self.data.len()
    }

    /// `[height, width, channels]`.
    #[must_use]
    pub const fn shape(&self) -> [usize; 3] {
        [
            self.height as usize,
            self.width as usize,
            self.format.channels(),
        ]
    }

    /// Borrow the current frame as a `height × width × channels` image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::LengthMismatch`] if the data does not hold exactly
    /// one frame of [`shape`](Self::shape).
    pub fn image(&self) -> Result<ImageView<'_>, ImageError> {
        view_from_bytes(&self.shape(), &self.data)
    }

    /// Replace the frame and bump the frame counter.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not exactly [`byte_count`](Self::byte_count) bytes.
    pub fn write_frame(&mut self, data: Vec<u8>) {
        assert_eq!(
            data.len(),
            self.data.len(),
            "frame data length {} does not match the {}x{} {:?} buffer",
            data.len(),
            self.width,
            self.height,
            self.format,
        );
        self.data = data;
        self.frame_counter += 1;
    }

    /// Frames written since creation.
    #[must_use]
    pub const fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
