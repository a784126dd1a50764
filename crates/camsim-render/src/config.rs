//! Render configuration types.
//!
//! [`RenderConfig`] defines the resolution and pixel format of the frames a
//! color sensor produces.

use camsim_core::config::SensorSpec;

// ---------------------------------------------------------------------------
// PixelFormat
// ---------------------------------------------------------------------------

/// Pixel storage format for captured frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Red, green, blue; one byte each.
    #[default]
    Rgb8,
    /// Red, green, blue, alpha; one byte each.
    Rgba8,
}

impl PixelFormat {
    /// Samples per pixel, which is also the byte count per pixel.
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// RenderConfig
// ---------------------------------------------------------------------------

/// Resolution and pixel format of captured frames.
///
/// # Example
///
/// ```
/// use camsim_render::RenderConfig;
/// use camsim_render::config::PixelFormat;
///
/// let config = RenderConfig::new(512, 256).with_format(PixelFormat::Rgba8);
///
/// assert_eq!(config.width, 512);
/// assert_eq!(config.height, 256);
/// assert_eq!(config.format.channels(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel storage format.
    pub format: PixelFormat,
}

impl RenderConfig {
    /// RGB8 frames of the given resolution.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgb8,
        }
    }

    /// RGB8 frames at the resolution of a sensor spec.
    ///
    /// `SensorSpec::resolution` is `[height, width]`.
    #[must_use]
    pub const fn from_spec(spec: &SensorSpec) -> Self {
        Self::new(spec.width(), spec.height())
    }

    /// Set the pixel format.
    #[must_use]
    pub const fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
