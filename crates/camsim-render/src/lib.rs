//! Frame buffers and camera sensors for the camsim pipeline.
//!
//! The renderer writes clean pixels into a [`FrameBuffer`]. A [`CameraSensor`]
//! reads that buffer and, if a noise model is attached, returns the noisy
//! frame instead. [`SensorSuite`] builds every sensor of a
//! [`SensorSuiteConfig`](camsim_core::config::SensorSuiteConfig) at once.
//!
//! # Example
//!
//! ```
//! use camsim_core::prelude::*;
//! use camsim_noise::prelude::*;
//! use camsim_render::prelude::*;
//!
//! let spec = SensorSpec::new("rgb", SensorType::Color).with_resolution(4, 4);
//! let mut sensor =
//!     CameraSensor::from_spec(&spec, &SeedHierarchy::new(0), global_registry()).unwrap();
//!
//! let frame = FrameBuffer::new(4, 4, PixelFormat::Rgb8);
//! let observed = sensor.observe(&frame).unwrap();
//! assert_eq!(observed.shape(), &[4, 4, 3]);
//! ```

pub mod buffer;
pub mod config;
pub mod sensor;

pub use buffer::FrameBuffer;
pub use config::{PixelFormat, RenderConfig};
pub use sensor::{CameraSensor, SensorSuite};

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::buffer::FrameBuffer;
    pub use crate::config::{PixelFormat, RenderConfig};
    pub use crate::sensor::{CameraSensor, SensorSuite};
}
