//! Sensor modality tags.
//!
//! [`SensorType`] classifies what a simulated sensor emits. Noise models use it
//! to declare which sensors they may be attached to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of data a simulated sensor produces.
///
/// Serialized in `snake_case` (`"color"`, `"depth"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    /// No data, or a placeholder sensor.
    #[default]
    None,
    /// RGB(A) 8-bit color images.
    Color,
    /// Per-pixel distance from the camera.
    Depth,
    /// Per-pixel surface normals.
    Normal,
    /// Per-pixel instance or class ids.
    Semantic,
    /// Audio samples.
    Audio,
    /// Text observations.
    Text,
}

impl SensorType {
    /// Every sensor type, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::None,
        Self::Color,
        Self::Depth,
        Self::Normal,
        Self::Semantic,
        Self::Audio,
        Self::Text,
    ];

    /// Lowercase name, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Color => "color",
            Self::Depth => "depth",
            Self::Normal => "normal",
            Self::Semantic => "semantic",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }

    /// Returns `true` for sensors whose frames are images.
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(
            self,
            Self::Color | Self::Depth | Self::Normal | Self::Semantic
        )
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
