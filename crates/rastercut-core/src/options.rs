//! Declarative render options.
//!
//! Options are plain values built by the UI layer and passed whole on every
//! change. Domains that have no safe clamp (rotation, aspect components) are
//! validated here, at construction; the rest of the engine can then assume
//! well-formed input.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::error::EngineError;

/// Clockwise rotation restricted to right angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All four rotations in clockwise order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    #[inline]
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Angle in radians, clockwise-positive in a y-down coordinate system.
    #[inline]
    pub fn radians(self) -> f64 {
        f64::from(self.degrees()) * PI / 180.0
    }

    /// True for 90 and 270, the rotations that swap width and height.
    #[inline]
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// The next rotation clockwise (270 wraps to 0).
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// The next rotation counter-clockwise (0 wraps to 270).
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = EngineError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(EngineError::invalid_option(format!(
                "rotation must be 0, 90, 180 or 270 (got {other})"
            ))),
        }
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotation and mirroring for the flip/rotate tool.
///
/// The default value is the identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformOptions {
    /// Flip left-right (applied after rotation).
    pub mirror_horizontal: bool,
    /// Flip top-bottom (applied after rotation).
    pub mirror_vertical: bool,
    pub rotation: Rotation,
}

impl TransformOptions {
    pub fn new(rotation: Rotation, mirror_horizontal: bool, mirror_vertical: bool) -> Self {
        Self {
            mirror_horizontal,
            mirror_vertical,
            rotation,
        }
    }

    /// Check if these options leave the image untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Scale factors for the mirror step: `-1` on each flipped axis.
    #[inline]
    pub fn mirror_scale(&self) -> (f64, f64) {
        (
            if self.mirror_horizontal { -1.0 } else { 1.0 },
            if self.mirror_vertical { -1.0 } else { 1.0 },
        )
    }

    pub fn with_rotation(self, rotation: Rotation) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_mirror_horizontal(self, mirror_horizontal: bool) -> Self {
        Self {
            mirror_horizontal,
            ..self
        }
    }

    pub fn with_mirror_vertical(self, mirror_vertical: bool) -> Self {
        Self {
            mirror_vertical,
            ..self
        }
    }
}

/// Shape of the clip region for the circular and rounded-corner tools.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClipShape {
    /// Inscribed circle centred on the surface.
    Circle,
    /// Rectangle covering the surface with rounded corners.
    ///
    /// Radii larger than half the shorter surface side are clamped.
    RoundedRect {
        #[serde(rename = "cornerRadius")]
        corner_radius: f64,
    },
}

impl ClipShape {
    pub fn rounded_rect(corner_radius: f64) -> Self {
        ClipShape::RoundedRect { corner_radius }
    }
}

/// How a source is placed into a target of a different aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitMode {
    /// Scale to fill the target, cropping the excess symmetrically.
    #[default]
    Cover,
    /// Scale to fit inside the target, leaving transparent bars.
    Contain,
}

/// Target aspect ratio `width:height` for the aspect-ratio renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AspectRatioRepr")]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct AspectRatioRepr {
    width: u32,
    height: u32,
}

impl TryFrom<AspectRatioRepr> for AspectRatio {
    type Error = EngineError;

    fn try_from(repr: AspectRatioRepr) -> Result<Self, Self::Error> {
        AspectRatio::new(repr.width, repr.height)
    }
}

impl AspectRatio {
    pub const SQUARE: AspectRatio = AspectRatio::preset(1, 1);
    pub const CLASSIC: AspectRatio = AspectRatio::preset(4, 3);
    pub const PHOTO: AspectRatio = AspectRatio::preset(3, 2);
    pub const WIDESCREEN: AspectRatio = AspectRatio::preset(16, 9);
    pub const STORY: AspectRatio = AspectRatio::preset(9, 16);
    pub const PORTRAIT: AspectRatio = AspectRatio::preset(4, 5);
    pub const ULTRAWIDE: AspectRatio = AspectRatio::preset(21, 9);

    /// Presets offered by the aspect-ratio tool, in display order.
    pub const PRESETS: [AspectRatio; 7] = [
        Self::SQUARE,
        Self::CLASSIC,
        Self::PHOTO,
        Self::WIDESCREEN,
        Self::STORY,
        Self::PORTRAIT,
        Self::ULTRAWIDE,
    ];

    const fn preset(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a ratio; both components must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::invalid_option(format!(
                "aspect ratio components must be non-zero (got {width}:{height})"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `width / height` as a float.
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}
