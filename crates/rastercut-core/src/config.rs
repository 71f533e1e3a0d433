//! Render configuration.
//!
//! Every field has a default, so callers (including the WASM shell, which
//! receives this as a plain JS object) may pass only the fields they care
//! about.

use serde::{Deserialize, Serialize};

/// Resampling filter for draws that scale the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationFilter {
    /// Nearest neighbor - exact, blocky when scaling.
    Nearest,
    /// Bilinear interpolation over the 4 nearest pixels.
    #[default]
    Bilinear,
}

/// Tunables for surface allocation, sampling and clip rasterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Filter used when a draw scales the source (clip and aspect renders).
    /// Right-angle transform renders always sample nearest.
    pub interpolation: InterpolationFilter,
    /// Subpixel grid size (N x N) for clip edge coverage; 1 = hard edge.
    pub clip_samples: u8,
    /// Maximum distance between an arc and its cubic approximation, in pixels.
    pub curve_tolerance: f64,
    /// Upper bound on `width * height` of any surface the engine allocates.
    pub max_surface_pixels: u64,
}

impl RenderConfig {
    pub const DEFAULT_CLIP_SAMPLES: u8 = 4;
    pub const DEFAULT_CURVE_TOLERANCE: f64 = 0.1;
    pub const DEFAULT_MAX_SURFACE_PIXELS: u64 = 100_000_000;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip sampling grid size, never below 1.
    #[inline]
    pub fn effective_clip_samples(&self) -> u32 {
        u32::from(self.clip_samples.max(1))
    }

    /// Curve tolerance, falling back to the default when not a positive number.
    #[inline]
    pub fn effective_curve_tolerance(&self) -> f64 {
        if self.curve_tolerance.is_finite() && self.curve_tolerance > 0.0 {
            self.curve_tolerance
        } else {
            Self::DEFAULT_CURVE_TOLERANCE
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationFilter::default(),
            clip_samples: Self::DEFAULT_CLIP_SAMPLES,
            curve_tolerance: Self::DEFAULT_CURVE_TOLERANCE,
            max_surface_pixels: Self::DEFAULT_MAX_SURFACE_PIXELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::new();
        assert_eq!(config.interpolation, InterpolationFilter::Bilinear);
        assert_eq!(config.clip_samples, 4);
        assert_eq!(config.max_surface_pixels, 100_000_000);
    }

    #[test]
    fn test_effective_clip_samples_floor() {
        let mut config = RenderConfig::new();
        config.clip_samples = 0;
        assert_eq!(config.effective_clip_samples(), 1);
    }

    #[test]
    fn test_effective_curve_tolerance_fallback() {
        let mut config = RenderConfig::new();
        config.curve_tolerance = -1.0;
        assert_eq!(config.effective_curve_tolerance(), 0.1);

        config.curve_tolerance = f64::NAN;
        assert_eq!(config.effective_curve_tolerance(), 0.1);

        config.curve_tolerance = 0.25;
        assert_eq!(config.effective_curve_tolerance(), 0.25);
    }

    #[test]
    fn test_partial_map_uses_defaults() {
        use serde::de::value::{Error, MapDeserializer};

        let entries = vec![("clipSamples", 1u8)];
        let de = MapDeserializer::<_, Error>::new(entries.into_iter());
        let config = RenderConfig::deserialize(de).unwrap();

        assert_eq!(config.clip_samples, 1);
        assert_eq!(config.interpolation, InterpolationFilter::Bilinear);
        assert_eq!(config.curve_tolerance, 0.1);
    }
}
