//! Rendering a source image onto a fresh surface.
//!
//! Every render starts from the original decoded source and a new transparent
//! surface, so options never accumulate across renders. Work happens in two
//! phases: [`RenderPlan::resolve`] turns a [`RenderRequest`] into surface
//! dimensions, a placement rectangle and an optional clip region, and
//! [`RenderPlan::execute`] acquires the surface and draws into it.
//!
//! [`RenderPipeline`] wraps this in the idle/resolving/drawing/ready state
//! machine used by interactive callers.

mod pipeline;
mod plan;

pub use pipeline::{RenderPipeline, RenderState};
pub use plan::{DrawPlan, RenderPlan};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::decode::SourceImage;
use crate::encode::encode_png;
use crate::error::Result;
use crate::options::{AspectRatio, ClipShape, FitMode, TransformOptions};

/// One render to perform against a source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderRequest {
    /// Rotate and mirror the whole image.
    Transform(TransformOptions),
    /// Fit the image into a `target_size` square and clip it to `shape`.
    Clip {
        shape: ClipShape,
        #[serde(rename = "targetSize")]
        target_size: u32,
    },
    /// Fit the image into a surface of the given aspect ratio.
    Aspect {
        ratio: AspectRatio,
        #[serde(rename = "longEdge")]
        long_edge: u32,
        #[serde(default)]
        mode: FitMode,
    },
}

impl RenderRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transform(_) => "transform",
            Self::Clip { .. } => "clip",
            Self::Aspect { .. } => "aspect",
        }
    }
}

impl From<TransformOptions> for RenderRequest {
    fn from(options: TransformOptions) -> Self {
        Self::Transform(options)
    }
}

/// Pixels produced by a completed render.
///
/// The buffer is shared and never mutated after the render finishes, so
/// cloning a result is cheap.
#[derive(Clone, PartialEq)]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
    generation: u64,
}

impl RenderResult {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Straight-alpha RGBA pixel data (4 bytes per pixel, row-major).
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pipeline generation that produced this result; 0 for standalone renders.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// RGBA value at `(x, y)`. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.to_vec())
    }

    /// Copy the pixels into a new source, to feed one render into another.
    pub fn to_source(&self) -> Result<SourceImage> {
        Ok(SourceImage::new(self.width, self.height, self.pixels.to_vec())?)
    }

    /// Encode the result as PNG, keeping transparency.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        Ok(encode_png(&self.pixels, self.width, self.height)?)
    }
}

impl fmt::Debug for RenderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderResult")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Render `source` rotated and mirrored per `options`.
///
/// The output is `resolve_surface_size(w, h, options.rotation)` and the
/// source fills it exactly. Sampling is nearest-neighbour regardless of
/// `config.interpolation`, so every output pixel is a source pixel.
pub fn render_transform(
    source: &SourceImage,
    options: &TransformOptions,
    config: &RenderConfig,
) -> Result<RenderResult> {
    render(source, &RenderRequest::Transform(*options), config)
}

/// Render `source` fitted into a `target_size` square and clipped to `shape`.
///
/// Everything outside the clip region is fully transparent.
pub fn render_clip(
    source: &SourceImage,
    shape: ClipShape,
    target_size: u32,
    config: &RenderConfig,
) -> Result<RenderResult> {
    render(source, &RenderRequest::Clip { shape, target_size }, config)
}

/// Render `source` onto a `ratio` surface whose longer side is `long_edge`.
pub fn render_aspect(
    source: &SourceImage,
    ratio: AspectRatio,
    long_edge: u32,
    mode: FitMode,
    config: &RenderConfig,
) -> Result<RenderResult> {
    render(
        source,
        &RenderRequest::Aspect {
            ratio,
            long_edge,
            mode,
        },
        config,
    )
}

/// Resolve and draw `request` against `source`.
pub fn render(
    source: &SourceImage,
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<RenderResult> {
    RenderPlan::resolve(source, request, config).execute(source, config)
}
