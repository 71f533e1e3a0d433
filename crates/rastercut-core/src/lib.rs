//! Rastercut Core - raster transform and clip engine
//!
//! This crate renders a decoded source image onto a fresh transparent
//! surface: rotated by a quarter-turn multiple and mirrored, fitted into a
//! square and clipped to a circle or rounded rectangle, or fitted into an
//! aspect-ratio preset. Renders never modify the source and never build on a
//! previous result.

pub mod canvas;
pub mod clip;
pub mod compose;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod options;
pub mod render;

pub use clip::{build_clip_path, ClipPath};
pub use compose::compose_transform;
pub use config::{InterpolationFilter, RenderConfig};
pub use decode::{decode_image, SourceImage};
pub use encode::encode_png;
pub use error::{EngineError, Result};
pub use fit::{compute_cover_fit, compute_fit, FitSpec};
pub use geometry::{resolve_aspect_surface, resolve_surface_size};
pub use options::{AspectRatio, ClipShape, FitMode, Rotation, TransformOptions};
pub use render::{
    render, render_aspect, render_clip, render_transform, RenderPipeline, RenderRequest,
    RenderResult, RenderState,
};

/// Crate version, as reported to callers.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
