//! Drawing context abstraction and the CPU raster surface behind it.
//!
//! [`DrawingContext`] is the small subset of a 2D canvas API the engine
//! issues commands against: a current transform that later operations
//! post-multiply, a save/restore stack, path clipping and image drawing.
//! Renders are written against the trait so the exact operation sequence can
//! be inspected in isolation from rasterization.
//!
//! [`RasterCanvas`] is the concrete surface: an RGBA8 buffer, initially fully
//! transparent, drawn into with inverse-mapped sampling.

mod raster;
mod sample;

pub use raster::RasterCanvas;

use kurbo::Rect;

use crate::clip::ClipPath;
use crate::config::InterpolationFilter;
use crate::decode::SourceImage;

/// 2D drawing operations, in canvas semantics.
///
/// Transform calls compose with the current transform on the right, so the
/// last call applies to drawn content first.
pub trait DrawingContext {
    /// Surface `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Push the current transform, clip and interpolation state.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`save`](Self::save). Unbalanced
    /// calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotate by `radians`, clockwise-positive on a y-down surface.
    fn rotate(&mut self, radians: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Intersect the clip region with `path`, interpreted in the current
    /// user space.
    fn clip(&mut self, path: &ClipPath);

    /// Filter used by subsequent draws that resample the image.
    fn set_interpolation(&mut self, filter: InterpolationFilter);

    /// Draw the whole `image` stretched onto `dest` (user space).
    fn draw_image(&mut self, image: &SourceImage, dest: Rect);
}
