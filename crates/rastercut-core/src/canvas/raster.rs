use kurbo::{Affine, Point, Rect};

use super::sample::{blend_over, sample_bilinear, sample_nearest};
use super::DrawingContext;
use crate::clip::ClipPath;
use crate::config::{InterpolationFilter, RenderConfig};
use crate::decode::SourceImage;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
struct CanvasState {
    transform: Affine,
    /// Clip regions already mapped into device space.
    clips: Vec<ClipPath>,
    interpolation: InterpolationFilter,
}

/// RGBA8 raster surface implementing [`DrawingContext`].
#[derive(Debug)]
pub struct RasterCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    state: CanvasState,
    stack: Vec<CanvasState>,
    clip_samples: u32,
}

impl RasterCanvas {
    /// Acquire a transparent `width` x `height` surface.
    ///
    /// # Errors
    ///
    /// `SurfaceAcquisition` when a dimension is zero, the area exceeds
    /// `config.max_surface_pixels`, or the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, config: &RenderConfig) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::surface(width, height, "zero-sized surface"));
        }

        let area = u64::from(width) * u64::from(height);
        if area > config.max_surface_pixels {
            return Err(EngineError::surface(
                width,
                height,
                format!(
                    "{area} pixels exceeds the limit of {}",
                    config.max_surface_pixels
                ),
            ));
        }

        let len = area
            .checked_mul(4)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| EngineError::surface(width, height, "buffer size overflows"))?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|e| EngineError::surface(width, height, e.to_string()))?;
        pixels.resize(len, 0);

        log::trace!("acquired {width}x{height} surface");

        Ok(Self {
            width,
            height,
            pixels,
            state: CanvasState {
                transform: Affine::IDENTITY,
                clips: Vec::new(),
                interpolation: config.interpolation,
            },
            stack: Vec::new(),
            clip_samples: config.effective_clip_samples(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The current user-to-device transform.
    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    /// RGBA pixel data (4 bytes per pixel, row-major).
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Give up the surface, keeping its pixels.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn clip_coverage(&self, px: u32, py: u32) -> f32 {
        let mut coverage = 1.0;
        for clip in &self.state.clips {
            coverage *= clip.coverage(px, py, self.clip_samples);
            if coverage <= 0.0 {
                return 0.0;
            }
        }
        coverage
    }

    /// Device pixel range touched by `area`, clamped to the surface.
    fn pixel_span(&self, area: Rect) -> Option<(u32, u32, u32, u32)> {
        let mut area = area;
        for clip in &self.state.clips {
            area = area.intersect(clip.bounds());
        }
        let x0 = area.x0.floor().max(0.0);
        let y0 = area.y0.floor().max(0.0);
        let x1 = area.x1.ceil().min(f64::from(self.width));
        let y1 = area.y1.ceil().min(f64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl DrawingContext for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform * Affine::translate((dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform = self.state.transform * Affine::rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform * Affine::scale_non_uniform(sx, sy);
    }

    fn clip(&mut self, path: &ClipPath) {
        let device = path.transformed(self.state.transform);
        self.state.clips.push(device);
    }

    fn set_interpolation(&mut self, filter: InterpolationFilter) {
        self.state.interpolation = filter;
    }

    fn draw_image(&mut self, image: &SourceImage, dest: Rect) {
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));

        let image_to_device = self.state.transform
            * Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        let det = image_to_device.determinant();
        if det == 0.0 || !det.is_finite() {
            return;
        }
        let device_to_image = image_to_device.inverse();

        let footprint = image_to_device.transform_rect_bbox(Rect::new(0.0, 0.0, iw, ih));
        let Some((x0, y0, x1, y1)) = self.pixel_span(footprint) else {
            return;
        };

        let filter = self.state.interpolation;
        let row_stride = self.width as usize * 4;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = device_to_image * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if p.x < 0.0 || p.y < 0.0 || p.x >= iw || p.y >= ih {
                    continue;
                }

                let coverage = self.clip_coverage(x, y);
                if coverage <= 0.0 {
                    continue;
                }

                let src = match filter {
                    InterpolationFilter::Nearest => sample_nearest(image, p.x, p.y),
                    InterpolationFilter::Bilinear => sample_bilinear(image, p.x, p.y),
                };

                let idx = y as usize * row_stride + x as usize * 4;
                blend_over(&mut self.pixels[idx..idx + 4], src, coverage);
            }
        }
    }
}
