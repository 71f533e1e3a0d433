//! Resolving a render request into concrete geometry, and drawing it.

use kurbo::Rect;

use super::{RenderRequest, RenderResult};
use crate::canvas::{DrawingContext, RasterCanvas};
use crate::clip::{build_clip_path, ClipPath};
use crate::compose::compose_transform;
use crate::config::{InterpolationFilter, RenderConfig};
use crate::decode::SourceImage;
use crate::error::Result;
use crate::fit::{compute_cover_fit, compute_fit};
use crate::geometry::{resolve_aspect_surface, resolve_surface_size};
use crate::options::TransformOptions;

/// What to draw once the surface exists.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPlan {
    /// Rotate/mirror the whole source onto the surface.
    Transform(TransformOptions),
    /// Draw the source onto `dest`, optionally restricted to `clip`.
    Placed { clip: Option<ClipPath>, dest: Rect },
}

/// Fully resolved geometry for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub surface_width: u32,
    pub surface_height: u32,
    pub draw: DrawPlan,
}

impl RenderPlan {
    /// Resolve surface size, placement and clip region for `request`.
    pub fn resolve(source: &SourceImage, request: &RenderRequest, config: &RenderConfig) -> Self {
        let (sw, sh) = source.dimensions();

        match *request {
            RenderRequest::Transform(options) => {
                let (w, h) = resolve_surface_size(sw, sh, options.rotation);
                Self {
                    surface_width: w,
                    surface_height: h,
                    draw: DrawPlan::Transform(options),
                }
            }
            RenderRequest::Clip { shape, target_size } => {
                let size = f64::from(target_size);
                let clip = build_clip_path(shape, size, size, config.effective_curve_tolerance());
                let fit = compute_cover_fit(sw, sh, size);
                Self {
                    surface_width: target_size,
                    surface_height: target_size,
                    draw: DrawPlan::Placed {
                        clip: Some(clip),
                        dest: fit.rect(),
                    },
                }
            }
            RenderRequest::Aspect {
                ratio,
                long_edge,
                mode,
            } => {
                let (w, h) = resolve_aspect_surface(ratio, long_edge);
                let fit = compute_fit(sw, sh, f64::from(w), f64::from(h), mode);
                Self {
                    surface_width: w,
                    surface_height: h,
                    draw: DrawPlan::Placed {
                        clip: None,
                        dest: fit.rect(),
                    },
                }
            }
        }
    }

    /// Acquire a fresh surface and draw `source` onto it.
    ///
    /// # Errors
    ///
    /// `SurfaceAcquisition` if the surface cannot be created.
    pub fn execute(&self, source: &SourceImage, config: &RenderConfig) -> Result<RenderResult> {
        let mut canvas = RasterCanvas::new(self.surface_width, self.surface_height, config)?;
        self.draw_into(&mut canvas, source);
        Ok(RenderResult::new(
            self.surface_width,
            self.surface_height,
            canvas.into_pixels(),
        ))
    }

    /// Issue this plan's drawing operations on `ctx`.
    pub fn draw_into<C>(&self, ctx: &mut C, source: &SourceImage)
    where
        C: DrawingContext + ?Sized,
    {
        match &self.draw {
            DrawPlan::Transform(options) => {
                // Right-angle transforms map pixel centres onto pixel centres.
                ctx.save();
                ctx.set_interpolation(InterpolationFilter::Nearest);
                compose_transform(ctx, source, options);
                ctx.restore();
            }
            DrawPlan::Placed { clip, dest } => {
                ctx.save();
                if let Some(clip) = clip {
                    ctx.clip(clip);
                }
                ctx.draw_image(source, *dest);
                ctx.restore();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AspectRatio, ClipShape, FitMode, Rotation};

    fn source(width: u32, height: u32) -> SourceImage {
        SourceImage::new(width, height, vec![255u8; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn test_transform_plan_swaps_on_quarter_turn() {
        let plan = RenderPlan::resolve(
            &source(8, 6),
            &RenderRequest::Transform(TransformOptions::default().with_rotation(Rotation::Deg270)),
            &RenderConfig::default(),
        );
        assert_eq!((plan.surface_width, plan.surface_height), (6, 8));
        assert!(matches!(plan.draw, DrawPlan::Transform(_)));
    }

    #[test]
    fn test_clip_plan_uses_square_fit() {
        let plan = RenderPlan::resolve(
            &source(1200, 800),
            &RenderRequest::Clip {
                shape: ClipShape::Circle,
                target_size: 400,
            },
            &RenderConfig::default(),
        );

        assert_eq!((plan.surface_width, plan.surface_height), (400, 400));
        let DrawPlan::Placed { clip, dest } = plan.draw else {
            panic!("expected a placed draw");
        };
        assert!(clip.is_some());
        assert!((dest.width() - 400.0).abs() < 1e-9);
        assert!((dest.height() - 266.666_666_67).abs() < 1e-6);
        assert!((dest.y0 - 66.666_666_67).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_plan_has_no_clip() {
        let plan = RenderPlan::resolve(
            &source(100, 100),
            &RenderRequest::Aspect {
                ratio: AspectRatio::WIDESCREEN,
                long_edge: 160,
                mode: FitMode::Cover,
            },
            &RenderConfig::default(),
        );

        assert_eq!((plan.surface_width, plan.surface_height), (160, 90));
        let DrawPlan::Placed { clip, dest } = plan.draw else {
            panic!("expected a placed draw");
        };
        assert!(clip.is_none());
        assert!((dest.width() - 160.0).abs() < 1e-9);
        assert!((dest.y0 + 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_execute_zero_target_fails() {
        let plan = RenderPlan::resolve(
            &source(4, 4),
            &RenderRequest::Clip {
                shape: ClipShape::Circle,
                target_size: 0,
            },
            &RenderConfig::default(),
        );
        assert!(plan.execute(&source(4, 4), &RenderConfig::default()).is_err());
    }
}
