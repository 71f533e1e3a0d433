//! Rotate/mirror composition against a drawing context.
//!
//! The operation order is a fixed contract:
//!
//! 1. save state
//! 2. translate the origin to the surface centre
//! 3. rotate by the option's angle (clockwise)
//! 4. scale by -1 on each mirrored axis
//! 5. draw the source centred on the transformed origin
//! 6. restore state
//!
//! Because context transforms compose on the right, the image is mirrored in
//! its own frame and then rotated, which reads as "rotate the physical image,
//! then flip the rotated result". Swapping steps 3 and 4 gives a different
//! image whenever a quarter turn is combined with a single mirror flag.

use kurbo::Rect;

use crate::canvas::DrawingContext;
use crate::decode::SourceImage;
use crate::options::TransformOptions;

/// Issue the rotate/mirror draw sequence for `source` on `ctx`.
///
/// `ctx` must already be sized with
/// [`resolve_surface_size`](crate::geometry::resolve_surface_size) for the
/// same rotation; the source then exactly fills it.
pub fn compose_transform<C>(ctx: &mut C, source: &SourceImage, options: &TransformOptions)
where
    C: DrawingContext + ?Sized,
{
    let (surface_w, surface_h) = ctx.size();
    let (w, h) = (f64::from(source.width()), f64::from(source.height()));
    let (sx, sy) = options.mirror_scale();

    ctx.save();
    ctx.translate(f64::from(surface_w) / 2.0, f64::from(surface_h) / 2.0);
    ctx.rotate(options.rotation.radians());
    ctx.scale(sx, sy);
    ctx.draw_image(source, Rect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0));
    ctx.restore();
}
