//! Output surface sizing.
//!
//! Pure functions, no allocation. The rendered surface must hold the whole
//! transformed image with no blank strips, so for right-angle rotations the
//! surface is either the source size or its transpose.

use crate::options::{AspectRatio, Rotation};

/// Compute the surface size for a source rotated by a right angle.
///
/// Quarter turns (90 and 270) swap width and height; 0 and 180 keep them.
///
/// # Example
///
/// ```
/// use rastercut_core::geometry::resolve_surface_size;
/// use rastercut_core::Rotation;
///
/// assert_eq!(resolve_surface_size(800, 600, Rotation::Deg90), (600, 800));
/// assert_eq!(resolve_surface_size(800, 600, Rotation::Deg180), (800, 600));
/// ```
#[inline]
pub fn resolve_surface_size(
    source_width: u32,
    source_height: u32,
    rotation: Rotation,
) -> (u32, u32) {
    if rotation.is_quarter_turn() {
        (source_height, source_width)
    } else {
        (source_width, source_height)
    }
}

/// Compute a surface with the given aspect ratio whose longer side is
/// `long_edge` pixels.
///
/// The shorter side is rounded to the nearest pixel and never drops below 1.
/// A `long_edge` of 0 is treated as 1.
pub fn resolve_aspect_surface(ratio: AspectRatio, long_edge: u32) -> (u32, u32) {
    let long_edge = long_edge.max(1);
    let (rw, rh) = (f64::from(ratio.width()), f64::from(ratio.height()));

    if rw >= rh {
        let h = (f64::from(long_edge) * rh / rw).round() as u32;
        (long_edge, h.max(1))
    } else {
        let w = (f64::from(long_edge) * rw / rh).round() as u32;
        (w.max(1), long_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turns_swap() {
        assert_eq!(resolve_surface_size(800, 600, Rotation::Deg90), (600, 800));
        assert_eq!(resolve_surface_size(800, 600, Rotation::Deg270), (600, 800));
    }

    #[test]
    fn test_half_turns_keep() {
        assert_eq!(resolve_surface_size(800, 600, Rotation::Deg0), (800, 600));
        assert_eq!(resolve_surface_size(800, 600, Rotation::Deg180), (800, 600));
    }

    #[test]
    fn test_square_unchanged_by_any_rotation() {
        for rot in Rotation::ALL {
            assert_eq!(resolve_surface_size(64, 64, rot), (64, 64));
        }
    }

    #[test]
    fn test_aspect_surface_landscape() {
        assert_eq!(resolve_aspect_surface(AspectRatio::WIDESCREEN, 1920), (1920, 1080));
        assert_eq!(resolve_aspect_surface(AspectRatio::CLASSIC, 400), (400, 300));
    }

    #[test]
    fn test_aspect_surface_portrait() {
        assert_eq!(resolve_aspect_surface(AspectRatio::STORY, 1920), (1080, 1920));
        assert_eq!(resolve_aspect_surface(AspectRatio::PORTRAIT, 500), (400, 500));
    }

    #[test]
    fn test_aspect_surface_square_and_degenerate() {
        assert_eq!(resolve_aspect_surface(AspectRatio::SQUARE, 256), (256, 256));
        assert_eq!(resolve_aspect_surface(AspectRatio::SQUARE, 0), (1, 1));

        let extreme = AspectRatio::new(1000, 1).unwrap();
        assert_eq!(resolve_aspect_surface(extreme, 10), (10, 1));
    }
}
