//! Clip path construction and pixel coverage.
//!
//! Clip regions are closed vector paths in surface pixel coordinates
//! (origin top-left, y down). Arcs are traced with the canvas convention:
//! angle 0 points right and angles grow clockwise on screen, so 270° is the
//! top of a circle.
//!
//! The rounded rectangle is traced clockwise from the top edge: top edge,
//! top-right corner, right edge, bottom-right corner, bottom edge,
//! bottom-left corner, left edge, top-left corner. Reference renders depend
//! on this exact winding and corner order.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Affine, Arc, BezPath, PathEl, Point, Rect, Shape};

use crate::options::ClipShape;

/// A closed clip region.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPath {
    path: BezPath,
    bounds: Rect,
}

impl ClipPath {
    fn from_path(path: BezPath) -> Self {
        let bounds = path.bounding_box();
        Self { path, bounds }
    }

    /// The path elements, in construction order.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// The underlying path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Axis-aligned bounds of the region.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The same region mapped through `transform`.
    pub fn transformed(&self, transform: Affine) -> Self {
        let mut path = self.path.clone();
        path.apply_affine(transform);
        Self::from_path(path)
    }

    /// Nonzero-winding point containment.
    #[inline]
    pub fn contains(&self, pt: Point) -> bool {
        self.bounds.contains(pt) && self.path.contains(pt)
    }

    /// Fraction of pixel `(px, py)` covered by the region, in `0.0..=1.0`.
    ///
    /// The pixel occupies `[px, px+1) x [py, py+1)`. Coverage is estimated on
    /// an evenly spaced `samples x samples` grid; `samples == 1` tests only
    /// the pixel centre, giving a hard edge. The regions built here are
    /// convex, so a pixel whose four corners are all inside is fully covered,
    /// and one with all corners and the centre outside is treated as empty.
    pub fn coverage(&self, px: u32, py: u32, samples: u32) -> f32 {
        let (x, y) = (f64::from(px), f64::from(py));

        if samples <= 1 {
            return if self.contains(Point::new(x + 0.5, y + 0.5)) {
                1.0
            } else {
                0.0
            };
        }

        let pixel = Rect::new(x, y, x + 1.0, y + 1.0);
        if pixel.intersect(self.bounds).area() <= 0.0 {
            return 0.0;
        }

        let corners = [
            Point::new(x, y),
            Point::new(x + 1.0, y),
            Point::new(x, y + 1.0),
            Point::new(x + 1.0, y + 1.0),
        ];
        let inside = corners.iter().filter(|c| self.path.contains(**c)).count();
        if inside == corners.len() {
            return 1.0;
        }
        if inside == 0 && !self.path.contains(Point::new(x + 0.5, y + 0.5)) {
            return 0.0;
        }

        let step = 1.0 / f64::from(samples);
        let mut hits = 0u32;
        for sy in 0..samples {
            for sx in 0..samples {
                let pt = Point::new(
                    x + (f64::from(sx) + 0.5) * step,
                    y + (f64::from(sy) + 0.5) * step,
                );
                if self.path.contains(pt) {
                    hits += 1;
                }
            }
        }
        hits as f32 / (samples * samples) as f32
    }
}

/// Build the clip region for `shape` on a `surface_width` x `surface_height`
/// surface.
///
/// `tolerance` bounds the distance between each true arc and the cubic
/// segments approximating it.
pub fn build_clip_path(
    shape: ClipShape,
    surface_width: f64,
    surface_height: f64,
    tolerance: f64,
) -> ClipPath {
    let path = match shape {
        ClipShape::Circle => circle_path(surface_width, surface_height, tolerance),
        ClipShape::RoundedRect { corner_radius } => {
            let r = clamp_corner_radius(corner_radius, surface_width, surface_height);
            rounded_rect_path(surface_width, surface_height, r, tolerance)
        }
    };
    ClipPath::from_path(path)
}

/// Clamp a corner radius into `[0, min(w, h) / 2]`.
///
/// Negative and non-finite radii collapse to 0 (square corners).
pub fn clamp_corner_radius(radius: f64, surface_width: f64, surface_height: f64) -> f64 {
    let max = surface_width.min(surface_height) / 2.0;
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    if radius > max {
        log::warn!("corner radius {radius} exceeds {max}, clamping");
        return max;
    }
    radius
}

fn circle_path(w: f64, h: f64, tolerance: f64) -> BezPath {
    let center = Point::new(w / 2.0, h / 2.0);
    let r = w.min(h) / 2.0;

    let mut path = BezPath::new();
    path.move_to((center.x + r, center.y));
    path.extend(Arc::new(center, (r, r), 0.0, TAU, 0.0).append_iter(tolerance));
    path.close_path();
    path
}

fn rounded_rect_path(w: f64, h: f64, r: f64, tolerance: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((r, 0.0));
    path.line_to((w - r, 0.0));
    corner_arc(&mut path, Point::new(w - r, r), r, 3.0 * FRAC_PI_2, tolerance);
    path.line_to((w, h - r));
    corner_arc(&mut path, Point::new(w - r, h - r), r, 0.0, tolerance);
    path.line_to((r, h));
    corner_arc(&mut path, Point::new(r, h - r), r, FRAC_PI_2, tolerance);
    path.line_to((0.0, r));
    corner_arc(&mut path, Point::new(r, r), r, PI, tolerance);
    path.close_path();
    path
}

/// Quarter-turn clockwise arc starting at `start_angle`.
///
/// A zero radius is a sharp corner: the arc would start and end on the
/// current point, so nothing is emitted.
fn corner_arc(path: &mut BezPath, center: Point, r: f64, start_angle: f64, tolerance: f64) {
    if r <= 0.0 {
        return;
    }
    path.extend(Arc::new(center, (r, r), start_angle, FRAC_PI_2, 0.0).append_iter(tolerance));
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: clamped radius never exceeds half the shorter side.
        #[test]
        fn prop_clamp_bounds(
            r in -1000.0f64..=1000.0,
            w in 1.0f64..=500.0,
            h in 1.0f64..=500.0,
        ) {
            let c = clamp_corner_radius(r, w, h);
            prop_assert!(c >= 0.0);
            prop_assert!(c <= w.min(h) / 2.0);
        }

        /// Property: every rounded rect lies within the surface and contains its centre.
        #[test]
        fn prop_rounded_rect_within_surface(
            r in 0.0f64..=300.0,
            w in 2.0f64..=400.0,
            h in 2.0f64..=400.0,
        ) {
            let clip = build_clip_path(ClipShape::rounded_rect(r), w, h, 0.1);
            let b = clip.bounds();
            prop_assert!(b.x0 >= -1e-6 && b.y0 >= -1e-6);
            prop_assert!(b.x1 <= w + 1e-6 && b.y1 <= h + 1e-6);
            prop_assert!(clip.contains(Point::new(w / 2.0, h / 2.0)));
        }

        /// Property: coverage is always a fraction.
        #[test]
        fn prop_coverage_in_unit_range(
            px in 0u32..40,
            py in 0u32..40,
            samples in 1u32..=6,
            circle in any::<bool>(),
        ) {
            let shape = if circle { ClipShape::Circle } else { ClipShape::rounded_rect(12.0) };
            let clip = build_clip_path(shape, 40.0, 30.0, 0.1);
            let c = clip.coverage(px, py, samples);
            prop_assert!((0.0..=1.0).contains(&c));
        }
    }
}
