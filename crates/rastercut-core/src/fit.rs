//! Placement of a source image inside a target region.
//!
//! [`compute_cover_fit`] is the square-target placement shared by the
//! circular and rounded-corner previews. [`compute_fit`] generalizes to
//! rectangular targets for the aspect-ratio renderer, in either cover
//! (crop) or contain (letterbox) mode.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::options::FitMode;

/// Where and how large to draw the source inside the target, in target pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitSpec {
    pub draw_width: f64,
    pub draw_height: f64,
    pub draw_x: f64,
    pub draw_y: f64,
}

impl FitSpec {
    /// The destination rectangle described by this fit.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.draw_x,
            self.draw_y,
            self.draw_x + self.draw_width,
            self.draw_y + self.draw_height,
        )
    }
}

/// Place a source into a square target of side `target_size`.
///
/// The longer source dimension spans the full target; the shorter one is
/// scaled by the source aspect and centred, with the slack split evenly on
/// both sides:
///
/// - wider than tall: `draw_width = S`, `draw_height = S / aspect`, `draw_y`
///   takes half the vertical slack;
/// - otherwise: `draw_height = S`, `draw_width = S * aspect`, `draw_x` takes
///   half the horizontal slack.
///
/// `source_height` must be non-zero; a decoded image always satisfies this.
pub fn compute_cover_fit(source_width: u32, source_height: u32, target_size: f64) -> FitSpec {
    debug_assert!(source_height > 0, "source height must be non-zero");

    let aspect = f64::from(source_width) / f64::from(source_height);

    if aspect > 1.0 {
        let draw_height = target_size / aspect;
        FitSpec {
            draw_width: target_size,
            draw_height,
            draw_x: 0.0,
            draw_y: (target_size - draw_height) / 2.0,
        }
    } else {
        let draw_width = target_size * aspect;
        FitSpec {
            draw_width,
            draw_height: target_size,
            draw_x: (target_size - draw_width) / 2.0,
            draw_y: 0.0,
        }
    }
}

/// Place a source into a `target_width` x `target_height` region with a
/// uniform scale, centred on both axes.
///
/// - [`FitMode::Cover`]: the larger of the two axis scales; the draw rect
///   contains the target and the excess is cropped symmetrically.
/// - [`FitMode::Contain`]: the smaller scale; the draw rect lies inside the
///   target, leaving symmetric bars.
pub fn compute_fit(
    source_width: u32,
    source_height: u32,
    target_width: f64,
    target_height: f64,
    mode: FitMode,
) -> FitSpec {
    debug_assert!(source_width > 0 && source_height > 0, "source must be non-empty");

    let sx = target_width / f64::from(source_width);
    let sy = target_height / f64::from(source_height);
    let scale = match mode {
        FitMode::Cover => sx.max(sy),
        FitMode::Contain => sx.min(sy),
    };

    let draw_width = f64::from(source_width) * scale;
    let draw_height = f64::from(source_height) * scale;

    FitSpec {
        draw_width,
        draw_height,
        draw_x: (target_width - draw_width) / 2.0,
        draw_y: (target_height - draw_height) / 2.0,
    }
}
