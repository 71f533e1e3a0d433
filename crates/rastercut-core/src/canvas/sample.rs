//! Pixel sampling and compositing for the raster canvas.
//!
//! Sampling uses inverse mapping: for each destination pixel, the canvas maps
//! the pixel centre back into source image space and reads the source there.
//! Source coordinates are continuous; pixel `(i, j)` covers
//! `[i, i+1) x [j, j+1)` and its centre is `(i + 0.5, j + 0.5)`.

use crate::decode::SourceImage;

/// Read the pixel whose area contains `(x, y)`.
///
/// The caller guarantees `0 <= x < width` and `0 <= y < height`.
#[inline]
pub(crate) fn sample_nearest(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let px = (x.floor() as u32).min(image.width() - 1);
    let py = (y.floor() as u32).min(image.height() - 1);
    image.pixel(px, py)
}

/// Sample using bilinear interpolation over the 4 nearest pixel centres.
///
/// Neighbours past the image edge are clamped to the edge pixel. Colour is
/// interpolated premultiplied so transparent pixels don't bleed their RGB
/// into opaque neighbours.
pub(crate) fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = f64::from(image.width() - 1);
    let max_y = f64::from(image.height() - 1);

    let xf = (x - 0.5).clamp(0.0, max_x);
    let yf = (y - 0.5).clamp(0.0, max_y);

    let x0 = xf.floor() as u32;
    let y0 = yf.floor() as u32;
    let x1 = (x0 + 1).min(image.width() - 1);
    let y1 = (y0 + 1).min(image.height() - 1);

    // Fractional distances
    let fx = xf - f64::from(x0);
    let fy = yf - f64::from(y0);

    let taps = [
        (image.pixel(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (image.pixel(x1, y0), fx * (1.0 - fy)),
        (image.pixel(x0, y1), (1.0 - fx) * fy),
        (image.pixel(x1, y1), fx * fy),
    ];

    let mut rgb = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (p, w) in taps {
        let a = f64::from(p[3]) * w;
        alpha += a;
        for i in 0..3 {
            rgb[i] += f64::from(p[i]) * a;
        }
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut result = [0u8; 4];
    for i in 0..3 {
        result[i] = (rgb[i] / alpha).clamp(0.0, 255.0).round() as u8;
    }
    result[3] = alpha.clamp(0.0, 255.0).round() as u8;
    result
}

/// Composite `src` over the RGBA pixel `dst` (straight alpha), with the
/// source alpha scaled by `coverage`.
#[inline]
pub(crate) fn blend_over(dst: &mut [u8], src: [u8; 4], coverage: f32) {
    let sa = f32::from(src[3]) / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }

    // Opaque, fully covered source or an empty destination: no mixing.
    if (src[3] == 255 && coverage >= 1.0) || dst[3] == 0 {
        dst[..3].copy_from_slice(&src[..3]);
        dst[3] = (sa * 255.0).round() as u8;
        return;
    }

    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * da * (1.0 - sa)) / out_a;
        dst[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}
