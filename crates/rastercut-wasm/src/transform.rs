//! WASM bindings for the render operations and their geometry helpers.
//!
//! Options objects use the core types' camelCase serde form:
//!
//! ```typescript
//! const rotated = render_transform(image, { rotation: 90, mirrorHorizontal: true });
//! const avatar = render_clip(image, { kind: 'roundedRect', cornerRadius: 24 }, 400);
//! const banner = render_aspect(image, 16, 9, 1920, true);
//! ```

use rastercut_core::{
    AspectRatio, ClipShape, FitMode, RenderConfig, RenderRequest, Rotation, TransformOptions,
};
use wasm_bindgen::prelude::*;

use crate::error::{from_js_or_default, to_js_error};
use crate::types::{JsRenderResult, JsSourceImage};

pub(crate) fn run(
    image: &JsSourceImage,
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<JsRenderResult, JsValue> {
    rastercut_core::render(image.source(), request, config)
        .map(JsRenderResult::from_result)
        .map_err(to_js_error)
}

/// Rotate (0/90/180/270, clockwise) and mirror an image.
///
/// `options` and `config` may be omitted for defaults.
#[wasm_bindgen]
pub fn render_transform(
    image: &JsSourceImage,
    options: JsValue,
    config: JsValue,
) -> Result<JsRenderResult, JsValue> {
    let options: TransformOptions = from_js_or_default(options, "transform options")?;
    let config: RenderConfig = from_js_or_default(config, "render config")?;
    run(image, &RenderRequest::Transform(options), &config)
}

/// Fit an image into a `target_size` square and clip it to `shape`
/// (`{ kind: 'circle' }` or `{ kind: 'roundedRect', cornerRadius }`).
#[wasm_bindgen]
pub fn render_clip(
    image: &JsSourceImage,
    shape: JsValue,
    target_size: u32,
    config: JsValue,
) -> Result<JsRenderResult, JsValue> {
    let shape: ClipShape = serde_wasm_bindgen::from_value(shape)
        .map_err(|e| to_js_error(format!("Invalid clip shape: {e}")))?;
    let config: RenderConfig = from_js_or_default(config, "render config")?;
    run(image, &RenderRequest::Clip { shape, target_size }, &config)
}

/// Fit an image onto a `ratio_width:ratio_height` surface whose longer side
/// is `long_edge`. `cover` fills the surface; otherwise the image is
/// letterboxed.
#[wasm_bindgen]
pub fn render_aspect(
    image: &JsSourceImage,
    ratio_width: u32,
    ratio_height: u32,
    long_edge: u32,
    cover: bool,
    config: JsValue,
) -> Result<JsRenderResult, JsValue> {
    let ratio = AspectRatio::new(ratio_width, ratio_height).map_err(to_js_error)?;
    let config: RenderConfig = from_js_or_default(config, "render config")?;
    let request = RenderRequest::Aspect {
        ratio,
        long_edge,
        mode: fit_mode(cover),
    };
    run(image, &request, &config)
}

/// Square cover-fit placement as `{ drawWidth, drawHeight, drawX, drawY }`.
#[wasm_bindgen]
pub fn compute_cover_fit(
    source_width: u32,
    source_height: u32,
    target_size: f64,
) -> Result<JsValue, JsValue> {
    let fit = rastercut_core::compute_cover_fit(source_width, source_height, target_size);
    serde_wasm_bindgen::to_value(&fit).map_err(to_js_error)
}

/// Output `[width, height]` for a rotation in degrees (0, 90, 180 or 270).
#[wasm_bindgen]
pub fn resolve_surface_size(width: u32, height: u32, rotation: u32) -> Result<Vec<u32>, JsValue> {
    let rotation = Rotation::try_from(rotation).map_err(to_js_error)?;
    Ok(surface_size(width, height, rotation))
}

/// The built-in aspect ratios as `[{ width, height }, ...]`.
#[wasm_bindgen]
pub fn aspect_presets() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&AspectRatio::PRESETS).map_err(to_js_error)
}

fn fit_mode(cover: bool) -> FitMode {
    if cover {
        FitMode::Cover
    } else {
        FitMode::Contain
    }
}

fn surface_size(width: u32, height: u32, rotation: Rotation) -> Vec<u32> {
    let (w, h) = rastercut_core::resolve_surface_size(width, height, rotation);
    vec![w, h]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> JsSourceImage {
        let pixels = (0..width * height)
            .flat_map(|i| if i % 2 == 0 { [0, 0, 0, 255] } else { [255, 255, 255, 255] })
            .collect();
        JsSourceImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_run_transform() {
        let image = checker(6, 2);
        let request =
            RenderRequest::Transform(TransformOptions::default().with_rotation(Rotation::Deg90));
        let out = run(&image, &request, &RenderConfig::default()).unwrap();
        assert_eq!((out.width(), out.height()), (2, 6));
    }

    #[test]
    fn test_run_clip() {
        let image = checker(4, 4);
        let request = RenderRequest::Clip {
            shape: ClipShape::Circle,
            target_size: 16,
        };
        let out = run(&image, &request, &RenderConfig::default()).unwrap();
        assert_eq!((out.width(), out.height()), (16, 16));
        assert_eq!(out.pixels()[3], 0);
    }

    #[test]
    fn test_fit_mode_flag() {
        assert_eq!(fit_mode(true), FitMode::Cover);
        assert_eq!(fit_mode(false), FitMode::Contain);
    }

    #[test]
    fn test_surface_size() {
        assert_eq!(surface_size(800, 600, Rotation::Deg90), vec![600, 800]);
        assert_eq!(surface_size(800, 600, Rotation::Deg180), vec![800, 600]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn solid(width: u32, height: u32) -> JsSourceImage {
        let pixels = [200, 10, 10, 255].repeat((width * height) as usize);
        JsSourceImage::new(width, height, pixels).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_render_transform_from_js_options() {
        let options =
            serde_wasm_bindgen::to_value(&TransformOptions::new(Rotation::Deg270, true, false))
                .unwrap();
        let out = render_transform(&solid(8, 3), options, JsValue::UNDEFINED).unwrap();
        assert_eq!((out.width(), out.height()), (3, 8));
    }

    #[wasm_bindgen_test]
    fn test_render_transform_defaults() {
        let out = render_transform(&solid(5, 4), JsValue::UNDEFINED, JsValue::NULL).unwrap();
        assert_eq!((out.width(), out.height()), (5, 4));
    }

    #[wasm_bindgen_test]
    fn test_render_clip_from_js_shape() {
        let shape = serde_wasm_bindgen::to_value(&ClipShape::rounded_rect(4.0)).unwrap();
        let out = render_clip(&solid(10, 10), shape, 20, JsValue::UNDEFINED).unwrap();
        assert_eq!((out.width(), out.height()), (20, 20));
    }

    #[wasm_bindgen_test]
    fn test_render_clip_rejects_bad_shape() {
        let shape = serde_wasm_bindgen::to_value(&"hexagon").unwrap();
        assert!(render_clip(&solid(2, 2), shape, 8, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_aspect() {
        let out = render_aspect(&solid(10, 10), 16, 9, 160, false, JsValue::UNDEFINED).unwrap();
        assert_eq!((out.width(), out.height()), (160, 90));
        assert!(render_aspect(&solid(10, 10), 0, 9, 160, true, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resolve_surface_size_rejects_odd_angle() {
        assert_eq!(resolve_surface_size(4, 2, 270).unwrap(), vec![2, 4]);
        assert!(resolve_surface_size(4, 2, 45).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compute_cover_fit_shape() {
        let fit = compute_cover_fit(1200, 800, 400.0).unwrap();
        let fit: rastercut_core::FitSpec = serde_wasm_bindgen::from_value(fit).unwrap();
        assert_eq!(fit.draw_width, 400.0);
        assert_eq!(fit.draw_x, 0.0);
    }
}
