//! PNG encoding WASM bindings.
//!
//! ```typescript
//! import { render_clip, encode_png } from '@rastercut/wasm';
//!
//! const avatar = render_clip(image, { kind: 'circle' }, 400);
//! const blob = new Blob([encode_png(avatar)], { type: 'image/png' });
//! ```

use rastercut_core::encode;
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsRenderResult;

/// Encode a render result as PNG bytes, keeping transparency.
#[wasm_bindgen]
pub fn encode_png(result: &JsRenderResult) -> Result<Vec<u8>, JsValue> {
    result.result().encode_png().map_err(to_js_error)
}

/// Encode raw RGBA pixel data (4 bytes per pixel, row-major) as PNG bytes.
#[wasm_bindgen]
pub fn encode_png_pixels(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastercut_core::encode::PNG_SIGNATURE;

    #[test]
    fn test_encode_pixels() {
        let png = encode_png_pixels(&[255u8; 4 * 4 * 4], 4, 4).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_pixels_wrong_length_throws() {
        assert!(encode_png_pixels(&[0u8; 5], 2, 2).is_err());
    }
}
