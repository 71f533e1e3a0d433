//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@rastercut/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use rastercut_core::decode;
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;
use crate::types::JsSourceImage;

/// Decode a JPEG or PNG image from bytes, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(to_js_error)
}

/// EXIF orientation tag (1-8) of encoded image bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastercut_core::encode_png;

    #[test]
    fn test_decode_png() {
        let png = encode_png(&[10, 20, 30, 255].repeat(6), 3, 2).unwrap();
        let image = decode_image(&png).unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(&image.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_orientation_defaults_to_normal() {
        let png = encode_png(&[0u8; 4], 1, 1).unwrap();
        assert_eq!(get_orientation(&png), 1);
    }
}
