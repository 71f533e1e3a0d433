//! WASM-compatible wrapper types for source images and render results.
//!
//! Pixel data lives in WASM memory. Calling `pixels()` copies it out to a
//! JavaScript `Uint8Array`, so keep images on the WASM side between renders
//! and only extract the final result.

use rastercut_core::{RenderResult, SourceImage};
use wasm_bindgen::prelude::*;

use crate::error::to_js_error;

/// A decoded source image (straight-alpha RGBA, EXIF orientation applied).
#[wasm_bindgen]
pub struct JsSourceImage {
    inner: SourceImage,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Wrap raw RGBA pixels (4 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsSourceImage, JsValue> {
        SourceImage::new(width, height, pixels)
            .map(Self::from_source)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer releases it otherwise.
    pub fn free(self) {}
}

impl JsSourceImage {
    pub(crate) fn from_source(inner: SourceImage) -> Self {
        Self { inner }
    }

    pub(crate) fn source(&self) -> &SourceImage {
        &self.inner
    }
}

/// Output of a render.
#[wasm_bindgen]
pub struct JsRenderResult {
    inner: RenderResult,
}

#[wasm_bindgen]
impl JsRenderResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Pipeline generation that produced this result (0 outside a pipeline).
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.inner.generation()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Use this result as the source of another render.
    pub fn to_source(&self) -> Result<JsSourceImage, JsValue> {
        self.inner
            .to_source()
            .map(JsSourceImage::from_source)
            .map_err(to_js_error)
    }

    pub fn free(self) {}
}

impl JsRenderResult {
    pub(crate) fn from_result(inner: RenderResult) -> Self {
        Self { inner }
    }

    pub(crate) fn result(&self) -> &RenderResult {
        &self.inner
    }
}
