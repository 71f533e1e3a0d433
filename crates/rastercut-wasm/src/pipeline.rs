//! Stateful render pipeline exposed as a JavaScript class.
//!
//! ```typescript
//! const pipeline = JsRenderPipeline.from_bytes(bytes);
//! const result = pipeline.submit({ kind: 'transform', rotation: 90 });
//! if (pipeline.is_current(result)) draw(result);
//! ```

use rastercut_core::{RenderConfig, RenderPipeline, RenderRequest};
use wasm_bindgen::prelude::*;

use crate::error::{from_js_or_default, to_js_error};
use crate::types::{JsRenderResult, JsSourceImage};

#[wasm_bindgen]
pub struct JsRenderPipeline {
    inner: RenderPipeline,
}

#[wasm_bindgen]
impl JsRenderPipeline {
    /// Build a pipeline around a copy of `image`.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsSourceImage, config: JsValue) -> Result<JsRenderPipeline, JsValue> {
        let config: RenderConfig = from_js_or_default(config, "render config")?;
        Ok(Self::with_config(image, config))
    }

    /// Decode `bytes` and build a pipeline around the result.
    pub fn from_bytes(bytes: &[u8], config: JsValue) -> Result<JsRenderPipeline, JsValue> {
        let config: RenderConfig = from_js_or_default(config, "render config")?;
        RenderPipeline::from_encoded(bytes, config)
            .map(|inner| Self { inner })
            .map_err(to_js_error)
    }

    /// Render a request (`{ kind: 'transform' | 'clip' | 'aspect', ... }`).
    pub fn submit(&mut self, request: JsValue) -> Result<JsRenderResult, JsValue> {
        let request: RenderRequest = serde_wasm_bindgen::from_value(request)
            .map_err(|e| to_js_error(format!("Invalid render request: {e}")))?;
        self.submit_request(request)
    }

    /// Decode `bytes` as the new source.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(bytes).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> u64 {
        self.inner.generation()
    }

    /// "idle", "resolving", "drawing", "ready" or "failed".
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn source_width(&self) -> u32 {
        self.inner.source().width()
    }

    #[wasm_bindgen(getter)]
    pub fn source_height(&self) -> u32 {
        self.inner.source().height()
    }

    /// Whether `result` came from the latest submission.
    pub fn is_current(&self, result: &JsRenderResult) -> bool {
        self.inner.is_current(result.result())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl JsRenderPipeline {
    pub(crate) fn with_config(image: &JsSourceImage, config: RenderConfig) -> Self {
        Self {
            inner: RenderPipeline::new(image.source().clone(), config),
        }
    }

    pub(crate) fn submit_request(
        &mut self,
        request: RenderRequest,
    ) -> Result<JsRenderResult, JsValue> {
        self.inner
            .submit(request)
            .map(JsRenderResult::from_result)
            .map_err(to_js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rastercut_core::{ClipShape, Rotation, TransformOptions};

    fn image() -> JsSourceImage {
        JsSourceImage::new(4, 2, [1, 2, 3, 255].repeat(8)).unwrap()
    }

    #[test]
    fn test_generations_advance() {
        let mut pipeline = JsRenderPipeline::with_config(&image(), RenderConfig::default());
        assert_eq!(pipeline.state(), "idle");

        let first = pipeline
            .submit_request(TransformOptions::default().with_rotation(Rotation::Deg90).into())
            .unwrap();
        let second = pipeline
            .submit_request(RenderRequest::Clip {
                shape: ClipShape::Circle,
                target_size: 8,
            })
            .unwrap();

        assert_eq!(pipeline.generation(), 2);
        assert_eq!((first.width(), first.height()), (2, 4));
        assert!(!pipeline.is_current(&first));
        assert!(pipeline.is_current(&second));
        assert_eq!(pipeline.state(), "ready");

        pipeline.reset();
        assert_eq!(pipeline.state(), "idle");
        assert_eq!((pipeline.source_width(), pipeline.source_height()), (4, 2));
    }
}
