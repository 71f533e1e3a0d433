//! Rastercut WASM - WebAssembly bindings for the rastercut engine
//!
//! # Module Structure
//!
//! - `types` - wrapper types for source images and render results
//! - `decode` - image decoding bindings
//! - `transform` - rotate/mirror, clip and aspect-fit renders
//! - `pipeline` - the stateful `JsRenderPipeline` class
//! - `encode` - PNG export
//! - `logger` - `log` output routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, render_clip, encode_png } from '@rastercut/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const avatar = render_clip(image, { kind: 'circle' }, 400);
//! const png = encode_png(avatar);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod error;
mod logger;
mod pipeline;
mod transform;
mod types;

pub use decode::{decode_image, get_orientation};
pub use encode::{encode_png, encode_png_pixels};
pub use logger::set_log_level;
pub use pipeline::JsRenderPipeline;
pub use transform::{
    aspect_presets, compute_cover_fit, render_aspect, render_clip, render_transform,
    resolve_surface_size,
};
pub use types::{JsRenderResult, JsSourceImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
    log::debug!("rastercut {} loaded", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
