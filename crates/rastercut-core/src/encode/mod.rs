//! Encoding render results for hand-off.
//!
//! Rendered surfaces carry straight-alpha RGBA, and PNG is the container
//! that keeps the transparent corners of clipped output intact.
//!
//! # Examples
//!
//! ```ignore
//! use rastercut_core::encode::encode_png;
//!
//! let pixels = vec![128u8; 100 * 100 * 4];
//! let png_bytes = encode_png(&pixels, 100, 100).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError, PNG_SIGNATURE};
