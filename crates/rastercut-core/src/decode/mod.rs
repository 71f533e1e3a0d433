//! Source image decoding.
//!
//! This module turns encoded bytes handed over by the file-loading layer into
//! a [`SourceImage`]: straight-alpha RGBA8 pixels with EXIF orientation
//! already applied. Decoding happens once per selected file; every render
//! afterwards reads the same decoded pixels.
//!
//! # Examples
//!
//! ```ignore
//! use rastercut_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", source.width(), source.height());
//! ```

mod loader;
mod types;

pub use loader::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation, SourceImage};
