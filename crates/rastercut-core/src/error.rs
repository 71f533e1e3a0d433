//! Engine-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures a render can report to its caller.
///
/// None of these are transient: the same input fails the same way, so the
/// engine never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Source bytes could not be turned into a drawable image.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// The target drawing surface could not be created.
    #[error("cannot acquire {width}x{height} surface: {reason}")]
    SurfaceAcquisition {
        width: u32,
        height: u32,
        reason: String,
    },

    /// An option value outside its domain with no safe clamp.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The result buffer could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

impl EngineError {
    pub(crate) fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOption(msg.into())
    }

    pub(crate) fn surface(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::SurfaceAcquisition {
            width,
            height,
            reason: reason.into(),
        }
    }
}
