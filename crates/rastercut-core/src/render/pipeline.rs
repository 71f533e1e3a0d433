//! Stateful render pipeline for interactive callers.

use std::fmt;

use super::{RenderPlan, RenderRequest, RenderResult};
use crate::config::RenderConfig;
use crate::decode::{decode_image, SourceImage};
use crate::error::{EngineError, Result};

/// Where the pipeline is in its current render.
///
/// `Idle -> Resolving -> Drawing -> Ready | Failed`. A new request may be
/// submitted from any state and always starts again from the original
/// source.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Idle,
    Resolving(RenderRequest),
    Drawing,
    Ready(RenderResult),
    Failed(EngineError),
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolving(_) => "resolving",
            Self::Drawing => "drawing",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns one decoded source and renders requests against it.
///
/// Each submission bumps a generation counter. Results carry the generation
/// that produced them, so a caller holding an older result can tell it has
/// been superseded with [`is_current`](Self::is_current).
#[derive(Debug)]
pub struct RenderPipeline {
    source: SourceImage,
    config: RenderConfig,
    state: RenderState,
    generation: u64,
}

impl RenderPipeline {
    pub fn new(source: SourceImage, config: RenderConfig) -> Self {
        log::debug!(
            "render pipeline ready for {}x{} source",
            source.width(),
            source.height()
        );
        Self {
            source,
            config,
            state: RenderState::Idle,
            generation: 0,
        }
    }

    /// Decode `bytes` and build a pipeline around the result.
    pub fn from_encoded(bytes: &[u8], config: RenderConfig) -> Result<Self> {
        let source = decode_image(bytes)?;
        Ok(Self::new(source, config))
    }

    #[inline]
    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Number of requests submitted over the pipeline's lifetime.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The latest completed result, if the last request succeeded.
    pub fn result(&self) -> Option<&RenderResult> {
        match &self.state {
            RenderState::Ready(result) => Some(result),
            _ => None,
        }
    }

    /// Whether `result` came from the most recent submission.
    pub fn is_current(&self, result: &RenderResult) -> bool {
        result.generation() == self.generation && self.result().is_some()
    }

    /// Render `request` against the original source.
    ///
    /// On failure the pipeline moves to [`RenderState::Failed`] and keeps no
    /// partial output.
    pub fn submit(&mut self, request: RenderRequest) -> Result<RenderResult> {
        self.generation += 1;
        let generation = self.generation;

        self.transition(RenderState::Resolving(request));
        let plan = RenderPlan::resolve(&self.source, &request, &self.config);

        self.transition(RenderState::Drawing);
        match plan.execute(&self.source, &self.config) {
            Ok(result) => {
                let result = result.with_generation(generation);
                log::debug!(
                    "render #{generation} ({}) done: {}x{}",
                    request.kind(),
                    result.width(),
                    result.height()
                );
                self.transition(RenderState::Ready(result.clone()));
                Ok(result)
            }
            Err(err) => {
                log::warn!("render #{generation} ({}) failed: {err}", request.kind());
                self.transition(RenderState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Swap in a new source. Any previous result is discarded.
    ///
    /// The generation counter keeps counting, so results rendered from the
    /// old source never read as current.
    pub fn replace_source(&mut self, source: SourceImage) {
        log::debug!(
            "replacing {}x{} source with {}x{}",
            self.source.width(),
            self.source.height(),
            source.width(),
            source.height()
        );
        self.source = source;
        self.transition(RenderState::Idle);
    }

    /// Decode `bytes` and use them as the new source.
    ///
    /// A decode failure leaves the current source in place and moves the
    /// pipeline to [`RenderState::Failed`].
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        match decode_image(bytes) {
            Ok(source) => {
                self.replace_source(source);
                Ok(())
            }
            Err(err) => {
                let err = EngineError::from(err);
                log::warn!("source decode failed: {err}");
                self.transition(RenderState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Drop any result and return to idle, keeping the source.
    pub fn reset(&mut self) {
        self.transition(RenderState::Idle);
    }

    fn transition(&mut self, next: RenderState) {
        log::trace!("render #{}: {} -> {}", self.generation, self.state, next);
        self.state = next;
    }
}
