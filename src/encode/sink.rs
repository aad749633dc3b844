use crate::foundation::core::FrameIndex;
use crate::foundation::error::RainResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of finished, opaque frames.
///
/// `push_frame` is called in strictly increasing [`FrameIndex`] order, between one `begin` and
/// one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> RainResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &image::RgbImage) -> RainResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> RainResult<()>;
}

/// Sink that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<image::RgbImage>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in loop order.
    pub fn frames(&self) -> &[image::RgbImage] {
        &self.frames
    }

    /// Take ownership of the captured frames.
    pub fn into_frames(self) -> Vec<image::RgbImage> {
        self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RainResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.frames.reserve(cfg.frame_count as usize);
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &image::RgbImage) -> RainResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> RainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
