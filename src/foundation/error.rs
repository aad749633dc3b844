/// Convenience result alias used across the crate.
pub type RainResult<T> = Result<T, RainError>;

/// Errors produced while configuring, rendering or exporting an animation.
#[derive(thiserror::Error, Debug)]
pub enum RainError {
    /// The configuration or an argument was rejected before any work was done.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Writing the animated output failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Export was requested before any frame was generated.
    #[error("no frames generated: call generate_frames() before exporting")]
    NoFrames,

    /// Any other error, typically IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RainError {
    /// Build a [`RainError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RainError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RainError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
