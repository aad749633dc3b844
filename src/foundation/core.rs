use crate::foundation::error::{RainError, RainResult};

pub use kurbo::{Point, Rect, Vec2};

/// Absolute 0-based frame index within one generated loop.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas, rejecting sizes the rasterizer cannot address.
    pub fn new(width: u32, height: u32) -> RainResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Check that both dimensions are non-zero and fit in `u16`.
    pub fn validate(self) -> RainResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RainError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(RainError::validation(format!(
                "canvas {}x{} exceeds the {}px limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Dimensions as `u16`, as expected by the rasterizer.
    pub fn as_u16(self) -> RainResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| RainError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| RainError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
