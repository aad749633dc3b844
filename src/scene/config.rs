use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::{Gradient, Rgb8};
use crate::foundation::core::Canvas;
use crate::foundation::error::{RainError, RainResult};

/// Immutable parameters for one generation run.
///
/// Every field has a default, so a JSON file only needs the keys it wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Number of shooting stars kept alive for the whole loop.
    pub num_stars: usize,
    /// Number of trail segments behind each head.
    pub trail_length: u32,
    /// Nominal per-frame displacement; each star jitters it by ±25%.
    pub speed: f64,
    /// Motion direction in degrees (0 = right, 90 = down).
    pub angle: f64,
    /// Frames in one loop.
    pub frames: u32,
    /// Opaque background.
    pub background_color: Rgb8,
    /// Ramps a star's trail may pick from.
    pub gradient_colors: Vec<Gradient>,
    /// Head diameter in pixels.
    pub head_size: f64,
    /// Trail stroke width in pixels.
    pub trail_width: f64,
    /// Extra room past the right/bottom edges for initial placement.
    pub spawn_margin: u32,
    /// How far past the left/top edges a recycled star may re-enter.
    pub respawn_offset: u32,
    /// Seed for reproducible output; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            num_stars: 100,
            trail_length: 50,
            speed: 15.0,
            angle: 45.0,
            frames: 240,
            background_color: Rgb8::BLACK,
            gradient_colors: Gradient::stock(),
            head_size: 6.0,
            trail_width: 4.0,
            spawn_margin: 100,
            respawn_offset: 200,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> RainResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> RainResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| RainError::validation(format!("invalid scene config: {e}")))
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RainResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RainError::Other(anyhow::Error::new(e).context("serialize scene config")))
    }

    /// Canvas described by `width`/`height`.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Reject configurations the generator cannot run.
    pub fn validate(&self) -> RainResult<()> {
        self.canvas().validate()?;
        if self.frames == 0 {
            return Err(RainError::validation("frames must be > 0"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(RainError::validation("speed must be finite and >= 0"));
        }
        if !self.angle.is_finite() {
            return Err(RainError::validation("angle must be finite"));
        }
        if !(self.head_size.is_finite() && self.head_size > 0.0) {
            return Err(RainError::validation("head_size must be finite and > 0"));
        }
        if !(self.trail_width.is_finite() && self.trail_width > 0.0) {
            return Err(RainError::validation("trail_width must be finite and > 0"));
        }
        if self.num_stars > 0 && self.gradient_colors.is_empty() {
            return Err(RainError::validation(
                "gradient_colors must not be empty when num_stars > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
