use crate::foundation::math::lerp_channel_trunc;
use serde::{Deserialize, Serialize};

/// Opaque 8-bit sRGB color.
///
/// Deserializes from `[r, g, b]` or `"#rrggbb"`; serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Straight-alpha RGBA with the given alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Channel-wise blend toward `other`; results are truncated, not rounded.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: lerp_channel_trunc(self.r, other.r, t),
            g: lerp_channel_trunc(self.g, other.g, t),
            b: lerp_channel_trunc(self.b, other.b, t),
        }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::new(r, g, b)),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }
    Ok(Rgb8::new(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

/// Three-stop color ramp applied along a trail, head to tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gradient(pub [Rgb8; 3]);

impl Gradient {
    /// Build a gradient from its head, middle and tail stops.
    pub const fn new(head: Rgb8, mid: Rgb8, tail: Rgb8) -> Self {
        Self([head, mid, tail])
    }

    /// First stop, also used as the head color.
    pub fn head(&self) -> Rgb8 {
        self.0[0]
    }

    /// Sample the ramp at `t` in `[0, 1]`.
    ///
    /// `[0, 0.5)` blends stops 0→1 and `[0.5, 1]` blends stops 1→2.
    pub fn sample(&self, t: f64) -> Rgb8 {
        let [c0, c1, c2] = self.0;
        if t < 0.5 {
            c0.lerp(c1, t / 0.5)
        } else {
            c1.lerp(c2, (t - 0.5) / 0.5)
        }
    }

    /// The stock palette: rose, cyan, fire, green and magenta ramps.
    pub fn stock() -> Vec<Self> {
        vec![
            Self::new(
                Rgb8::new(238, 38, 95),
                Rgb8::new(168, 28, 117),
                Rgb8::new(61, 16, 63),
            ),
            Self::new(
                Rgb8::new(0, 255, 255),
                Rgb8::new(0, 128, 255),
                Rgb8::new(0, 0, 128),
            ),
            Self::new(
                Rgb8::new(255, 255, 0),
                Rgb8::new(255, 128, 0),
                Rgb8::new(255, 0, 0),
            ),
            Self::new(
                Rgb8::new(0, 255, 0),
                Rgb8::new(0, 128, 64),
                Rgb8::new(0, 32, 0),
            ),
            Self::new(
                Rgb8::new(255, 0, 255),
                Rgb8::new(128, 0, 128),
                Rgb8::new(32, 0, 64),
            ),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
