use crate::foundation::color::Gradient;
use crate::foundation::core::Point;
use crate::scene::star::ShootingStar;

/// Trail position (`t = j / trail_length`) after which segments start fading out.
pub const FADE_START: f64 = 0.7;

/// Color of the trail at `t`.
pub fn trail_color(gradient: &Gradient, t: f64) -> [u8; 3] {
    gradient.sample(t).into()
}

/// Opacity of the trail at `t`: opaque up to [`FADE_START`], then a linear ramp to zero at
/// `t = 1`.
pub fn trail_alpha(t: f64) -> u8 {
    if t <= FADE_START {
        return 255;
    }
    let fade_t = ((t - FADE_START) / (1.0 - FADE_START)).clamp(0.0, 1.0);
    (255.0 * (1.0 - fade_t)) as u8
}

/// One straight piece of a trail, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    /// End nearer the head.
    pub from: Point,
    /// End nearer the tail.
    pub to: Point,
    /// Straight (non-premultiplied) RGBA color.
    pub rgba: [u8; 4],
}

/// Segments of `star`'s trail ordered head to tail.
pub fn trail_segments(star: &ShootingStar) -> impl Iterator<Item = TrailSegment> + '_ {
    let len = star.trail_length;
    (0..len).map(move |j| {
        let t = f64::from(j) / f64::from(len);
        let [r, g, b] = trail_color(&star.gradient, t);
        TrailSegment {
            from: star.trail_point(j),
            to: star.trail_point(j + 1),
            rgba: [r, g, b, trail_alpha(t)],
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/trail.rs"]
mod tests;
