use crate::foundation::color::{Gradient, Rgb8};
use crate::foundation::core::{Point, Vec2};

/// One moving head with a fading gradient trail.
///
/// Direction and magnitude are fixed at creation; only `head_position` changes, either by
/// [`ShootingStar::advance`] or when the star is recycled with [`ShootingStar::reset_to`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    /// Current head center.
    pub head_position: Point,
    /// Head fill, the gradient's first stop.
    pub head_color: Rgb8,
    /// Trail ramp, head to tail.
    pub gradient: Gradient,
    /// Number of trail segments.
    pub trail_length: u32,
    /// Direction of travel in degrees.
    pub trail_angle: f64,
    /// Per-frame displacement magnitude.
    pub speed: f64,
    /// Head diameter.
    pub head_size: f64,
    /// Trail stroke width.
    pub trail_width: f64,
    /// Total `(|dx|, |dy|)` covered over one loop, trail included.
    pub max_distance: (f64, f64),
    velocity: Vec2,
}

/// Parameters for [`ShootingStar::new`].
#[derive(Clone, Debug)]
pub struct StarParams {
    /// Initial head center.
    pub head_position: Point,
    /// Trail ramp; its first stop colors the head.
    pub gradient: Gradient,
    /// Number of trail segments.
    pub trail_length: u32,
    /// Direction of travel in degrees.
    pub trail_angle: f64,
    /// Per-frame displacement magnitude.
    pub speed: f64,
    /// Head diameter.
    pub head_size: f64,
    /// Trail stroke width.
    pub trail_width: f64,
    /// Frames in one loop, used for the `max_distance` bookkeeping.
    pub loop_frames: u32,
}

impl ShootingStar {
    /// Create a star and precompute its displacement vector.
    pub fn new(p: StarParams) -> Self {
        let velocity = velocity_for(p.speed, p.trail_angle);
        let max_distance = loop_distance(velocity, p.trail_length, p.trail_angle, p.loop_frames);
        Self {
            head_position: p.head_position,
            head_color: p.gradient.head(),
            gradient: p.gradient,
            trail_length: p.trail_length,
            trail_angle: p.trail_angle,
            speed: p.speed,
            head_size: p.head_size,
            trail_width: p.trail_width,
            max_distance,
            velocity,
        }
    }

    /// Constant per-frame displacement `speed·(cos θ, sin θ)`.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Move the head by one frame and return the displacement applied.
    pub fn advance(&mut self) -> Vec2 {
        self.head_position += self.velocity;
        self.velocity
    }

    /// Far end of the trail: `head - trail_length·(dx, dy)`.
    pub fn tail_position(&self) -> Point {
        self.head_position - self.velocity * f64::from(self.trail_length)
    }

    /// Point `steps` displacements behind the head.
    pub fn trail_point(&self, steps: u32) -> Point {
        self.head_position - self.velocity * f64::from(steps)
    }

    /// Whether the tail has passed the right or bottom edge.
    ///
    /// Stars leaving through the left or top edge are not considered out of bounds.
    pub fn is_past(&self, width: u32, height: u32) -> bool {
        let tail = self.tail_position();
        tail.x > f64::from(width) || tail.y > f64::from(height)
    }

    /// Move the head to `p`, keeping gradient and kinematics.
    pub fn reset_to(&mut self, p: Point) {
        self.head_position = p;
    }
}

fn velocity_for(speed: f64, angle_deg: f64) -> Vec2 {
    let a = angle_deg.to_radians();
    Vec2::new(speed * a.cos(), speed * a.sin())
}

fn loop_distance(velocity: Vec2, trail_length: u32, angle_deg: f64, frames: u32) -> (f64, f64) {
    let a = angle_deg.to_radians();
    let l = f64::from(trail_length);
    let f = f64::from(frames);
    (
        (velocity.x * f + l * a.cos()).abs(),
        (velocity.y * f + l * a.sin()).abs(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/scene/star.rs"]
mod tests;
