use rand::Rng;

use crate::foundation::core::{Canvas, Point};

/// Inclusive integer rectangle star heads are sampled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnRegion {
    /// Smallest x coordinate.
    pub min_x: i64,
    /// Largest x coordinate.
    pub max_x: i64,
    /// Smallest y coordinate.
    pub min_y: i64,
    /// Largest y coordinate.
    pub max_y: i64,
}

impl SpawnRegion {
    /// Region used when the scene is first populated.
    ///
    /// Reaches `⌊w/1.5⌋` past the left edge and `margin` past the right edge (likewise
    /// vertically), so part of the rain starts outside the frame.
    pub fn initial(canvas: Canvas, margin: u32) -> Self {
        let w = i64::from(canvas.width);
        let h = i64::from(canvas.height);
        let m = i64::from(margin);
        Self {
            min_x: -(w * 2 / 3),
            max_x: w + m,
            min_y: -(h * 2 / 3),
            max_y: h + m,
        }
    }

    /// Region used when a star that left the canvas is recycled.
    pub fn respawn(canvas: Canvas, offset: u32) -> Self {
        let o = i64::from(offset);
        Self {
            min_x: -o,
            max_x: i64::from(canvas.width),
            min_y: -o,
            max_y: i64::from(canvas.height),
        }
    }

    /// Draw a uniformly distributed integer point.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let x = rng.gen_range(self.min_x..=self.max_x);
        let y = rng.gen_range(self.min_y..=self.max_y);
        Point::new(x as f64, y as f64)
    }

    /// Whether `p` lies inside the region, bounds included.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x as f64
            && p.x <= self.max_x as f64
            && p.y >= self.min_y as f64
            && p.y <= self.max_y as f64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/spawn.rs"]
mod tests;
