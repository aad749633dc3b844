use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::encode::gif::{GifOpts, write_gif};
use crate::encode::open::open_in_viewer;
use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
use crate::foundation::core::{Canvas, FrameIndex};
use crate::foundation::error::{RainError, RainResult};
use crate::render::composite::{flatten_to_rgb, solid_frame};
use crate::render::cpu::StarRasterizer;
use crate::scene::config::SceneConfig;
use crate::scene::spawn::SpawnRegion;
use crate::scene::star::{ShootingStar, StarParams};

/// Per-star speed jitter, as a fraction of the configured speed.
const SPEED_JITTER: f64 = 0.25;

/// Counters reported by a range render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_rendered: u64,
    /// Times a star left the canvas and was moved back to the respawn region.
    pub stars_recycled: u64,
}

/// Drives the shooting-star simulation and composites its frames.
///
/// Stars are created once, in [`RainGenerator::with_rng`]. Each frame then advances every star,
/// draws it on its own transparent layer, composites that layer over the frame and recycles the
/// star if its tail has passed the right or bottom edge.
///
/// All randomness (placement, gradient choice, speed jitter, recycling) is drawn from `R`, so a
/// seeded generator gives bit-identical output.
pub struct RainGenerator<R: Rng = StdRng> {
    config: SceneConfig,
    canvas: Canvas,
    respawn: SpawnRegion,
    stars: Vec<ShootingStar>,
    rng: R,
    raster: StarRasterizer,
    frames: Vec<image::RgbImage>,
    frames_simulated: u64,
}

impl RainGenerator<StdRng> {
    /// Build a generator seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: SceneConfig) -> RainResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> RainGenerator<R> {
    /// Build a generator drawing from `rng`.
    pub fn with_rng(config: SceneConfig, mut rng: R) -> RainResult<Self> {
        config.validate()?;
        let canvas = config.canvas();
        let raster = StarRasterizer::new(canvas)?;
        let stars = spawn_stars(&config, &mut rng);
        Ok(Self {
            respawn: SpawnRegion::respawn(canvas, config.respawn_offset),
            canvas,
            config,
            stars,
            rng,
            raster,
            frames: Vec::new(),
            frames_simulated: 0,
        })
    }

    /// Configuration this generator was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Region recycled stars are moved to.
    pub fn respawn_region(&self) -> SpawnRegion {
        self.respawn
    }

    /// Current star states.
    pub fn stars(&self) -> &[ShootingStar] {
        &self.stars
    }

    /// Mutable star states, for scripted scenes.
    pub fn stars_mut(&mut self) -> &mut [ShootingStar] {
        &mut self.stars
    }

    /// Frames kept by the last [`RainGenerator::generate_frames`] call.
    pub fn frames(&self) -> &[image::RgbImage] {
        &self.frames
    }

    /// Take the kept frames, leaving the generator empty.
    pub fn take_frames(&mut self) -> Vec<image::RgbImage> {
        std::mem::take(&mut self.frames)
    }

    /// Number of frames simulated since construction.
    pub fn frames_simulated(&self) -> u64 {
        self.frames_simulated
    }

    /// Simulate and composite the next frame.
    pub fn step_frame(&mut self) -> RainResult<image::RgbImage> {
        self.step_frame_counted().map(|(img, _)| img)
    }

    fn step_frame_counted(&mut self) -> RainResult<(image::RgbImage, u64)> {
        let bg = self.config.background_color;
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut frame = solid_frame(self.canvas, bg);
        let mut recycled = 0u64;

        for star in &mut self.stars {
            star.advance();
            self.raster.composite_star(star, &mut frame)?;
            if star.is_past(w, h) {
                let p = self.respawn.sample(&mut self.rng);
                tracing::trace!(
                    frame = self.frames_simulated,
                    from_x = star.head_position.x,
                    from_y = star.head_position.y,
                    to_x = p.x,
                    to_y = p.y,
                    "recycling star"
                );
                star.reset_to(p);
                recycled += 1;
            }
        }

        self.frames_simulated += 1;
        Ok((flatten_to_rgb(self.canvas, &frame, bg)?, recycled))
    }

    /// Render one loop (`config.frames` frames) into `sink`.
    ///
    /// `progress` is called after each frame with `(done, total)`.
    #[tracing::instrument(skip(self, sink, progress), fields(frames = self.config.frames))]
    pub fn render_into(
        &mut self,
        sink: &mut dyn FrameSink,
        mut progress: impl FnMut(u64, u64),
    ) -> RainResult<RenderStats> {
        let total = u64::from(self.config.frames);
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            frame_count: total,
        })?;

        let mut stats = RenderStats::default();
        for i in 0..total {
            let (frame, recycled) = self.step_frame_counted()?;
            sink.push_frame(FrameIndex(i), &frame)?;
            stats.frames_rendered += 1;
            stats.stars_recycled += recycled;
            progress(i + 1, total);
        }
        sink.end()?;

        tracing::debug!(
            frames = stats.frames_rendered,
            recycled = stats.stars_recycled,
            "loop rendered"
        );
        Ok(stats)
    }

    /// Render one loop and keep it in memory, replacing any previously kept frames.
    ///
    /// Star state carries over, so a second call continues the simulation.
    pub fn generate_frames(&mut self) -> RainResult<&[image::RgbImage]> {
        self.generate_frames_with_progress(|_, _| {})
    }

    /// [`RainGenerator::generate_frames`] with a `(done, total)` callback after each frame.
    pub fn generate_frames_with_progress(
        &mut self,
        progress: impl FnMut(u64, u64),
    ) -> RainResult<&[image::RgbImage]> {
        let mut sink = InMemorySink::new();
        self.render_into(&mut sink, progress)?;
        self.frames = sink.into_frames();
        Ok(&self.frames)
    }

    /// Simulate up to frame `index` (counted from now) and return that frame.
    pub fn preview_frame(&mut self, index: u64) -> RainResult<image::RgbImage> {
        for _ in 0..index {
            self.step_frame()?;
        }
        self.step_frame()
    }

    /// Write the kept frames as a looping GIF and return the path written.
    ///
    /// An existing file at `path` is kept; a numeric suffix is added instead. When `open_after`
    /// is set the result is handed to the platform viewer; failing to launch it is only logged.
    #[tracing::instrument(skip(self, path))]
    pub fn save_gif(
        &self,
        path: impl AsRef<Path>,
        duration_secs: f64,
        open_after: bool,
    ) -> RainResult<PathBuf> {
        if self.frames.is_empty() {
            return Err(RainError::NoFrames);
        }
        let opts = GifOpts {
            duration_secs,
            ..GifOpts::default()
        };
        let out = write_gif(&self.frames, path.as_ref(), opts)?;
        tracing::info!(path = %out.display(), frames = self.frames.len(), "gif written");
        if open_after {
            open_in_viewer(&out);
        }
        Ok(out)
    }
}

fn spawn_stars<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Vec<ShootingStar> {
    let region = SpawnRegion::initial(config.canvas(), config.spawn_margin);
    let lo = config.speed * (1.0 - SPEED_JITTER);
    let hi = config.speed * (1.0 + SPEED_JITTER);

    (0..config.num_stars)
        .map(|_| {
            let head_position = region.sample(rng);
            let gradient = config.gradient_colors[rng.gen_range(0..config.gradient_colors.len())];
            let speed = rng.gen_range(lo..=hi);
            ShootingStar::new(StarParams {
                head_position,
                gradient,
                trail_length: config.trail_length,
                trail_angle: config.angle,
                speed,
                head_size: config.head_size,
                trail_width: config.trail_width,
                loop_frames: config.frames,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/generator.rs"]
mod tests;
