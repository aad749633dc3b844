//! Neon Rain renders looping animations of shooting stars with fading gradient trails.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`SceneConfig`] (usually loaded from JSON) fixes the canvas, star count,
//!    motion and palette for one run.
//! 2. **Spawn**: [`RainGenerator`] places every [`ShootingStar`] once, drawing position, gradient
//!    and speed jitter from an injectable [`rand::Rng`].
//! 3. **Render**: each frame advances every star, rasterizes it on its own transparent layer
//!    (CPU, via `vello_cpu`), composites that layer over the frame and recycles stars whose tail
//!    has passed the right or bottom edge.
//! 4. **Encode**: frames stream into a [`FrameSink`]; [`GifSink`] writes an infinitely looping
//!    GIF without overwriting existing files.
//!
//! Motion is deterministic once the stars are spawned, so a seeded generator reproduces the same
//! animation bit for bit.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame sinks and GIF output.
pub mod encode;
/// Star rasterization and compositing.
pub mod render;
/// Scene configuration, entities and the frame generator.
pub mod scene;

pub use foundation::color::{Gradient, Rgb8};
pub use foundation::core::{Canvas, FrameIndex, Point, Rect, Vec2};
pub use foundation::error::{RainError, RainResult};

pub use encode::gif::{GifOpts, GifSink, frame_delay, write_gif};
pub use encode::open::open_in_viewer;
pub use encode::path::{create_unique_file, ensure_parent_dir, unique_output_path};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use render::cpu::StarRasterizer;
pub use render::trail::{FADE_START, TrailSegment, trail_alpha, trail_color, trail_segments};
pub use scene::config::SceneConfig;
pub use scene::generator::{RainGenerator, RenderStats};
pub use scene::spawn::SpawnRegion;
pub use scene::star::{ShootingStar, StarParams};
