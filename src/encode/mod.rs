//! Frame sinks and animated output.
//!
//! Sinks consume finished frames in loop order. [`gif::GifSink`] streams them straight to disk,
//! [`sink::InMemorySink`] keeps them for inspection.

/// Animated GIF output.
pub mod gif;
/// Best-effort "open the result" integration.
pub mod open;
/// Collision-free output naming.
pub mod path;
/// Frame sink trait and the in-memory sink.
pub mod sink;
