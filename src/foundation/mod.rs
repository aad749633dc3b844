/// Colors and gradients.
pub mod color;
/// Core geometric and frame-index types.
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
