/// Scene configuration.
pub mod config;
/// Frame generation driver.
pub mod generator;
/// Spawn/recycle sampling regions.
pub mod spawn;
/// Shooting star entity.
pub mod star;
