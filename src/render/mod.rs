/// Premultiplied compositing and flattening helpers.
pub mod composite;
/// `vello_cpu` star rasterizer.
pub mod cpu;
/// Trail color/opacity ramps and segment geometry.
pub mod trail;

pub use cpu::StarRasterizer;
