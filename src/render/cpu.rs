use kurbo::{BezPath, Circle, PathEl, Point, Shape as _};

use crate::foundation::core::Canvas;
use crate::foundation::error::{RainError, RainResult};
use crate::render::composite::over_in_place;
use crate::render::trail::{TrailSegment, trail_segments};
use crate::scene::star::ShootingStar;

/// Flattening tolerance for the head circle, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// CPU rasterizer for shooting stars, powered by `vello_cpu`.
///
/// Each star is drawn into its own transparent layer, which is then composited onto the frame.
/// The render context and layer pixmap are reused across stars and frames.
pub struct StarRasterizer {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    layer: vello_cpu::Pixmap,
}

impl StarRasterizer {
    /// Allocate a rasterizer for `canvas`.
    pub fn new(canvas: Canvas) -> RainResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas.as_u16()?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Canvas this rasterizer targets.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Draw `star` (trail, then head on top) into the layer and composite it over `frame`.
    ///
    /// `frame` is premultiplied RGBA8 matching the canvas.
    pub fn composite_star(&mut self, star: &ShootingStar, frame: &mut [u8]) -> RainResult<()> {
        if frame.len() != self.canvas.rgba_len() {
            return Err(RainError::render(format!(
                "frame buffer length {} does not match canvas {}x{}",
                frame.len(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        self.render_layer(star);
        over_in_place(frame, self.layer.data_as_u8_slice())
    }

    /// Premultiplied RGBA8 bytes of the most recently drawn layer.
    pub fn layer_bytes(&self) -> &[u8] {
        self.layer.data_as_u8_slice()
    }

    fn render_layer(&mut self, star: &ShootingStar) {
        let ctx = &mut self.ctx;
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for seg in trail_segments(star) {
            let Some(quad) = segment_quad(&seg, star.trail_width) else {
                continue;
            };
            let [r, g, b, a] = seg.rgba;
            if a == 0 {
                continue;
            }
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_path(&bezpath_to_cpu(&quad));
        }

        let head = Circle::new(star.head_position, star.head_size / 2.0);
        let head_path: BezPath = head.path_elements(CIRCLE_TOLERANCE).collect();
        let c = star.head_color;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255));
        ctx.fill_path(&bezpath_to_cpu(&head_path));

        clear_pixmap_to_transparent(&mut self.layer);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.layer);
    }
}

/// Rectangle of `width` around the segment, with butt ends.
///
/// Returns `None` for zero-length segments.
fn segment_quad(seg: &TrailSegment, width: f64) -> Option<BezPath> {
    let dir = seg.to - seg.from;
    let len = dir.hypot();
    if len <= f64::EPSILON {
        return None;
    }
    let n = kurbo::Vec2::new(-dir.y, dir.x) * (width / 2.0 / len);

    let mut p = BezPath::new();
    p.move_to(seg.from + n);
    p.line_to(seg.to + n);
    p.line_to(seg.to - n);
    p.line_to(seg.from - n);
    p.close_path();
    Some(p)
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3))
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
