use crate::foundation::color::Rgb8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{RainError, RainResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over of a single pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a premultiplied layer onto a premultiplied destination of the same size.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> RainResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RainError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// An opaque premultiplied RGBA8 buffer filled with `bg`.
pub fn solid_frame(canvas: Canvas, bg: Rgb8) -> Vec<u8> {
    let mut data = vec![0u8; canvas.rgba_len()];
    let px = bg.with_alpha(255);
    for d in data.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
    data
}

/// Flatten premultiplied RGBA8 over `bg` and drop the alpha channel.
pub fn flatten_to_rgb(canvas: Canvas, src: &[u8], bg: Rgb8) -> RainResult<image::RgbImage> {
    if src.len() != canvas.rgba_len() {
        return Err(RainError::render(format!(
            "frame buffer length {} does not match {}x{} rgba8",
            src.len(),
            canvas.width,
            canvas.height
        )));
    }

    let mut rgb = Vec::with_capacity(src.len() / 4 * 3);
    for s in src.chunks_exact(4) {
        let inv = 255u16 - u16::from(s[3]);
        rgb.push(add_sat_u8(s[0], mul_div255_u8(u16::from(bg.r), inv)));
        rgb.push(add_sat_u8(s[1], mul_div255_u8(u16::from(bg.g), inv)));
        rgb.push(add_sat_u8(s[2], mul_div255_u8(u16::from(bg.b), inv)));
    }

    image::RgbImage::from_raw(canvas.width, canvas.height, rgb)
        .ok_or_else(|| RainError::render("rgb buffer size mismatch (unexpected)"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
