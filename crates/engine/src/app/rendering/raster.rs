use crate::app::canvas::{Rect, Rgba, TextAnchor, Vec2};

const GLYPH_ADVANCE_EM: f32 = 0.6;
const GLYPH_WIDTH_EM: f32 = 0.45;
const GLYPH_HEIGHT_EM: f32 = 0.7;

pub(crate) struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn from_rect(rect: Rect) -> Self {
        let left = rect.x.round() as i32;
        let top = rect.y.round() as i32;
        let right = (rect.x + rect.width).round() as i32;
        let bottom = (rect.y + rect.height).round() as i32;
        Self {
            left,
            top,
            width: (right - left).max(0),
            height: (bottom - top).max(0),
        }
    }

    fn clipped(&self, width: u32, height: u32) -> Option<(i32, i32, i32, i32)> {
        let draw_left = self.left.max(0);
        let draw_top = self.top.max(0);
        let draw_right = (self.left + self.width).min(width as i32);
        let draw_bottom = (self.top + self.height).min(height as i32);
        if draw_left >= draw_right || draw_top >= draw_bottom {
            return None;
        }
        Some((draw_left, draw_top, draw_right, draw_bottom))
    }
}

pub(crate) fn clear_frame(frame: &mut [u8], color: Rgba) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color.0);
    }
}

fn blend_into(dst: &mut [u8], src: [u8; 4]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src),
        alpha => {
            let a = alpha as u32;
            let inv = 255 - a;
            for channel in 0..3 {
                let mixed = src[channel] as u32 * a + dst[channel] as u32 * inv;
                dst[channel] = ((mixed + 127) / 255) as u8;
            }
            dst[3] = 255;
        }
    }
}

pub(crate) fn fill_rect(frame: &mut [u8], width: u32, height: u32, rect: PixelRect, color: Rgba) {
    if color.alpha() == 0 {
        return;
    }
    let Some((left, top, right, bottom)) = rect.clipped(width, height) else {
        return;
    };
    let frame_width = width as usize;
    for y in top..bottom {
        let row = y as usize * frame_width * 4;
        for x in left..right {
            let offset = row + x as usize * 4;
            blend_into(&mut frame[offset..offset + 4], color.0);
        }
    }
}

pub(crate) fn stroke_rect(
    frame: &mut [u8],
    width: u32,
    height: u32,
    rect: PixelRect,
    color: Rgba,
    thickness: f32,
) {
    let t = (thickness.round() as i32).max(1);
    let edges = [
        PixelRect { left: rect.left, top: rect.top, width: rect.width, height: t },
        PixelRect {
            left: rect.left,
            top: rect.top + rect.height - t,
            width: rect.width,
            height: t,
        },
        PixelRect { left: rect.left, top: rect.top + t, width: t, height: rect.height - 2 * t },
        PixelRect {
            left: rect.left + rect.width - t,
            top: rect.top + t,
            width: t,
            height: rect.height - 2 * t,
        },
    ];
    for edge in edges {
        if edge.width > 0 && edge.height > 0 {
            fill_rect(frame, width, height, edge, color);
        }
    }
}

/// Nearest-neighbour blit of `image` stretched into `dest`, optionally mirrored
/// horizontally.
pub(crate) fn blit_image(
    frame: &mut [u8],
    width: u32,
    height: u32,
    image: &LoadedImage,
    dest: PixelRect,
    mirror_x: bool,
) {
    if image.width == 0 || image.height == 0 || dest.width <= 0 || dest.height <= 0 {
        return;
    }
    let expected_rgba_len = image.width as usize * image.height as usize * 4;
    if image.rgba.len() < expected_rgba_len {
        return;
    }
    let Some((draw_left, draw_top, draw_right, draw_bottom)) = dest.clipped(width, height) else {
        return;
    };

    let scale_x = image.width as f32 / dest.width as f32;
    let scale_y = image.height as f32 / dest.height as f32;
    let frame_width = width as usize;
    let image_width = image.width as usize;

    for out_y in draw_top..draw_bottom {
        let dy = out_y - dest.top;
        let src_y = ((dy as f32 + 0.5) * scale_y).floor() as u32;
        let src_y = src_y.min(image.height - 1) as usize;
        let src_row_offset = src_y * image_width * 4;
        let dst_row_offset = out_y as usize * frame_width * 4;

        for out_x in draw_left..draw_right {
            let mut dx = out_x - dest.left;
            if mirror_x {
                dx = dest.width - 1 - dx;
            }
            let src_x = ((dx as f32 + 0.5) * scale_x).floor() as u32;
            let src_x = src_x.min(image.width - 1) as usize;
            let src_offset = src_row_offset + src_x * 4;
            let dst_offset = dst_row_offset + out_x as usize * 4;
            let mut src = [0u8; 4];
            src.copy_from_slice(&image.rgba[src_offset..src_offset + 4]);
            blend_into(&mut frame[dst_offset..dst_offset + 4], src);
        }
    }
}

pub(crate) fn text_extent(text: &str, size: f32) -> (f32, f32) {
    let glyphs = text.chars().count() as f32;
    (glyphs * size * GLYPH_ADVANCE_EM, size)
}

/// Draws `text` as one solid block per visible glyph. There is no font
/// rasteriser, so this only conveys where text sits and how long it is.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text_blocks(
    frame: &mut [u8],
    width: u32,
    height: u32,
    text: &str,
    position: Vec2,
    size: f32,
    anchor: TextAnchor,
    color: Rgba,
) {
    if !(size.is_finite() && size > 0.0) {
        return;
    }
    let (text_width, text_height) = text_extent(text, size);
    let (left, top) = match anchor {
        TextAnchor::TopLeft => (position.x, position.y),
        TextAnchor::TopCenter => (position.x - text_width * 0.5, position.y),
        TextAnchor::Center => (position.x - text_width * 0.5, position.y - text_height * 0.5),
    };
    let glyph_top = top + size * (1.0 - GLYPH_HEIGHT_EM) * 0.5;
    for (index, glyph) in text.chars().enumerate() {
        if glyph.is_whitespace() {
            continue;
        }
        let glyph_left = left + index as f32 * size * GLYPH_ADVANCE_EM;
        let rect = Rect::new(glyph_left, glyph_top, size * GLYPH_WIDTH_EM, size * GLYPH_HEIGHT_EM);
        fill_rect(frame, width, height, PixelRect::from_rect(rect), color);
    }
}
