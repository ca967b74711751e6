use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::fs;

// Tried in order; any unreadable or unparseable candidate falls through.
const FONT_CANDIDATES: &[&str] = &[
    "arial.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
];

static DEFAULT_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

pub fn load_font() -> Result<Font<'static>> {
    for path in FONT_CANDIDATES {
        if let Some(font) = fs::read(path).ok().and_then(Font::try_from_vec) {
            return Ok(font);
        }
    }

    Font::try_from_bytes(DEFAULT_FONT).context("Failed to parse built-in font")
}

/// Width and height of the inked bounding box of `text` at `px` pixels.
pub fn measure(font: &Font<'_>, px: f32, text: &str) -> (i32, i32) {
    match inked_bounds(&layout(font, px, text)) {
        Some((min_x, min_y, max_x, max_y)) => (max_x - min_x, max_y - min_y),
        None => (0, 0),
    }
}

/// Draw `text` so the top-left corner of its inked bounding box lands on
/// `(x, y)`. Pixels outside the canvas are clipped.
pub fn draw(img: &mut RgbaImage, font: &Font<'_>, px: f32, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    let glyphs = layout(font, px, text);
    let Some((min_x, min_y, _, _)) = inked_bounds(&glyphs) else {
        return;
    };

    let (width, height) = (img.width() as i32, img.height() as i32);
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let tx = gx as i32 + bb.min.x - min_x + x;
                let ty = gy as i32 + bb.min.y - min_y + y;
                if tx < 0 || ty < 0 || tx >= width || ty >= height {
                    return;
                }
                blend(img.get_pixel_mut(tx as u32, ty as u32), color, coverage);
            });
        }
    }
}

fn layout<'font>(font: &Font<'font>, px: f32, text: &str) -> Vec<PositionedGlyph<'font>> {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(0.0, ascent)).collect()
}

fn inked_bounds(glyphs: &[PositionedGlyph]) -> Option<(i32, i32, i32, i32)> {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for bb in glyphs.iter().filter_map(|g| g.pixel_bounding_box()) {
        let b = bounds.get_or_insert((bb.min.x, bb.min.y, bb.max.x, bb.max.y));
        b.0 = b.0.min(bb.min.x);
        b.1 = b.1.min(bb.min.y);
        b.2 = b.2.max(bb.max.x);
        b.3 = b.3.max(bb.max.y);
    }
    bounds
}

// Source-over composite of `color` at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let sa = coverage * color.0[3] as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }

    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let blended = (color.0[c] as f32 * sa + dst.0[c] as f32 * da * (1.0 - sa)) / out_a;
        dst.0[c] = blended.round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}
