use crate::text;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

pub const LOGO_SIZE: u32 = 200;
const DISC_INSET: u32 = 10;

// Site brand gradient, #667eea to #764ba2.
const GRADIENT_START: [u8; 3] = [102, 126, 234];
const GRADIENT_END: [u8; 3] = [118, 75, 162];

const GLYPH: &str = "S";
const GLYPH_PX: f32 = 120.0;
const GLYPH_RAISE: i32 = 10;
const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const SHADOW_OFFSET: i32 = 2;
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 100]);

/// Build the 200x200 gradient badge: a disc of concentric gradient rings on a
/// transparent background, with a shadowed "S" centered on it.
pub fn build() -> Result<RgbaImage> {
    let mut img = render_disc()?;
    let font = text::load_font()?;
    draw_glyph(&mut img, &font);
    Ok(img)
}

fn render_disc() -> Result<RgbaImage> {
    let size = LOGO_SIZE;
    let center = (size / 2) as f32;
    let radius = size / 2 - DISC_INSET;

    // Every pixel independently resolves the ring covering it, in row-major
    // order: ring 0 is the outer edge, ring radius - 1 the innermost.
    let pixels: Vec<u8> = (0..size * size)
        .into_par_iter()
        .flat_map_iter(|i| {
            let y = (i / size) as f32;
            let x = (i % size) as f32;

            let dist = ((x - center).powi(2) + (y - center).powi(2)).sqrt();
            if dist > radius as f32 {
                [0, 0, 0, 0]
            } else {
                let ring = ((radius as f32 - dist) as u32).min(radius - 1);
                ring_color(ring, radius).0
            }
        })
        .collect();

    RgbaImage::from_raw(size, size, pixels).context("Failed to construct logo pixel buffer")
}

fn ring_color(ring: u32, radius: u32) -> Rgba<u8> {
    let ratio = ring as f32 / radius as f32;
    let channel =
        |start: u8, end: u8| (start as f32 * (1.0 - ratio) + end as f32 * ratio) as u8;

    Rgba([
        channel(GRADIENT_START[0], GRADIENT_END[0]),
        channel(GRADIENT_START[1], GRADIENT_END[1]),
        channel(GRADIENT_START[2], GRADIENT_END[2]),
        255,
    ])
}

fn draw_glyph(img: &mut RgbaImage, font: &rusttype::Font<'_>) {
    let (glyph_w, glyph_h) = text::measure(font, GLYPH_PX, GLYPH);
    let size = LOGO_SIZE as i32;
    let x = (size - glyph_w) / 2;
    let y = (size - glyph_h) / 2 - GLYPH_RAISE;

    text::draw(img, font, GLYPH_PX, x + SHADOW_OFFSET, y + SHADOW_OFFSET, SHADOW_COLOR, GLYPH);
    text::draw(img, font, GLYPH_PX, x, y, GLYPH_COLOR, GLYPH);
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: u32 = LOGO_SIZE / 2 - DISC_INSET;

    #[test]
    fn gradient_starts_and_ends_on_the_brand_colors() {
        assert_eq!(ring_color(0, RADIUS), Rgba([102, 126, 234, 255]));
        assert_eq!(ring_color(RADIUS, RADIUS), Rgba([118, 75, 162, 255]));
    }

    #[test]
    fn gradient_is_monotonic_per_channel() {
        let mut prev = ring_color(0, RADIUS);
        for ring in 1..=RADIUS {
            let next = ring_color(ring, RADIUS);
            assert!(next.0[0] >= prev.0[0]);
            assert!(next.0[1] <= prev.0[1]);
            assert!(next.0[2] <= prev.0[2]);
            prev = next;
        }
    }

    #[test]
    fn logo_is_exactly_200_square() {
        let img = build().unwrap();
        assert_eq!(img.dimensions(), (LOGO_SIZE, LOGO_SIZE));
    }

    #[test]
    fn background_outside_the_disc_is_transparent() {
        let img = build().unwrap();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(199, 0).0[3], 0);
        assert_eq!(img.get_pixel(0, 199).0[3], 0);
        assert_eq!(img.get_pixel(199, 199).0[3], 0);
        // just outside the disc edge
        assert_eq!(img.get_pixel(100, 9).0[3], 0);
    }

    #[test]
    fn disc_pixels_show_the_interpolated_ring_color() {
        let img = build().unwrap();
        // on the outer edge, distance 90 from the center
        assert_eq!(*img.get_pixel(100, 10), ring_color(0, RADIUS));
        // distance 70, ring 20; far enough left that no glyph ink lands here
        assert_eq!(*img.get_pixel(30, 100), ring_color(20, RADIUS));
    }

    #[test]
    fn glyph_ink_is_present_near_the_center() {
        let img = build().unwrap();
        let white = (60..140)
            .flat_map(|y| (60..140).map(move |x| (x, y)))
            .any(|(x, y)| {
                let p = img.get_pixel(x, y);
                p.0[3] == 255 && p.0[0] > 200 && p.0[1] > 200 && p.0[2] > 200
            });
        assert!(white, "expected white glyph pixels in the center region");
    }
}
