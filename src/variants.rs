use crate::text;
use anyhow::{Context, Result};
use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};
use rusttype::Font;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const STANDARD_FILE: &str = "portfolio_qr_standard.png";
pub const LARGE_FILE: &str = "portfolio_qr_large.png";
pub const SMALL_FILE: &str = "portfolio_qr_small.png";
pub const LABELED_FILE: &str = "portfolio_qr_with_label.png";

const LARGE_SIZE: u32 = 800;
const SMALL_SIZE: u32 = 200;

pub const LABEL_HEIGHT: u32 = 60;
const MAIN_TEXT: &str = "Shuzheng Zheng | Software Developer";
const MAIN_PX: f32 = 16.0;
const MAIN_OFFSET: i32 = 10;
const MAIN_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const URL_TEXT: &str = "sz11.github.io/devportfolio";
const URL_PX: f32 = 12.0;
const URL_OFFSET: i32 = 35;
const URL_COLOR: Rgba<u8> = Rgba([128, 128, 128, 255]);

// 300 dpi, expressed as the pHYs pixels-per-meter value.
const DOTS_PER_METER: u32 = 11811;

/// Write the four PNG variants of the composed QR image into `out_dir`,
/// overwriting whatever is already there.
pub fn write_all(base: &RgbImage, out_dir: &Path) -> Result<()> {
    save_png(base, &out_dir.join(STANDARD_FILE))?;

    let large = imageops::resize(base, LARGE_SIZE, LARGE_SIZE, imageops::FilterType::Lanczos3);
    save_png(&large, &out_dir.join(LARGE_FILE))?;

    let small = imageops::resize(base, SMALL_SIZE, SMALL_SIZE, imageops::FilterType::Lanczos3);
    save_png(&small, &out_dir.join(SMALL_FILE))?;

    let labeled = label(base)?;
    save_png(&labeled, &out_dir.join(LABELED_FILE))?;

    Ok(())
}

// Append a white strip below the QR image carrying the two caption lines.
fn label(base: &RgbImage) -> Result<RgbImage> {
    let (width, height) = base.dimensions();
    let mut canvas =
        RgbaImage::from_pixel(width, height + LABEL_HEIGHT, Rgba([255, 255, 255, 255]));

    let qr_rgba = DynamicImage::ImageRgb8(base.clone()).to_rgba8();
    imageops::replace(&mut canvas, &qr_rgba, 0, 0);

    let font = text::load_font()?;
    let base_y = height as i32;
    draw_centered(&mut canvas, &font, MAIN_PX, base_y + MAIN_OFFSET, MAIN_COLOR, MAIN_TEXT);
    draw_centered(&mut canvas, &font, URL_PX, base_y + URL_OFFSET, URL_COLOR, URL_TEXT);

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}

fn draw_centered(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    y: i32,
    color: Rgba<u8>,
    line: &str,
) {
    let (line_width, _) = text::measure(font, px, line);
    let x = (canvas.width() as i32 - line_width) / 2;
    text::draw(canvas, font, px, x, y, color, line);
}

fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), img.width(), img.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: DOTS_PER_METER,
        yppu: DOTS_PER_METER,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to write PNG header for {}", path.display()))?;
    writer
        .write_image_data(img.as_raw())
        .with_context(|| format!("Failed to write PNG data for {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("Failed to finish {}", path.display()))?;

    println!("Saved to: {}", path.display());
    Ok(())
}
