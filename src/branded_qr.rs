use crate::{logo, qr};
use anyhow::Result;
use image::{imageops, DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::Array2;
use qrcode::EcLevel;

pub const MODULE_SIZE: u32 = 10;
pub const QUIET_ZONE: u32 = 4;
// The logo backing extends this many pixels past the logo in total, leaving a
// white quiet zone around the badge.
pub const BACKING_PAD: u32 = 20;
// The obscured area must stay within what level H error correction recovers.
const LOGO_FRACTION: u32 = 6;

const FOREGROUND: Rgb<u8> = Rgb([26, 26, 26]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

pub struct BrandedQR {
    modules: Array2<bool>,
}

impl BrandedQR {
    pub fn new(url: &str) -> Result<Self> {
        let modules = qr::generate_qr_matrix(url, EcLevel::H)?;
        Ok(Self { modules })
    }

    /// Rasterize the module matrix at MODULE_SIZE px per module with a
    /// QUIET_ZONE-module border.
    pub fn render_to_image(&self) -> RgbImage {
        let width = self.modules.nrows();
        let dim = (width as u32 + 2 * QUIET_ZONE) * MODULE_SIZE;

        ImageBuffer::from_fn(dim, dim, |x, y| {
            let mx = (x / MODULE_SIZE) as i64 - QUIET_ZONE as i64;
            let my = (y / MODULE_SIZE) as i64 - QUIET_ZONE as i64;

            let dark = mx >= 0
                && my >= 0
                && (mx as usize) < width
                && (my as usize) < width
                && self.modules[[my as usize, mx as usize]];

            if dark {
                FOREGROUND
            } else {
                BACKGROUND
            }
        })
    }

    /// Render the QR image and center the logo badge on it, backed by a white
    /// square so the badge is never alpha-blended onto modules directly.
    pub fn compose(&self) -> Result<RgbImage> {
        let mut qr_img = self.render_to_image();

        // Only one construction path exists; retrying it is the fallback.
        let logo = logo::build().or_else(|_| logo::build())?;

        let (qr_w, qr_h) = qr_img.dimensions();
        let logo_size = qr_w.min(qr_h) / LOGO_FRACTION;
        let logo = imageops::resize(&logo, logo_size, logo_size, imageops::FilterType::Lanczos3);

        let backing_size = logo_size + BACKING_PAD;
        let mut backing: RgbaImage =
            ImageBuffer::from_pixel(backing_size, backing_size, Rgba([255, 255, 255, 255]));
        let inset = ((backing_size - logo_size) / 2) as i64;
        imageops::overlay(&mut backing, &logo, inset, inset);

        let backing = DynamicImage::ImageRgba8(backing).to_rgb8();
        let x = ((qr_w - backing_size) / 2) as i64;
        let y = ((qr_h - backing_size) / 2) as i64;
        imageops::replace(&mut qr_img, &backing, x, y);

        Ok(qr_img)
    }
}
