//! Image intake normalization.
//!
//! Uploaded photos are fitted onto a fixed square canvas, contrast-stretched,
//! and lightly denoised before being sent to the inference collaborators.

use anyhow::Result;
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Side length of the normalized canvas, in pixels.
pub const CANVAS_SIZE: u32 = 512;

/// Normalize `bytes`, or hand them back untouched if they cannot be processed.
pub fn normalize_or_original(bytes: &[u8]) -> Vec<u8> {
    // ---
    match normalize(bytes) {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::warn!("Image normalization failed, using original bytes: {e:#}");
            bytes.to_vec()
        }
    }
}

/// Decode, fit onto a black 512x512 canvas, stretch contrast, median-filter,
/// and re-encode as PNG.
pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>> {
    // ---
    let decoded = image::load_from_memory(bytes)?;

    // `resize` preserves aspect ratio, so the result fits inside the canvas.
    let fitted = decoded
        .resize(CANVAS_SIZE, CANVAS_SIZE, FilterType::Triangle)
        .to_rgb8();
    let mut fitted = stretch_contrast(fitted);
    fitted = median3(&fitted);

    let mut canvas = RgbImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgb([0, 0, 0]));
    let x = (CANVAS_SIZE - fitted.width()) / 2;
    let y = (CANVAS_SIZE - fitted.height()) / 2;
    imageops::overlay(&mut canvas, &fitted, i64::from(x), i64::from(y));

    let mut out = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Linearly stretch each channel so its darkest value maps to 0 and its
/// brightest to 255. Flat channels are left alone.
fn stretch_contrast(mut img: RgbImage) -> RgbImage {
    // ---
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for pixel in img.pixels() {
        for c in 0..3 {
            lo[c] = lo[c].min(pixel[c]);
            hi[c] = hi[c].max(pixel[c]);
        }
    }

    for pixel in img.pixels_mut() {
        for c in 0..3 {
            let span = u16::from(hi[c] - lo[c]);
            if span == 0 {
                continue;
            }
            let v = u16::from(pixel[c] - lo[c]);
            pixel[c] = ((v * 255 + span / 2) / span) as u8;
        }
    }

    img
}

/// 3x3 per-channel median filter; edges clamp to the nearest pixel.
fn median3(img: &RgbImage) -> RgbImage {
    // ---
    let (w, h) = img.dimensions();
    let mut out = RgbImage::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut window = [[0u8; 9]; 3];
            let mut n = 0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let sx = (i64::from(x) + dx).clamp(0, i64::from(w) - 1) as u32;
                    let sy = (i64::from(y) + dy).clamp(0, i64::from(h) - 1) as u32;
                    let p = img.get_pixel(sx, sy);
                    for c in 0..3 {
                        window[c][n] = p[c];
                    }
                    n += 1;
                }
            }
            let mut median = [0u8; 3];
            for c in 0..3 {
                window[c].sort_unstable();
                median[c] = window[c][4];
            }
            out.put_pixel(x, y, Rgb(median));
        }
    }

    out
}
