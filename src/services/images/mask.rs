//! Source image decoding and inpainting mask construction.

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;

use crate::domain::DrawingRect;

/// Source photo and matching mask, both PNG encoded.
#[derive(Debug, Clone)]
pub struct InpaintImages {
    pub image_png: Vec<u8>,
    pub mask_png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes a `data:<mime>;base64,<body>` URL. A bare base64 string is
/// accepted as well.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let body = match data_url.split_once(";base64,") {
        Some((prefix, body)) if prefix.starts_with("data:") => body,
        Some(_) => return Err(anyhow!("Unsupported data URL")),
        None => data_url,
    };

    STANDARD
        .decode(body.trim())
        .context("Image is not valid base64")
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(buf.into_inner())
}

/// Re-encodes any supported image as PNG, returning its pixel size.
pub fn to_png(bytes: &[u8]) -> Result<(Vec<u8>, u32, u32)> {
    let image = image::load_from_memory(bytes).context("Unsupported or corrupt image")?;
    let (width, height) = (image.width(), image.height());
    Ok((encode_png(&image)?, width, height))
}

/// Pixel bounds `[x0, x1) x [y0, y1)` of the rectangle, clamped to the image.
fn pixel_bounds(rect: &DrawingRect, width: u32, height: u32) -> (u32, u32, u32, u32) {
    fn clamp(v: f64, max: u32) -> u32 {
        if v.is_finite() {
            v.round().clamp(0.0, max as f64) as u32
        } else {
            0
        }
    }

    let x0 = clamp(rect.x, width);
    let y0 = clamp(rect.y, height);
    let x1 = clamp(rect.x.round() + rect.width.round().max(0.0), width);
    let y1 = clamp(rect.y.round() + rect.height.round().max(0.0), height);
    (x0, y0, x1, y1)
}

/// Builds a mask the size of the source: white inside `rect` (regenerate),
/// black everywhere else (keep).
pub fn build_mask(rect: &DrawingRect, width: u32, height: u32) -> GrayImage {
    let (x0, y0, x1, y1) = pixel_bounds(rect, width, height);
    GrayImage::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Decodes the yard photo and pairs it with a mask for `rect`.
pub fn prepare_inpaint(source_image: &str, rect: &DrawingRect) -> Result<InpaintImages> {
    let bytes = decode_data_url(source_image)?;
    let (image_png, width, height) = to_png(&bytes)?;
    let mask = DynamicImage::ImageLuma8(build_mask(rect, width, height));

    Ok(InpaintImages {
        image_png,
        mask_png: encode_png(&mask)?,
        width,
        height,
    })
}
