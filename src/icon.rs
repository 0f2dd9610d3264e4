//! Synthesizes "uninstall" variants of title icons: the icon is scaled to a
//! fixed square and the embedded badge is composited into its bottom-right corner.

use std::io::Cursor;
use std::sync::OnceLock;

use base64::prelude::*;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

/// Edge length of every synthesized icon.
pub const ICON_SIZE: u32 = 512;
/// Edge length of the badge once scaled.
pub const BADGE_SIZE: u32 = 128;

const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

const BADGE_PNG: &[u8] = include_bytes!("../assets/uninstall_badge.png");

static BADGE: OnceLock<Result<RgbaImage, String>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum IconError {
    #[error("error decoding base image: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("error decoding base image bytes: {0}")]
    Image(#[source] image::ImageError),

    #[error("error encoding processed image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("error preparing uninstall badge: {0}")]
    Badge(String),
}

/// Takes a base64 icon and returns the base64 PNG of its uninstall variant.
pub fn composite_uninstall_icon(base_image_b64: &str) -> Result<String, IconError> {
    let png = render_uninstall_icon(base_image_b64)?;
    Ok(BASE64_STANDARD.encode(png))
}

/// Same as [`composite_uninstall_icon`] but returns the raw PNG bytes.
pub fn render_uninstall_icon(base_image_b64: &str) -> Result<Vec<u8>, IconError> {
    let base = decode_base64_image(base_image_b64)?;
    let mut canvas = resize_to_icon(&base);
    overlay_badge(&mut canvas)?;
    encode_png(canvas)
}

/// Decodes a base64 image. Line breaks (`\r`, `\n`) inside the text are ignored.
pub fn decode_base64_image(b64: &str) -> Result<DynamicImage, IconError> {
    let compact: Vec<u8> = b64
        .bytes()
        .filter(|&b| !matches!(b, b'\r' | b'\n'))
        .collect();
    let bytes = BASE64_STANDARD.decode(compact)?;
    image::load_from_memory(&bytes).map_err(IconError::Image)
}

/// Scales to `ICON_SIZE` square regardless of source size or aspect ratio.
pub fn resize_to_icon(img: &DynamicImage) -> RgbaImage {
    img.resize_exact(ICON_SIZE, ICON_SIZE, RESAMPLE_FILTER)
        .to_rgba8()
}

/// Alpha-blends the badge so its bottom-right corner meets the canvas's.
pub fn overlay_badge(canvas: &mut RgbaImage) -> Result<(), IconError> {
    let badge = badge()?;
    let x = i64::from(canvas.width()) - i64::from(badge.width());
    let y = i64::from(canvas.height()) - i64::from(badge.height());
    imageops::overlay(canvas, badge, x, y);
    Ok(())
}

fn badge() -> Result<&'static RgbaImage, IconError> {
    BADGE
        .get_or_init(|| {
            image::load_from_memory_with_format(BADGE_PNG, ImageFormat::Png)
                .map(|img| {
                    img.resize_exact(BADGE_SIZE, BADGE_SIZE, RESAMPLE_FILTER)
                        .to_rgba8()
                })
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|e| IconError::Badge(e.clone()))
}

fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>, IconError> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(IconError::Encode)?;
    Ok(buf)
}
