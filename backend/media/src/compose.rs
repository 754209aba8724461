//! Cropping detected regions and compositing captions onto them.

use std::io::Cursor;

use chairspot_core::{HandlerError, PixelRect};
use image::{ImageFormat, RgbaImage, imageops};
use tracing::debug;

use crate::caption::CaptionRenderer;

/// The caption is sized to this fraction of the region height.
const CAPTION_HEIGHT_DIVISOR: u32 = 10;

/// A cropped region together with the source rectangle it was cut from.
/// The pixels are zero-based; the rectangle keeps the source anchoring so
/// callers can still reason in source-image coordinates.
pub struct RegionCrop {
    pub rect: PixelRect,
    pub pixels: RgbaImage,
}

/// Decode an encoded image (format sniffed from the bytes) into RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, HandlerError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| HandlerError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

/// Crop `rect` out of the source image and composite a caption over it.
///
/// The caption is rendered at one tenth of the region height (floor of 1),
/// centered horizontally via integer half-widths and anchored at the top
/// edge. A caption wider than the crop gets clipped at both sides.
pub fn caption_region(
    src: &RgbaImage,
    rect: PixelRect,
    renderer: &dyn CaptionRenderer,
    caption: &str,
) -> RegionCrop {
    let mut pixels =
        imageops::crop_imm(src, rect.x_min, rect.y_min, rect.width(), rect.height()).to_image();

    let caption_px = (rect.height() / CAPTION_HEIGHT_DIVISOR).max(1);
    let rendered = renderer.render(caption, caption_px);

    let offset_x = pixels.width() as i64 / 2 - rendered.width() as i64 / 2;
    imageops::overlay(&mut pixels, &rendered, offset_x, 0);

    debug!(
        width = pixels.width(),
        height = pixels.height(),
        caption_px,
        "captioned region"
    );
    RegionCrop { rect, pixels }
}

/// Encode a bitmap as lossless PNG.
pub fn encode_png(pixels: &RgbaImage) -> Result<Vec<u8>, HandlerError> {
    let mut buf = Cursor::new(Vec::new());
    pixels
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| HandlerError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}
