//! Caption rendering into standalone transparent bitmaps.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Horizontal padding added around the measured text width.
const WIDTH_PADDING: u32 = 20;
/// Left inset the text is drawn at inside the bitmap.
const LEFT_INSET: i32 = 10;

/// Renders a text string into a fresh RGBA bitmap.
///
/// Behind a trait so the pipeline can be tested without a font file on disk.
pub trait CaptionRenderer: Send + Sync {
    /// Render `text` at the given pixel size: white glyphs on a fully
    /// transparent background. The bitmap is the measured text width plus
    /// fixed padding wide and one-and-a-half times the size tall; tall
    /// glyphs may spill past the nominal padding.
    fn render(&self, text: &str, size_px: u32) -> RgbaImage;
}

/// Caption renderer backed by a TrueType typeface loaded once at startup.
pub struct TypefaceRenderer {
    font: FontVec,
}

impl TypefaceRenderer {
    /// Load the typeface from disk. Missing or malformed font data is a
    /// startup error, reported before any message is handled.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("cannot read font file {}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .with_context(|| format!("cannot parse font file {}", path.display()))?;
        Ok(Self { font })
    }
}

impl CaptionRenderer for TypefaceRenderer {
    fn render(&self, text: &str, size_px: u32) -> RgbaImage {
        let size_px = size_px.max(1);
        let scale = PxScale::from(size_px as f32);
        let (text_width, _) = text_size(scale, &self.font, text);

        let mut bitmap = RgbaImage::new(text_width + WIDTH_PADDING, size_px + size_px / 2);
        draw_text_mut(
            &mut bitmap,
            Rgba([255, 255, 255, 255]),
            LEFT_INSET,
            0,
            scale,
            &self.font,
            text,
        );
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer_from_env() -> TypefaceRenderer {
        let path = std::env::var("CHAIRSPOT_FONT").unwrap_or_else(|_| "impact.ttf".to_string());
        TypefaceRenderer::from_file(Path::new(&path)).expect("font file for ignored test")
    }

    #[test]
    fn missing_font_file_is_an_error() {
        assert!(TypefaceRenderer::from_file(Path::new("no/such/font.ttf")).is_err());
    }

    #[test]
    #[ignore = "needs a TTF on disk; set CHAIRSPOT_FONT and run with --ignored"]
    fn width_grows_with_text_length_and_size() {
        let renderer = renderer_from_env();
        let short = renderer.render("CHAIR", 40);
        let long = renderer.render("CHAIRCHAIR", 40);
        assert!(long.width() >= short.width());

        let small = renderer.render("CHAIR", 20);
        let big = renderer.render("CHAIR", 60);
        assert!(big.width() >= small.width());
        assert_eq!(big.height(), 90);
    }
}
