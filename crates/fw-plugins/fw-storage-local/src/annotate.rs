//! Verdict overlay drawn onto a copy of the uploaded scan.

use ab_glyph::{FontArc, PxScale};
use fw_core::error::{AppError, Result};
use fw_core::models::Verdict;
use image::{ImageReader, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Left edge and baseline of the label, in pixels from the top-left corner.
pub const LABEL_ORIGIN: (i32, i32) = (50, 50);
pub const LABEL_SCALE: f32 = 32.0;
/// Badge drawn in place of the text when no font is available.
pub const BADGE_SIZE: (u32, u32) = (160, 24);

/// Draws verdict labels. Without a font it falls back to a coloured badge.
#[derive(Clone, Default)]
pub struct Annotator {
    font: Option<FontArc>,
}

impl Annotator {
    pub fn new(font: Option<FontArc>) -> Self {
        Self { font }
    }

    /// Loads a TrueType/OpenType font from disk.
    pub fn with_font_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        let font = FontArc::try_from_vec(bytes)?;
        Ok(Self::new(Some(font)))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Reads `source`, draws the label and writes the result to `target`.
    /// The output encoding follows `target`'s extension.
    ///
    /// An unreadable source is a `Decode` error; failing to write `target` is `Internal`.
    pub fn mark_file(&self, source: &Path, target: &Path, verdict: Verdict) -> Result<()> {
        let mut canvas = read_rgb(source)?;
        self.mark(&mut canvas, verdict);
        canvas
            .save(target)
            .map_err(|e| AppError::Internal(format!("could not write {}: {e}", target.display())))
    }

    pub fn mark(&self, canvas: &mut RgbImage, verdict: Verdict) {
        let color = Rgb(verdict.color());
        let (x, baseline) = LABEL_ORIGIN;
        let top = baseline - (LABEL_SCALE * 0.75) as i32;

        match &self.font {
            Some(font) => {
                // Second pass one pixel to the right thickens the strokes.
                for dx in 0..2 {
                    draw_text_mut(canvas, color, x + dx, top, PxScale::from(LABEL_SCALE), font, verdict.label());
                }
            }
            None => {
                let (w, h) = BADGE_SIZE;
                draw_filled_rect_mut(canvas, Rect::at(x, top).of_size(w, h), color);
            }
        }
    }
}

fn read_rgb(source: &Path) -> Result<RgbImage> {
    let decode = |e: &dyn std::fmt::Display| AppError::Decode(format!("{}: {e}", source.display()));
    let img = ImageReader::open(source)
        .map_err(|e| decode(&e))?
        .with_guessed_format()
        .map_err(|e| decode(&e))?
        .decode()
        .map_err(|e| decode(&e))?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First TrueType font found on the host, if any.
    fn system_font() -> Option<Annotator> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .iter()
        .find_map(|p| Annotator::with_font_file(Path::new(p)).ok())
    }

    #[test]
    fn badge_uses_verdict_colour() {
        let annotator = Annotator::default();
        let mut canvas = RgbImage::from_pixel(300, 120, Rgb([255, 255, 255]));

        annotator.mark(&mut canvas, Verdict::Affected);
        assert_eq!(canvas.get_pixel(60, 40), &Rgb([255, 0, 0]));
        // Outside the badge stays untouched.
        assert_eq!(canvas.get_pixel(10, 10), &Rgb([255, 255, 255]));

        annotator.mark(&mut canvas, Verdict::NotAffected);
        assert_eq!(canvas.get_pixel(60, 40), &Rgb([0, 255, 0]));
    }

    #[test]
    fn badge_is_clipped_on_small_images() {
        let annotator = Annotator::default();
        let mut canvas = RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]));
        annotator.mark(&mut canvas, Verdict::Affected);
        assert_eq!(canvas.dimensions(), (40, 40));
    }

    #[test]
    fn text_label_is_drawn_with_a_font() {
        let Some(annotator) = system_font() else {
            eprintln!("no system font found; skipping glyph rendering check");
            return;
        };
        assert!(annotator.has_font());

        let white = Rgb([255, 255, 255]);
        let mut canvas = RgbImage::from_pixel(400, 120, white);
        annotator.mark(&mut canvas, Verdict::Affected);

        let (x, baseline) = LABEL_ORIGIN;
        let top = baseline - LABEL_SCALE as i32;
        let inked = (x..x + 200)
            .flat_map(|px| (top.max(0)..baseline + 8).map(move |py| (px as u32, py as u32)))
            .filter(|&(px, py)| {
                let p = canvas.get_pixel(px, py);
                p[0] > p[1].saturating_add(60) && p[0] > p[2].saturating_add(60)
            })
            .count();
        assert!(inked > 50, "expected red glyph pixels near the label origin, found {inked}");

        // Text leaves the corner and the far side alone.
        assert_eq!(canvas.get_pixel(5, 5), &white);
        assert_eq!(canvas.get_pixel(395, 115), &white);
    }

    #[test]
    fn unreadable_source_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("fake.png");
        std::fs::write(&source, b"not an image").unwrap();

        let err = Annotator::default()
            .mark_file(&source, &dir.path().join("out.png"), Verdict::Affected)
            .unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn missing_font_file_is_an_error() {
        assert!(Annotator::with_font_file(Path::new("/nonexistent/font.ttf")).is_err());
    }
}
