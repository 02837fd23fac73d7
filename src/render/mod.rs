//! The layout compositing engine.
//!
//! `render` is a pure function of (background, caption, design spec): it wraps
//! the caption to the image width, burns a procedural pattern overlay into the
//! background, draws the shadowed caption block, pastes an optional logo, and
//! flattens the result to opaque RGB. Identical inputs always produce
//! byte-identical output.

pub mod font;
pub mod patterns;
pub mod wrap;

pub use font::{FontStore, LoadedFont};
pub use patterns::LayoutStyle;
pub use wrap::wrap_lines;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::{Result, StudioError};
use crate::models::{CompositeResult, DesignSpec};

/// Left/right margin the caption block keeps from the image edges.
pub const TEXT_MARGIN: u32 = 50;
/// Extra pixels between stacked caption lines, on top of the font size.
pub const LINE_SPACING: u32 = 30;
/// Width the logo is resized to before pasting.
pub const LOGO_TARGET_WIDTH: u32 = 100;
/// Offset of the logo from the top-right image corner.
pub const LOGO_MARGIN: u32 = 20;

const SHADOW_OFFSET: i32 = 1;
const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);

/// Composite the caption, decoration and logo onto `base`.
///
/// The caller guarantees a background exists; font problems degrade to the
/// builtin bitmap font inside [`FontStore::load`] rather than failing here.
pub fn render(
    base: &DynamicImage,
    caption: &str,
    design: &DesignSpec,
    fonts: &FontStore,
) -> Result<CompositeResult> {
    if design.font_size == 0 {
        return Err(StudioError::RenderError(
            "font size must be positive".into(),
        ));
    }

    let mut working = base.to_rgba8();
    let (width, height) = working.dimensions();

    // Measure phase
    let font = fonts.load(&design.font_family, design.font_size);
    let max_text_width = width.saturating_sub(2 * TEXT_MARGIN).max(1) as f32;
    let lines = wrap_lines(caption, |s| font.measure(s), max_text_width);

    let line_height = design.font_size + LINE_SPACING;
    let text_block_height = lines.len() as u32 * line_height;

    // Pattern + composite phases
    let overlay = design.layout_style.overlay(width, height);
    imageops::overlay(&mut working, &overlay, 0, 0);

    // Text-draw phase: shadow copy first, main color on top
    let text_y = design.layout_style.text_anchor(height, text_block_height);
    let [r, g, b] = design.text_color;
    for (i, line) in lines.iter().enumerate() {
        let y = text_y + (i as u32 * line_height) as i32;
        font.draw(
            &mut working,
            TEXT_MARGIN as i32 + SHADOW_OFFSET,
            y + SHADOW_OFFSET,
            line,
            SHADOW_COLOR,
        );
        font.draw(
            &mut working,
            TEXT_MARGIN as i32,
            y,
            line,
            Rgba([r, g, b, 255]),
        );
    }

    // Logo phase
    if let Some(logo) = &design.logo {
        paste_logo(&mut working, logo);
    }

    // Flatten phase: drop the alpha channel for an opaque deliverable
    let flat = DynamicImage::ImageRgba8(working).to_rgb8();
    Ok(CompositeResult::new(flat))
}

/// Resize the logo to the fixed target width (shrinking further if a very
/// tall logo would otherwise spill past the bottom edge) and paste it at the
/// top-right corner offset, honoring its alpha mask.
fn paste_logo(canvas: &mut RgbaImage, logo: &DynamicImage) {
    let (width, height) = canvas.dimensions();
    let (lw, lh) = (logo.width().max(1), logo.height().max(1));

    let mut target_w = LOGO_TARGET_WIDTH.min(width.saturating_sub(2 * LOGO_MARGIN).max(1));
    let mut target_h = ((target_w as u64 * lh as u64) / lw as u64).max(1) as u32;

    let max_h = height.saturating_sub(2 * LOGO_MARGIN).max(1);
    if target_h > max_h {
        target_w = ((max_h as u64 * lw as u64) / lh as u64).max(1) as u32;
        target_h = max_h;
    }

    let resized = imageops::resize(&logo.to_rgba8(), target_w, target_h, FilterType::Lanczos3);
    let x = width.saturating_sub(target_w + LOGO_MARGIN) as i64;
    imageops::overlay(canvas, &resized, x, LOGO_MARGIN as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_base(w: u32, h: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_pixel(w, h, Rgb(color)))
    }

    fn test_design(style: LayoutStyle) -> DesignSpec {
        // An unresolvable family forces the builtin font, keeping the tests
        // independent of system font installations.
        DesignSpec::new(style).with_font("No Such Family", 50)
    }

    #[test]
    fn empty_caption_concentric_rings_scenario() {
        let base = solid_base(512, 512, [20, 40, 60]);
        let fonts = FontStore::new(None);
        let result = render(
            &base,
            "",
            &test_design(LayoutStyle::ConcentricRings),
            &fonts,
        )
        .unwrap();

        assert_eq!((result.width(), result.height()), (512, 512));

        // The outer-ring dot region must differ from the untouched base.
        let dot = result.image().get_pixel(256 + 170, 256);
        assert_ne!(dot.0, [20, 40, 60]);
        // A pixel well away from rings and dots is untouched.
        let corner = result.image().get_pixel(5, 5);
        assert_eq!(corner.0, [20, 40, 60]);
    }

    #[test]
    fn render_is_idempotent_for_unchanged_inputs() {
        let base = solid_base(256, 256, [90, 10, 120]);
        let fonts = FontStore::new(None);
        let design = test_design(LayoutStyle::GlowMotif);

        let a = render(&base, "Weekend getaway special", &design, &fonts).unwrap();
        let b = render(&base, "Weekend getaway special", &design, &fonts).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn caption_text_is_drawn_with_shadow() {
        let base = solid_base(512, 512, [0, 0, 0]);
        let fonts = FontStore::new(None);
        let design = test_design(LayoutStyle::OrnateBorder).with_text_color([255, 255, 255]);

        let with_text = render(&base, "HELLO", &design, &fonts).unwrap();
        let without = render(&base, "", &design, &fonts).unwrap();

        let white_pixels = |img: &image::RgbImage| {
            img.pixels().filter(|p| p.0 == [255, 255, 255]).count()
        };
        assert!(white_pixels(with_text.image()) > white_pixels(without.image()));
    }

    #[test]
    fn every_style_renders_every_size() {
        let fonts = FontStore::new(None);
        for style in LayoutStyle::ALL {
            let base = solid_base(320, 320, [128, 128, 128]);
            let result = render(&base, "Festive greetings from us", &test_design(style), &fonts);
            assert!(result.is_ok(), "style {} failed", style);
        }
    }

    #[test]
    fn logo_lands_inside_the_top_right_corner() {
        let base = solid_base(512, 512, [0, 0, 0]);
        let fonts = FontStore::new(None);

        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            200,
            100,
            Rgba([255, 0, 0, 255]),
        ));
        let design = test_design(LayoutStyle::ConcentricRings).with_logo(logo);
        let result = render(&base, "", &design, &fonts).unwrap();

        // 200x100 logo resized to 100x50, anchored at (512-100-20, 20).
        let inside = result.image().get_pixel(392 + 10, 20 + 10);
        assert_eq!(inside.0, [255, 0, 0]);
        let above = result.image().get_pixel(392 + 10, 5);
        assert_eq!(above.0, [0, 0, 0]);
        let left_of = result.image().get_pixel(380, 30);
        assert_eq!(left_of.0, [0, 0, 0]);
    }

    #[test]
    fn tall_logo_is_clamped_to_the_canvas() {
        let base = solid_base(256, 256, [0, 0, 0]);
        let fonts = FontStore::new(None);

        // Aspect ratio 1:20 would resize to 100x2000 and spill; the renderer
        // must shrink it until the bounding box fits.
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            10,
            200,
            Rgba([0, 255, 0, 255]),
        ));
        let design = test_design(LayoutStyle::ConcentricRings).with_logo(logo);
        let result = render(&base, "", &design, &fonts).unwrap();
        assert_eq!((result.width(), result.height()), (256, 256));

        // Bottom margin row stays untouched: the logo may not reach it.
        for x in 0..256 {
            let px = result.image().get_pixel(x, 255);
            assert_ne!(px.0, [0, 255, 0]);
        }
    }

    #[test]
    fn zero_font_size_is_rejected() {
        let base = solid_base(64, 64, [0, 0, 0]);
        let fonts = FontStore::new(None);
        let mut design = test_design(LayoutStyle::ConcentricRings);
        design.font_size = 0;
        assert!(render(&base, "x", &design, &fonts).is_err());
    }

    #[test]
    fn transparent_overlay_regions_keep_base_colors() {
        // Alpha flatten: output pixels where nothing was drawn must equal the
        // original base exactly, with no residual alpha artifacts.
        let base = solid_base(512, 512, [200, 100, 50]);
        let fonts = FontStore::new(None);
        let result = render(
            &base,
            "",
            &test_design(LayoutStyle::GlowMotif),
            &fonts,
        )
        .unwrap();
        assert_eq!(result.image().get_pixel(10, 10).0, [200, 100, 50]);
    }
}
