//! Font resolution, measurement and glyph drawing.
//!
//! Families are resolved to TTF files on disk via a small search path. When
//! nothing resolves, rendering falls back to a builtin fixed-size monospace
//! bitmap font instead of failing the whole composite.

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::path::PathBuf;

/// Pixel scale applied to the builtin 5x7 bitmap glyphs.
const BITMAP_SCALE: u32 = 4;

/// A font usable for both width measurement and drawing.
pub enum LoadedFont {
    Ttf { font: FontVec, scale: PxScale },
    Builtin,
}

/// Resolves family names to font files.
pub struct FontStore {
    search_dirs: Vec<PathBuf>,
}

impl FontStore {
    pub fn new(font_dir: Option<&str>) -> Self {
        let mut search_dirs = Vec::new();
        if let Some(dir) = font_dir {
            search_dirs.push(PathBuf::from(dir));
        }
        search_dirs.push(PathBuf::from("."));
        search_dirs.push(PathBuf::from("/usr/share/fonts/truetype"));
        search_dirs.push(PathBuf::from("/usr/share/fonts"));
        search_dirs.push(PathBuf::from("/usr/local/share/fonts"));
        FontStore { search_dirs }
    }

    /// Load `family` at `size` pixels, falling back to the builtin bitmap
    /// font when no TTF can be found or parsed.
    pub fn load(&self, family: &str, size: u32) -> LoadedFont {
        for path in self.candidate_paths(family) {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    log::debug!("Loaded font {} from {}", family, path.display());
                    return LoadedFont::Ttf {
                        font,
                        scale: PxScale::from(size as f32),
                    };
                }
                Err(e) => {
                    log::warn!("Failed to parse font file {}: {}", path.display(), e);
                }
            }
        }

        log::warn!(
            "Font family '{}' not found, using builtin bitmap font",
            family
        );
        LoadedFont::Builtin
    }

    fn candidate_paths(&self, family: &str) -> Vec<PathBuf> {
        let compact: String = family.split_whitespace().collect();
        let names = [
            format!("{}.ttf", family),
            format!("{}.ttf", compact),
            format!("{}-Regular.ttf", compact),
            format!("{}.ttf", compact.to_lowercase()),
        ];

        let mut paths = Vec::new();
        for dir in &self.search_dirs {
            for name in &names {
                paths.push(dir.join(name));
            }
        }
        paths
    }
}

impl LoadedFont {
    /// Advance width of `text` in pixels, including kerning for TTF fonts.
    pub fn measure(&self, text: &str) -> f32 {
        match self {
            LoadedFont::Ttf { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let mut width = 0.0f32;
                let mut prev: Option<ab_glyph::GlyphId> = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = prev {
                        width += scaled.kern(prev, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            LoadedFont::Builtin => (text.chars().count() as u32 * bitmap_advance()) as f32,
        }
    }

    /// Draw `text` with its top-left corner at (x, y), alpha-blending onto
    /// the canvas. The alpha channel of `color` scales glyph coverage.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        match self {
            LoadedFont::Ttf { font, scale } => {
                let scaled = font.as_scaled(*scale);
                let baseline = y as f32 + scaled.ascent();
                let mut cursor = x as f32;
                let mut prev: Option<ab_glyph::GlyphId> = None;

                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(prev) = prev {
                        cursor += scaled.kern(prev, id);
                    }

                    let glyph = id.with_scale_and_position(*scale, ab_glyph::point(cursor, baseline));
                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|px, py, coverage| {
                            let sx = px as i32 + bounds.min.x as i32;
                            let sy = py as i32 + bounds.min.y as i32;
                            let alpha = (coverage * color[3] as f32) as u8;
                            blend_pixel(canvas, sx, sy, Rgba([color[0], color[1], color[2], alpha]));
                        });
                    }

                    cursor += scaled.h_advance(id);
                    prev = Some(id);
                }
            }
            LoadedFont::Builtin => {
                let mut cx = x;
                for c in text.chars() {
                    draw_bitmap_glyph(canvas, cx, y, c, color);
                    cx += bitmap_advance() as i32;
                }
            }
        }
    }
}

fn bitmap_advance() -> u32 {
    // 5 columns plus one column of spacing, scaled.
    6 * BITMAP_SCALE
}

fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, top: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    if top[3] == 0 {
        return;
    }
    let bottom = *canvas.get_pixel(x as u32, y as u32);
    canvas.put_pixel(x as u32, y as u32, blend_over(bottom, top));
}

/// Standard "over" operator for two non-premultiplied RGBA pixels.
pub fn blend_over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = top[3] as f32 / 255.0;
    let ba = bottom[3] as f32 / 255.0;
    let out_a = ta + ba * (1.0 - ta);
    if out_a < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        (((t * ta + b * ba * (1.0 - ta)) / out_a) * 255.0).round() as u8
    };

    Rgba([
        channel(top[0], bottom[0]),
        channel(top[1], bottom[1]),
        channel(top[2], bottom[2]),
        (out_a * 255.0).round() as u8,
    ])
}

fn draw_bitmap_glyph(canvas: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>) {
    let Some(rows) = glyph_rows(ch) else {
        return;
    };
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..5u32 {
            if (bits >> (4 - col)) & 1 == 0 {
                continue;
            }
            let px = x + (col * BITMAP_SCALE) as i32;
            let py = y + (row as u32 * BITMAP_SCALE) as i32;
            for dy in 0..BITMAP_SCALE {
                for dx in 0..BITMAP_SCALE {
                    blend_pixel(canvas, px + dx as i32, py + dy as i32, color);
                }
            }
        }
    }
}

/// 5x7 glyph rows, bit 4 = leftmost column. Lowercase letters share the
/// uppercase shapes; unknown characters render as blanks.
#[rustfmt::skip]
fn glyph_rows(ch: char) -> Option<[u8; 7]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001],
        'B' => [0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110],
        'C' => [0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110],
        'D' => [0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100],
        'E' => [0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111],
        'F' => [0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000],
        'G' => [0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111],
        'H' => [0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001],
        'I' => [0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110],
        'J' => [0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100],
        'K' => [0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001],
        'L' => [0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111],
        'M' => [0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001],
        'N' => [0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001],
        'O' => [0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110],
        'P' => [0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000],
        'Q' => [0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101],
        'R' => [0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001],
        'S' => [0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110],
        'T' => [0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100],
        'U' => [0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110],
        'V' => [0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100],
        'W' => [0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010],
        'X' => [0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001],
        'Y' => [0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100],
        'Z' => [0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111],
        '0' => [0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110],
        '1' => [0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110],
        '2' => [0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111],
        '3' => [0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110],
        '4' => [0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010],
        '5' => [0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110],
        '6' => [0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110],
        '7' => [0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000],
        '8' => [0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110],
        '9' => [0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100],
        '.' => [0b00000,0b00000,0b00000,0b00000,0b00000,0b01100,0b01100],
        ',' => [0b00000,0b00000,0b00000,0b00000,0b01100,0b00100,0b01000],
        '!' => [0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100],
        '?' => [0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100],
        '\'' => [0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000],
        '"' => [0b01010,0b01010,0b10100,0b00000,0b00000,0b00000,0b00000],
        '-' => [0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000],
        ':' => [0b00000,0b01100,0b01100,0b00000,0b01100,0b01100,0b00000],
        ';' => [0b00000,0b01100,0b01100,0b00000,0b01100,0b00100,0b01000],
        '%' => [0b11001,0b11010,0b00010,0b00100,0b01000,0b01011,0b10011],
        '&' => [0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101],
        '/' => [0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000],
        '(' => [0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010],
        ')' => [0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000],
        '@' => [0b01110,0b10001,0b10111,0b10101,0b10110,0b10000,0b01110],
        '+' => [0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_font_measures_monospace() {
        let font = LoadedFont::Builtin;
        let one = font.measure("a");
        let five = font.measure("abcde");
        assert!(one > 0.0);
        assert_eq!(five, one * 5.0);
    }

    #[test]
    fn builtin_font_draws_visible_pixels() {
        let font = LoadedFont::Builtin;
        let mut canvas = RgbaImage::from_pixel(64, 40, Rgba([0, 0, 0, 255]));
        font.draw(&mut canvas, 2, 2, "HI", Rgba([255, 255, 255, 255]));

        let lit = canvas.pixels().filter(|p| p[0] > 200).count();
        assert!(lit > 0, "glyph blocks should be drawn");
    }

    #[test]
    fn builtin_font_clips_at_canvas_edge() {
        let font = LoadedFont::Builtin;
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        // Must not panic when text runs past the right/bottom edges.
        font.draw(&mut canvas, 6, 6, "WWW", Rgba([255, 255, 255, 255]));
        font.draw(&mut canvas, -3, -3, "W", Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn blend_over_is_opaque_over_opaque() {
        let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255]));
        assert_eq!(out, Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn blend_over_half_alpha_mixes_channels() {
        let out = blend_over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(out[3], 255);
        assert!(out[0] > 120 && out[0] < 136);
    }

    #[test]
    fn missing_family_falls_back_to_builtin() {
        let store = FontStore::new(None);
        let font = store.load("Definitely Not A Font 9000", 50);
        assert!(matches!(font, LoadedFont::Builtin));
    }
}
