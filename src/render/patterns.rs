//! Procedural decorative overlay catalog.
//!
//! Each layout style maps to a pure drawing function: given a transparent
//! canvas it burns translucent geometry in, seeded only by the canvas
//! dimensions. Identical dimensions always reproduce identical overlays,
//! which is what the test suite leans on.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_circle_mut,
    draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::f32::consts::PI;
use std::fmt;

/// Named decoration template selectable by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutStyle {
    GlowMotif,
    TiledRosette,
    HangingGarland,
    IconographicFace,
    SacredCircle,
    CrossEmblem,
    RadialBloom,
    RadialPlume,
    OrnateBorder,
    ConcentricRings,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        LayoutStyle::ConcentricRings
    }
}

struct PatternSpec {
    style: LayoutStyle,
    name: &'static str,
    draw: fn(&mut RgbaImage),
    /// Bottom space the pattern reserves below the caption block. Styles with
    /// a bottom-centered motif push the text further up.
    bottom_reserve: u32,
}

static CATALOG: [PatternSpec; 10] = [
    PatternSpec {
        style: LayoutStyle::GlowMotif,
        name: "glow-motif",
        draw: glow_motif,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::TiledRosette,
        name: "tiled-rosette",
        draw: tiled_rosette,
        bottom_reserve: 50,
    },
    PatternSpec {
        style: LayoutStyle::HangingGarland,
        name: "hanging-garland",
        draw: hanging_garland,
        bottom_reserve: 50,
    },
    PatternSpec {
        style: LayoutStyle::IconographicFace,
        name: "iconographic-face",
        draw: iconographic_face,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::SacredCircle,
        name: "sacred-circle",
        draw: sacred_circle,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::CrossEmblem,
        name: "cross-emblem",
        draw: cross_emblem,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::RadialBloom,
        name: "radial-bloom",
        draw: radial_bloom,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::RadialPlume,
        name: "radial-plume",
        draw: radial_plume,
        bottom_reserve: 100,
    },
    PatternSpec {
        style: LayoutStyle::OrnateBorder,
        name: "ornate-border",
        draw: ornate_border,
        bottom_reserve: 50,
    },
    PatternSpec {
        style: LayoutStyle::ConcentricRings,
        name: "concentric-rings",
        draw: concentric_rings,
        bottom_reserve: 50,
    },
];

impl LayoutStyle {
    pub const ALL: [LayoutStyle; 10] = [
        LayoutStyle::GlowMotif,
        LayoutStyle::TiledRosette,
        LayoutStyle::HangingGarland,
        LayoutStyle::IconographicFace,
        LayoutStyle::SacredCircle,
        LayoutStyle::CrossEmblem,
        LayoutStyle::RadialBloom,
        LayoutStyle::RadialPlume,
        LayoutStyle::OrnateBorder,
        LayoutStyle::ConcentricRings,
    ];

    fn spec(&self) -> &'static PatternSpec {
        let idx = match self {
            LayoutStyle::GlowMotif => 0,
            LayoutStyle::TiledRosette => 1,
            LayoutStyle::HangingGarland => 2,
            LayoutStyle::IconographicFace => 3,
            LayoutStyle::SacredCircle => 4,
            LayoutStyle::CrossEmblem => 5,
            LayoutStyle::RadialBloom => 6,
            LayoutStyle::RadialPlume => 7,
            LayoutStyle::OrnateBorder => 8,
            LayoutStyle::ConcentricRings => 9,
        };
        &CATALOG[idx]
    }

    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }

    pub fn from_name(name: &str) -> Option<LayoutStyle> {
        CATALOG
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.style)
    }

    /// Generate the transparent decoration layer for a canvas of the given
    /// dimensions.
    pub fn overlay(&self, width: u32, height: u32) -> RgbaImage {
        let mut canvas = RgbaImage::new(width, height);
        (self.spec().draw)(&mut canvas);
        canvas
    }

    /// Vertical anchor for the first caption line, given the total height of
    /// the wrapped text block.
    pub fn text_anchor(&self, height: u32, text_block_height: u32) -> i32 {
        height as i32 - text_block_height as i32 - self.spec().bottom_reserve as i32
    }
}

impl fmt::Display for LayoutStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn white(alpha: u8) -> Rgba<u8> {
    Rgba([255, 255, 255, alpha])
}

/// Line of integer thickness, offset along the minor axis of the segment.
fn thick_segment(
    canvas: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    thickness: u32,
    color: Rgba<u8>,
) {
    let horizontal = (end.0 - start.0).abs() >= (end.1 - start.1).abs();
    for k in 0..thickness {
        let off = k as f32 - (thickness as f32 - 1.0) / 2.0;
        if horizontal {
            draw_line_segment_mut(canvas, (start.0, start.1 + off), (end.0, end.1 + off), color);
        } else {
            draw_line_segment_mut(canvas, (start.0 + off, start.1), (end.0 + off, end.1), color);
        }
    }
}

/// Hollow circle stroke of the given thickness, drawn inward from `radius`.
fn ring(canvas: &mut RgbaImage, center: (i32, i32), radius: i32, thickness: u32, color: Rgba<u8>) {
    for t in 0..thickness as i32 {
        if radius - t > 0 {
            draw_hollow_circle_mut(canvas, center, radius - t, color);
        }
    }
}

/// Circular arc between two angles (degrees, y-down screen convention).
fn arc(
    canvas: &mut RgbaImage,
    center: (i32, i32),
    radius: f32,
    start_deg: f32,
    end_deg: f32,
    thickness: u32,
    color: Rgba<u8>,
) {
    let sweep = (end_deg - start_deg).abs();
    let steps = (sweep.ceil() as u32 * 2).max(1);
    for s in 0..=steps {
        let theta = (start_deg + (end_deg - start_deg) * s as f32 / steps as f32).to_radians();
        for t in 0..thickness {
            let r = radius - t as f32;
            let x = (center.0 as f32 + r * theta.cos()).round() as i32;
            let y = (center.1 as f32 + r * theta.sin()).round() as i32;
            if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Thin filled triangle radiating from `center`: tip corners sit on the
/// circle of `radius` at `angle` ± `half_width` radians.
fn wedge(
    canvas: &mut RgbaImage,
    center: (i32, i32),
    radius: f32,
    angle: f32,
    half_width: f32,
    color: Rgba<u8>,
) {
    let tip = |a: f32| {
        Point::new(
            (center.0 as f32 + radius * a.cos()).round() as i32,
            (center.1 as f32 + radius * a.sin()).round() as i32,
        )
    };
    let base = Point::new(center.0, center.1);
    let left = tip(angle - half_width);
    let right = tip(angle + half_width);
    if left == right || left == base || right == base {
        return;
    }
    draw_polygon_mut(canvas, &[base, left, right], color);
}

/// Concentric radiating glow plus a stylized flame-over-bowl motif,
/// bottom-centered.
fn glow_motif(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    let glow_radius = 100;
    for i in 0..3i32 {
        let alpha = (50.0 * (1.0 - i as f32 / 3.0)) as u8;
        let r = glow_radius + i * 20;
        draw_filled_ellipse_mut(canvas, (cx, cy), r, r, Rgba([255, 200, 0, alpha]));
    }

    // Bowl
    draw_filled_ellipse_mut(canvas, (cx, cy), 40, 50, white(100));

    // Flame above the bowl rim
    let flame = [
        Point::new(cx, cy - 80),
        Point::new(cx - 20, cy - 110),
        Point::new(cx + 20, cy - 110),
    ];
    draw_polygon_mut(canvas, &flame, Rgba([255, 150, 0, 150]));
}

/// Small radial-petal tiles repeated across the full canvas.
fn tiled_rosette(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let tile = 40u32;

    for i in (0..w).step_by(tile as usize) {
        for j in (0..h).step_by(tile as usize) {
            let cx = (i + tile / 2) as f32;
            let cy = (j + tile / 2) as f32;

            for angle_deg in (0..360).step_by(45) {
                let rad = (angle_deg as f32).to_radians();
                let inner = tile as f32 / 3.0;
                let outer = tile as f32 / 2.0;
                thick_segment(
                    canvas,
                    (cx + inner * rad.cos(), cy + inner * rad.sin()),
                    (cx + outer * rad.cos(), cy + outer * rad.sin()),
                    2,
                    white(50),
                );
            }

            draw_filled_circle_mut(canvas, (cx as i32, cy as i32), 3, white(100));
        }
    }
}

/// Horizontal top band with evenly spaced hanging bell shapes.
fn hanging_garland(canvas: &mut RgbaImage) {
    let (w, _) = canvas.dimensions();
    let band_y = 100f32;
    let spacing = 40u32;

    thick_segment(canvas, (0.0, band_y), (w as f32, band_y), 3, white(100));

    for i in (0..w).step_by(spacing as usize) {
        let bell_x = (i + spacing / 2) as i32;
        let bell_top = band_y as i32 + 20;

        thick_segment(
            canvas,
            (bell_x as f32, band_y),
            (bell_x as f32, bell_top as f32),
            2,
            white(100),
        );
        draw_filled_ellipse_mut(canvas, (bell_x, bell_top + 10), 10, 10, white(150));
    }
}

/// Circular face with two ears and a trunk-like stroke, bottom-centered.
fn iconographic_face(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    draw_filled_circle_mut(canvas, (cx, cy), 60, white(100));

    // Trunk as a two-segment stroke curving off to the right
    thick_segment(
        canvas,
        (cx as f32, cy as f32),
        ((cx + 40) as f32, (cy - 40) as f32),
        5,
        white(150),
    );
    thick_segment(
        canvas,
        ((cx + 40) as f32, (cy - 40) as f32),
        ((cx + 60) as f32, (cy - 20) as f32),
        5,
        white(150),
    );

    // Ears
    draw_filled_ellipse_mut(canvas, (cx - 60, cy - 20), 20, 20, white(100));
    draw_filled_ellipse_mut(canvas, (cx + 60, cy - 20), 20, 20, white(100));
}

/// Large ring with an inner lower arc and a center dot, bottom-centered.
fn sacred_circle(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    ring(canvas, (cx, cy), 80, 3, white(150));
    arc(canvas, (cx, cy), 40.0, 0.0, 180.0, 3, white(150));
    draw_filled_circle_mut(canvas, (cx, cy), 5, white(200));
}

/// Two perpendicular bars with four corner dots, bottom-centered.
fn cross_emblem(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    let arm_length = 60i32;
    let arm_width = 20i32;

    draw_filled_rect_mut(
        canvas,
        Rect::at(cx - arm_width / 2, cy - arm_length)
            .of_size(arm_width as u32, (2 * arm_length) as u32),
        white(150),
    );
    draw_filled_rect_mut(
        canvas,
        Rect::at(cx - arm_length, cy - arm_width / 2)
            .of_size((2 * arm_length) as u32, arm_width as u32),
        white(150),
    );

    for dx in [-1i32, 1] {
        for dy in [-1i32, 1] {
            draw_filled_circle_mut(
                canvas,
                (cx + dx * arm_length, cy + dy * arm_length),
                5,
                white(200),
            );
        }
    }
}

/// Twelve thin petal wedges radiating from a bottom-centered core.
fn radial_bloom(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    let petals = 12;
    let petal_length = 60.0;
    let half_width = 10.0 / petal_length;

    for i in 0..petals {
        let angle = 2.0 * PI * i as f32 / petals as f32;
        wedge(canvas, (cx, cy), petal_length, angle, half_width, white(150));
    }

    draw_filled_circle_mut(canvas, (cx, cy), 20, white(200));
}

/// Body and head circles plus radiating feather wedges, bottom-centered.
fn radial_plume(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 - 150;

    let feathers = 8;
    let feather_length = 80.0;
    let half_width = 7.5 / feather_length;

    for i in 0..feathers {
        let angle = 2.0 * PI * i as f32 / feathers as f32;
        wedge(
            canvas,
            (cx, cy),
            feather_length,
            angle,
            half_width,
            white(100),
        );
    }

    draw_filled_circle_mut(canvas, (cx, cy), 30, white(150));
    draw_filled_circle_mut(canvas, (cx + 30, cy), 15, white(150));
}

/// Top/bottom border lines with corner brackets and periodic dots.
fn ornate_border(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let wf = w as f32;
    let hf = h as f32;
    let border = 40f32;
    let corner = 30f32;

    thick_segment(canvas, (0.0, border), (wf, border), 3, white(100));
    thick_segment(canvas, (0.0, hf - border), (wf, hf - border), 3, white(100));

    // Corner brackets; the vertical strokes hug the outermost columns.
    let right = wf - 1.0;
    thick_segment(canvas, (0.0, border), (corner, border), 3, white(150));
    thick_segment(canvas, (1.0, border), (1.0, border + corner), 3, white(150));
    thick_segment(canvas, (wf - corner, border), (wf, border), 3, white(150));
    thick_segment(canvas, (right, border), (right, border + corner), 3, white(150));
    thick_segment(canvas, (0.0, hf - border), (corner, hf - border), 3, white(150));
    thick_segment(
        canvas,
        (1.0, hf - border - corner),
        (1.0, hf - border),
        3,
        white(150),
    );
    thick_segment(canvas, (wf - corner, hf - border), (wf, hf - border), 3, white(150));
    thick_segment(
        canvas,
        (right, hf - border - corner),
        (right, hf - border),
        3,
        white(150),
    );

    for i in (0..w).step_by(100) {
        draw_filled_circle_mut(canvas, (i as i32, border as i32), 5, white(150));
        draw_filled_circle_mut(canvas, (i as i32, (hf - border) as i32), 5, white(150));
    }
}

/// Five concentric rings with eight dots on the outer ring, canvas-centered.
fn concentric_rings(canvas: &mut RgbaImage) {
    let (w, h) = canvas.dimensions();
    let cx = w as i32 / 2;
    let cy = h as i32 / 2;
    let max_radius = (w.min(h) / 3) as f32;

    for i in 0..5 {
        let radius = (max_radius * (i + 1) as f32 / 5.0) as i32;
        ring(canvas, (cx, cy), radius, 2, white(100));
    }

    for i in 0..8 {
        let angle = 2.0 * PI * i as f32 / 8.0;
        let x = (cx as f32 + max_radius * angle.cos()) as i32;
        let y = (cy as f32 + max_radius * angle.sin()) as i32;
        draw_filled_circle_mut(canvas, (x, y), 10, white(150));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_catalog() {
        for style in LayoutStyle::ALL {
            assert_eq!(LayoutStyle::from_name(style.as_str()), Some(style));
        }
        assert_eq!(LayoutStyle::from_name("no-such-style"), None);
    }

    #[test]
    fn default_style_is_concentric_rings() {
        assert_eq!(LayoutStyle::default(), LayoutStyle::ConcentricRings);
    }

    #[test]
    fn overlays_are_deterministic() {
        for style in LayoutStyle::ALL {
            let a = style.overlay(512, 512);
            let b = style.overlay(512, 512);
            assert_eq!(a.as_raw(), b.as_raw(), "style {} not deterministic", style);
        }
    }

    #[test]
    fn overlays_match_canvas_dimensions() {
        for style in LayoutStyle::ALL {
            let overlay = style.overlay(640, 480);
            assert_eq!(overlay.dimensions(), (640, 480));
        }
    }

    #[test]
    fn every_overlay_draws_something() {
        for style in LayoutStyle::ALL {
            let overlay = style.overlay(512, 512);
            let visible = overlay.pixels().filter(|p| p[3] > 0).count();
            assert!(visible > 0, "style {} drew nothing", style);
        }
    }

    #[test]
    fn motif_styles_reserve_more_bottom_space() {
        // text anchor = height - block - reserve
        assert_eq!(LayoutStyle::GlowMotif.text_anchor(1024, 160), 1024 - 160 - 100);
        assert_eq!(
            LayoutStyle::ConcentricRings.text_anchor(1024, 160),
            1024 - 160 - 50
        );
        assert!(
            LayoutStyle::SacredCircle.text_anchor(1024, 0)
                < LayoutStyle::OrnateBorder.text_anchor(1024, 0)
        );
    }

    #[test]
    fn concentric_rings_marks_outer_ring_dots() {
        let overlay = LayoutStyle::ConcentricRings.overlay(512, 512);
        // Rightmost dot center sits on the outer ring at (256 + 170, 256).
        let dot = overlay.get_pixel(256 + 170, 256);
        assert_eq!(dot[3], 150);
        // Canvas center is inside ring 1 but not on a stroke.
        let center = overlay.get_pixel(256, 256);
        assert_eq!(center[3], 0);
    }

    #[test]
    fn overlay_alphas_are_translucent() {
        for style in LayoutStyle::ALL {
            let overlay = style.overlay(300, 300);
            assert!(overlay.pixels().all(|p| p[3] < 255));
        }
    }
}
