//! Display-side chasing and the arrow projection that gets drawn.
//!
//! The display grid trails the target grid every frame by
//! `base + T · gain` (0.1 + 0.9·T by default): a cold field drifts
//! languidly, a hot one tracks the physics almost frame for frame.
//!
//! Drawing is a pure projection of the display grid into [`Arrow`]s in
//! canvas space (y grows downward), so the egui viewer and text renderers
//! encode phase identically.

use crate::angle::{blend, hue_degrees};
use crate::config::SimConfig;
use crate::torus::{cell_center, PhaseGrid};

/// Interpolation factor for the current temperature, clamped to `[0, 1]`.
#[inline]
pub fn render_lerp(base: f64, gain: f64, temperature: f64) -> f64 {
    (base + temperature * gain).clamp(0.0, 1.0)
}

/// Move every display angle toward its target by `factor` in vector space.
pub fn interpolate(display: &mut PhaseGrid, target: &PhaseGrid, factor: f64) {
    debug_assert_eq!(display.shape(), target.shape());
    for (d, &t) in display.angles_mut().iter_mut().zip(target.angles()) {
        *d = blend(*d, t, factor);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Arrow projection
// ─────────────────────────────────────────────────────────────────────────────

/// Arrow proportions, all relative to the cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    /// Shaft length / cell size.
    pub length: f64,
    /// Barb length / cell size.
    pub head_length: f64,
    /// Barb angle either side of the shaft (radians).
    pub head_angle: f64,
    /// Colour by phase hue instead of monochrome.
    pub hue: bool,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

impl ArrowStyle {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            length: config.arrow_length,
            head_length: config.arrowhead_length,
            head_angle: config.arrowhead_angle_deg.to_radians(),
            hue: config.hue_colouring,
        }
    }
}

/// One drawable site: a shaft from `tail` to `tip` plus two barb strokes
/// from `tip` to each point in `barbs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub x: usize,
    pub y: usize,
    pub tail: (f64, f64),
    pub tip: (f64, f64),
    pub barbs: [(f64, f64); 2],
    /// Hue in degrees `[0, 360)`; `None` for monochrome.
    pub hue: Option<f64>,
}

/// Project site `(x, y)` with display angle `angle`.
pub fn arrow(x: usize, y: usize, angle: f64, cell_size: f64, style: &ArrowStyle) -> Arrow {
    let tail = cell_center(x, y, cell_size);
    let len = style.length * cell_size;
    let (s, c) = angle.sin_cos();
    let tip = (tail.0 + len * c, tail.1 + len * s);

    let head = style.head_length * cell_size;
    let barb = |offset: f64| {
        let (bs, bc) = (angle - offset).sin_cos();
        (tip.0 - head * bc, tip.1 - head * bs)
    };

    Arrow {
        x,
        y,
        tail,
        tip,
        barbs: [barb(style.head_angle), barb(-style.head_angle)],
        hue: style.hue.then(|| hue_degrees(angle)),
    }
}

/// Arrows for every site of `grid`, row-major.
pub fn arrows<'a>(
    grid: &'a PhaseGrid,
    cell_size: f64,
    style: &'a ArrowStyle,
) -> impl Iterator<Item = Arrow> + 'a {
    let shape = grid.shape();
    grid.angles().iter().enumerate().map(move |(idx, &angle)| {
        let (x, y) = shape.coords(idx);
        arrow(x, y, angle, cell_size, style)
    })
}

/// Eight-way compass glyph for text output (canvas orientation, y down).
pub fn compass_glyph(angle: f64) -> char {
    const GLYPHS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];
    let octant = (hue_degrees(angle) / 45.0).round() as usize % 8;
    GLYPHS[octant]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::arc_distance;
    use crate::torus::GridShape;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn render_lerp_spans_base_to_one() {
        assert!((render_lerp(0.1, 0.9, 0.0) - 0.1).abs() < 1e-12);
        assert!((render_lerp(0.1, 0.9, 0.5) - 0.55).abs() < 1e-12);
        assert!((render_lerp(0.1, 0.9, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn full_factor_snaps_display_to_target() {
        let shape = GridShape::new(3, 2).unwrap();
        let target = PhaseGrid::from_angles(shape, vec![0.1, 1.0, 2.0, -3.0, 3.1, 5.0]).unwrap();
        let mut display = PhaseGrid::uniform(shape, 0.0);
        interpolate(&mut display, &target, 1.0);
        for (d, t) in display.angles().iter().zip(target.angles()) {
            assert!(arc_distance(*d, *t) < 1e-12);
        }
    }

    #[test]
    fn display_chases_across_the_seam() {
        let shape = GridShape::new(1, 1).unwrap();
        let target = PhaseGrid::uniform(shape, (-179f64).to_radians());
        let mut display = PhaseGrid::uniform(shape, 179f64.to_radians());
        for _ in 0..20 {
            let before = arc_distance(display.get(0, 0), target.get(0, 0));
            interpolate(&mut display, &target, 0.1);
            let now = display.get(0, 0);
            assert!(arc_distance(now, target.get(0, 0)) <= before);
            assert!(arc_distance(now, PI) < 2f64.to_radians());
        }
    }

    #[test]
    fn arrow_points_along_angle_from_cell_centre() {
        let style = ArrowStyle {
            length: 0.5,
            head_length: 0.2,
            head_angle: 30f64.to_radians(),
            hue: true,
        };
        let a = arrow(1, 2, FRAC_PI_2, 10.0, &style);
        assert!(close(a.tail, (15.0, 25.0)));
        assert!(close(a.tip, (15.0, 30.0)));
        // Barbs trail back toward the tail at ±30°, 2px long.
        for b in a.barbs {
            let d = ((b.0 - a.tip.0).powi(2) + (b.1 - a.tip.1).powi(2)).sqrt();
            assert!((d - 2.0).abs() < 1e-9);
            assert!(b.1 < a.tip.1);
        }
        assert!((a.barbs[0].0 - a.tip.0 + (a.barbs[1].0 - a.tip.0)).abs() < 1e-9);
        assert_eq!(a.hue.map(|h| h.round()), Some(90.0));
    }

    #[test]
    fn barbs_open_thirty_degrees_from_the_shaft() {
        let style = ArrowStyle::default();
        let a = arrow(0, 0, 0.7, 20.0, &style);
        let back = (a.tail.0 - a.tip.0, a.tail.1 - a.tip.1);
        for b in a.barbs {
            let v = (b.0 - a.tip.0, b.1 - a.tip.1);
            let cos = (back.0 * v.0 + back.1 * v.1)
                / ((back.0.hypot(back.1)) * v.0.hypot(v.1));
            assert!((cos.acos().to_degrees() - 30.0).abs() < 1e-6);
        }
    }

    #[test]
    fn monochrome_style_has_no_hue() {
        let style = ArrowStyle {
            hue: false,
            ..ArrowStyle::default()
        };
        assert_eq!(arrow(0, 0, 1.0, 10.0, &style).hue, None);
    }

    #[test]
    fn arrows_cover_every_site_in_row_major_order() {
        let shape = GridShape::new(3, 2).unwrap();
        let grid = PhaseGrid::uniform(shape, 0.0);
        let style = ArrowStyle::default();
        let all: Vec<_> = arrows(&grid, 10.0, &style).map(|a| (a.x, a.y)).collect();
        assert_eq!(all, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn compass_glyphs() {
        assert_eq!(compass_glyph(0.0), '→');
        assert_eq!(compass_glyph(FRAC_PI_2), '↓');
        assert_eq!(compass_glyph(PI), '←');
        assert_eq!(compass_glyph(-FRAC_PI_2), '↑');
        assert_eq!(compass_glyph(2.0 * PI - 0.1), '→');
    }
}
