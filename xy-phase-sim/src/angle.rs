//! Circle arithmetic on unwrapped phase angles.
//!
//! Angles are stored as plain `f64` radians and never compared linearly.
//! Averaging and blending go through unit vectors `(cos θ, sin θ)` and come
//! back through `atan2`, so the ±π seam is invisible to every caller.

use std::f64::consts::TAU;

/// Unit vector for `theta`.
#[inline]
pub fn unit(theta: f64) -> (f64, f64) {
    let (s, c) = theta.sin_cos();
    (c, s)
}

/// Vector-space mean: `atan2(Σ sin θ, Σ cos θ)`.
///
/// Neighbours at 350° and 10° give 0°, not 180°. An empty or perfectly
/// cancelling input returns 0.
pub fn circular_mean<I>(angles: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sx, sy) = angles
        .into_iter()
        .map(unit)
        .fold((0.0, 0.0), |(ax, ay), (cx, cy)| (ax + cx, ay + cy));
    sy.atan2(sx)
}

/// Move `from` toward `to` by fraction `t` along the chord between their
/// unit vectors, then project back to an angle.
///
/// Result lies in `(-π, π]` and always travels the shorter arc.
#[inline]
pub fn blend(from: f64, to: f64, t: f64) -> f64 {
    let (fx, fy) = unit(from);
    let (tx, ty) = unit(to);
    let x = fx + (tx - fx) * t;
    let y = fy + (ty - fy) * t;
    y.atan2(x)
}

/// Fold into `[0, 2π)`.
#[inline]
pub fn normalize(theta: f64) -> f64 {
    theta.rem_euclid(TAU)
}

/// Hue in degrees, `[0, 360)`.
#[inline]
pub fn hue_degrees(theta: f64) -> f64 {
    theta.to_degrees().rem_euclid(360.0)
}

/// Relative phase `(a - b) mod 2π`.
#[inline]
pub fn relative_phase(a: f64, b: f64) -> f64 {
    (a - b).rem_euclid(TAU)
}

/// Length of the shorter arc between `a` and `b`, in `[0, π]`.
#[inline]
pub fn arc_distance(a: f64, b: f64) -> f64 {
    let d = relative_phase(a, b);
    d.min(TAU - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn deg(d: f64) -> f64 {
        d.to_radians()
    }

    #[test]
    fn mean_across_the_seam() {
        let m = circular_mean([deg(350.0), deg(10.0)]);
        assert!(arc_distance(m, 0.0) < 1e-12, "got {}°", m.to_degrees());
    }

    #[test]
    fn mean_of_identical_angles_is_that_angle() {
        let a = deg(123.0);
        let m = circular_mean([a, a, a, a]);
        assert!(arc_distance(m, a) < 1e-12);
    }

    #[test]
    fn mean_ignores_unwrapped_representation() {
        let m1 = circular_mean([0.3, 0.5]);
        let m2 = circular_mean([0.3 + 4.0 * TAU, 0.5 - 7.0 * TAU]);
        assert!(arc_distance(m1, m2) < 1e-9);
    }

    #[test]
    fn blend_crosses_the_seam_on_the_short_arc() {
        let from = deg(179.0);
        let to = deg(-179.0);
        for &t in &[0.1, 0.25, 0.5, 0.75, 0.9] {
            let b = blend(from, to, t);
            // Must stay within the 2° arc around ±180°, never pass near 0°.
            assert!(arc_distance(b, PI) <= deg(1.0) + 1e-12, "t={t}: {}°", b.to_degrees());
            assert!(arc_distance(b, 0.0) > deg(178.0));
        }
    }

    #[test]
    fn blend_endpoints() {
        let a = deg(40.0);
        let b = deg(100.0);
        assert!(arc_distance(blend(a, b, 0.0), a) < 1e-12);
        assert!(arc_distance(blend(a, b, 1.0), b) < 1e-12);
    }

    #[test]
    fn blend_moves_monotonically_toward_target() {
        let a = deg(10.0);
        let b = deg(90.0);
        let mut prev = arc_distance(a, b);
        for i in 1..=10 {
            let d = arc_distance(blend(a, b, i as f64 / 10.0), b);
            assert!(d < prev);
            prev = d;
        }
    }

    #[test]
    fn hue_wraps_negative_angles() {
        assert!((hue_degrees(-PI / 2.0) - 270.0).abs() < 1e-9);
        assert!((hue_degrees(TAU + PI) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_and_relative_phase() {
        assert!((normalize(-0.25) - (TAU - 0.25)).abs() < 1e-12);
        assert!((relative_phase(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
    }
}
