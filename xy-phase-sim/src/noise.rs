//! Thermal perturbation applied after each relaxation step.
//!
//! The kick is `(u - ½) · T · 2π` with `u ~ U[0, 1)`: a no-op at `T = 0`,
//! a full turn of spread at `T = 1`, linear in between.

use std::f64::consts::TAU;

use rand::Rng;

/// Sample one thermal kick for `temperature ∈ [0, 1]`.
#[inline]
pub fn thermal_kick<R: Rng + ?Sized>(temperature: f64, rng: &mut R) -> f64 {
    if temperature <= 0.0 {
        return 0.0;
    }
    let u: f64 = rng.gen();
    (u - 0.5) * temperature * TAU
}

/// Largest magnitude a kick can reach at `temperature`.
#[inline]
pub fn max_kick(temperature: f64) -> f64 {
    temperature.max(0.0) * TAU / 2.0
}
