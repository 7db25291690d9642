//! One relaxation tick of the target field.
//!
//! Per site:
//! 1. Inside the pointer radius the angle is hard-set to point at the pointer.
//! 2. Otherwise the four toroidal neighbours are read from the pre-tick
//!    snapshot and averaged in vector space.
//! 3. The site is blended toward that alignment by `physics_lerp`.
//! 4. A thermal kick `(u - ½) · T · 2π` is added.
//!
//! All reads come from the snapshot, so the update is synchronous (Jacobi):
//! sweep order cannot bias the result.

use rand::Rng;

use crate::angle::{blend, circular_mean};
use crate::interaction::InteractionState;
use crate::noise::thermal_kick;
use crate::torus::{cell_center, PhaseGrid};

/// Everything a tick reads besides the grids.
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    /// Blend factor toward neighbour alignment.
    pub lerp: f64,
    /// Noise amplitude, `[0, 1]`.
    pub temperature: f64,
    pub interaction: &'a InteractionState,
    /// Cell edge in canvas pixels.
    pub cell_size: f64,
    /// Pointer override radius in canvas pixels.
    pub radius: f64,
}

/// Per-tick counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub relaxed: usize,
    pub overridden: usize,
}

/// Vector-space mean of the four neighbours of `(x, y)`.
#[inline]
pub fn target_alignment(grid: &PhaseGrid, x: usize, y: usize) -> f64 {
    let angles = grid.angles();
    circular_mean(grid.shape().neighbors(x, y).iter().map(|&i| angles[i]))
}

/// Steps 3 and 4 for a single site.
#[inline]
pub fn relax_site<R: Rng + ?Sized>(
    current: f64,
    alignment: f64,
    lerp: f64,
    temperature: f64,
    rng: &mut R,
) -> f64 {
    blend(current, alignment, lerp) + thermal_kick(temperature, rng)
}

/// Advance `target` by one tick. `snapshot` is scratch space of the same
/// shape; on return it holds the pre-tick field.
pub fn step<R: Rng + ?Sized>(
    target: &mut PhaseGrid,
    snapshot: &mut PhaseGrid,
    inputs: &StepInputs<'_>,
    rng: &mut R,
) -> StepReport {
    snapshot.copy_from(target);
    let shape = target.shape();
    let mut report = StepReport::default();

    for y in 0..shape.height() {
        for x in 0..shape.width() {
            let idx = y * shape.width() + x;
            let center = cell_center(x, y, inputs.cell_size);
            let next = match inputs.interaction.pull(center, inputs.radius) {
                Some(angle) => {
                    report.overridden += 1;
                    angle
                }
                None => {
                    report.relaxed += 1;
                    let alignment = target_alignment(snapshot, x, y);
                    relax_site(
                        snapshot.angles()[idx],
                        alignment,
                        inputs.lerp,
                        inputs.temperature,
                        rng,
                    )
                }
            };
            target.angles_mut()[idx] = next;
        }
    }
    report
}
