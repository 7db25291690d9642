//! # xy-phase-sim
//!
//! A discretised U(1) / XY field on a `W × H` torus: every site carries a
//! continuous phase angle that relaxes toward the vector-space mean of its
//! four neighbours, is kicked by thermal noise, and can be pulled by a
//! pointer or rotated globally.
//!
//! Two grids share one shape:
//!
//! ```text
//! TargetGrid  ── physics tick every (11 - speed) frames ──┐
//!    │                                                     │ Jacobi step
//!    └─ display chases target every frame (0.1 + 0.9·T) ──► DisplayGrid ──► arrows
//! ```
//!
//! A held rotation gesture suspends the physics and shifts both grids by the
//! same angle: neighbour-relative phases, and so the pattern, are unchanged.
//!
//! ## Usage
//!
//! ```no_run
//! use xy_phase_sim::prelude::*;
//!
//! let viewport = Viewport { width: 800.0, height: 600.0, cell_size: 24.0 };
//! let mut sim = Simulation::new(SimConfig::default(), viewport).unwrap();
//! sim.set_temperature(0.05).unwrap();
//! for frame in 0..600 {
//!     sim.frame(frame as f64 * 1000.0 / 60.0);
//! }
//! for arrow in sim.arrows() {
//!     println!("{:?} -> {:?}", arrow.tail, arrow.tip);
//! }
//! ```

pub mod angle;
pub mod config;
pub mod error;
pub mod interaction;
pub mod noise;
pub mod params;
pub mod physics;
pub mod render;
pub mod simulation;
pub mod torus;

pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::error::{XyError, XyResult};
    pub use crate::interaction::{InteractionState, RotationState};
    pub use crate::params::SimulationParameters;
    pub use crate::physics::{StepInputs, StepReport};
    pub use crate::render::{Arrow, ArrowStyle};
    pub use crate::simulation::{FrameOutcome, Simulation};
    pub use crate::torus::{GridShape, PhaseGrid, Viewport};
}
