//! The owned simulation object and its per-frame driver.
//!
//! The host calls [`Simulation::frame`] once per display refresh with a
//! monotonic timestamp. Each call runs exactly one of:
//!
//! - **rotation**: the gesture is held, so both grids are shifted by the same
//!   frame-rate normalised increment and nothing else happens;
//! - **relaxation**: on tick boundaries (`frame % (11 - speed) == 0`) the
//!   physics step runs, then the display grid chases the target grid.
//!
//! UI callbacks (`pointer_*`, `set_*`, `start_rotation`, ...) only flip flags
//! or parameters; grids change inside `frame`, `tick`, `reset` and `resize`.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::error::XyResult;
use crate::interaction::{InteractionState, RotationState};
use crate::params::SimulationParameters;
use crate::physics::{self, StepInputs, StepReport};
use crate::render::{self, Arrow, ArrowStyle};
use crate::torus::{GridShape, PhaseGrid, Viewport};

/// What a single `frame` call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Loop is paused; nothing changed.
    Paused,
    /// Global rotation applied to both grids.
    Rotated { increment: f64 },
    /// Display interpolated; `tick` is set when physics ran this frame.
    Interpolated { tick: Option<StepReport> },
}

impl FrameOutcome {
    pub fn ticked(&self) -> bool {
        matches!(self, FrameOutcome::Interpolated { tick: Some(_) })
    }
}

/// Target grid, display grid, parameters and interaction state for one canvas.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    params: SimulationParameters,
    viewport: Viewport,
    target: PhaseGrid,
    display: PhaseGrid,
    snapshot: PhaseGrid,
    interaction: InteractionState,
    rotation: RotationState,
    style: ArrowStyle,
    rng: StdRng,
    /// Relaxation frames seen, drives tick gating.
    frames: u64,
    ticks: u64,
    paused: bool,
    last_frame_ms: Option<f64>,
}

impl Simulation {
    /// Validate `config`, size the lattice from `viewport` and fill it with
    /// random angles.
    ///
    /// `viewport.cell_size` is authoritative for sizing, physics and drawing;
    /// `config.cell_size` is only the value hosts use to build that viewport.
    pub fn new(config: SimConfig, viewport: Viewport) -> XyResult<Self> {
        config.validate()?;
        let shape = GridShape::from_viewport(&viewport)?;
        let params = SimulationParameters::new(config.speed, config.temperature)?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let target = PhaseGrid::random(shape, &mut rng);
        info!(
            "phase lattice {}x{} ({} sites), cell {}px",
            shape.width(),
            shape.height(),
            shape.num_sites(),
            viewport.cell_size
        );

        Ok(Self {
            params,
            viewport,
            display: target.clone(),
            snapshot: target.clone(),
            target,
            interaction: InteractionState::default(),
            rotation: RotationState::new(config.rotation_step),
            style: ArrowStyle::from_config(&config),
            rng,
            frames: 0,
            ticks: 0,
            paused: false,
            last_frame_ms: None,
            config,
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Re-derive the lattice from a new viewport.
    ///
    /// Returns `Ok(true)` when the dimensions changed and both grids were
    /// reinitialised. On error the previous grids and viewport are kept.
    pub fn resize(&mut self, viewport: Viewport) -> XyResult<bool> {
        let shape = match GridShape::from_viewport(&viewport) {
            Ok(shape) => shape,
            Err(e) => {
                let kept = self.shape();
                warn!(
                    "resize rejected, keeping {}x{}: {e}",
                    kept.width(),
                    kept.height()
                );
                return Err(e);
            }
        };
        self.viewport = viewport;
        if shape == self.shape() {
            return Ok(false);
        }
        info!("lattice resized to {}x{}", shape.width(), shape.height());
        self.reinitialize(shape);
        Ok(true)
    }

    /// Fresh independent uniform angles over the current dimensions.
    pub fn reset(&mut self) {
        info!("lattice reset");
        self.reinitialize(self.shape());
    }

    fn reinitialize(&mut self, shape: GridShape) {
        self.target = PhaseGrid::random(shape, &mut self.rng);
        self.display = self.target.clone();
        self.snapshot = self.target.clone();
    }

    /// Stop ticking and interpolating until [`Simulation::resume`].
    pub fn pause(&mut self) {
        if !self.paused {
            debug!("paused after {} ticks", self.ticks);
        }
        self.paused = true;
    }

    /// Resume at `now_ms`. The elapsed-time baseline restarts here, so no
    /// backlog of skipped time or ticks is applied.
    pub fn resume(&mut self, now_ms: f64) {
        if self.paused {
            debug!("resumed");
        }
        self.paused = false;
        self.last_frame_ms = Some(now_ms);
    }

    // ── Per-frame driver ────────────────────────────────────────────────

    /// Advance one display refresh at monotonic time `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.paused {
            return FrameOutcome::Paused;
        }
        let elapsed = self
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_frame_ms = Some(now_ms);

        if self.rotation.is_active() {
            let increment = self.rotation.increment(elapsed);
            self.rotate(increment);
            return FrameOutcome::Rotated { increment };
        }

        self.frames += 1;
        let tick = if self.frames % self.params.tick_interval() == 0 {
            Some(self.tick())
        } else {
            None
        };
        self.interpolate();
        FrameOutcome::Interpolated { tick }
    }

    /// One physics step on the target grid, regardless of gating.
    pub fn tick(&mut self) -> StepReport {
        let inputs = StepInputs {
            lerp: self.config.physics_lerp,
            temperature: self.params.temperature(),
            interaction: &self.interaction,
            cell_size: self.viewport.cell_size,
            radius: self.config.interaction_radius_cells * self.viewport.cell_size,
        };
        let report = physics::step(&mut self.target, &mut self.snapshot, &inputs, &mut self.rng);
        self.ticks += 1;
        report
    }

    /// Chase the display grid toward the target grid once.
    pub fn interpolate(&mut self) {
        let factor = render::render_lerp(
            self.config.render_lerp_base,
            self.config.render_lerp_gain,
            self.params.temperature(),
        );
        render::interpolate(&mut self.display, &self.target, factor);
    }

    /// Uniform phase shift of both grids.
    pub fn rotate(&mut self, delta: f64) {
        self.target.rotate(delta);
        self.display.rotate(delta);
        if self.config.normalize_on_rotation {
            self.target.normalize();
            self.display.normalize();
        }
    }

    // ── UI-facing flags and parameters ──────────────────────────────────

    pub fn set_speed(&mut self, speed: u32) {
        self.params.set_speed(speed);
    }

    pub fn set_temperature(&mut self, temperature: f64) -> XyResult<()> {
        self.params.set_temperature(temperature)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let extent = self.extent();
        self.interaction.press(x, y, extent);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let extent = self.extent();
        self.interaction.move_to(x, y, extent);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.end();
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.end();
    }

    pub fn start_rotation(&mut self) {
        self.rotation.start();
    }

    /// Also the handler for focus loss and pointer-leave on the control.
    pub fn stop_rotation(&mut self) {
        self.rotation.stop();
    }

    // ── Read access ─────────────────────────────────────────────────────

    /// Arrows for the display grid, the only field that is ever drawn.
    pub fn arrows(&self) -> impl Iterator<Item = Arrow> + '_ {
        render::arrows(&self.display, self.viewport.cell_size, &self.style)
    }

    pub fn target(&self) -> &PhaseGrid {
        &self.target
    }

    pub fn display(&self) -> &PhaseGrid {
        &self.display
    }

    pub fn shape(&self) -> GridShape {
        self.target.shape()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn extent(&self) -> (f64, f64) {
        (self.viewport.width, self.viewport.height)
    }

    pub fn cell_size(&self) -> f64 {
        self.viewport.cell_size
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_active()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Physics steps run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
