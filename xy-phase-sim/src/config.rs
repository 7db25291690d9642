//! Static simulation configuration.
//!
//! Everything here is fixed for the lifetime of a `Simulation`. The live
//! knobs (speed, temperature) start from `speed` / `temperature` below and
//! are then owned by [`crate::params::SimulationParameters`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{XyError, XyResult};

/// Runtime configuration for the phase lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Cell edge length in canvas pixels that hosts put into the `Viewport`
    /// they hand to `Simulation`. The library itself sizes from the viewport.
    pub cell_size: f64,

    /// Fraction of the way a site moves toward its neighbour alignment per tick.
    /// Default: 0.2.
    pub physics_lerp: f64,

    /// Render interpolation factor at zero temperature.
    /// Default: 0.1.
    pub render_lerp_base: f64,

    /// Extra render interpolation per unit temperature.
    /// Default: 0.9, so the factor spans `[0.1, 1.0]`.
    pub render_lerp_gain: f64,

    /// Override radius around the pointer, in cells. Default: 1.5.
    pub interaction_radius_cells: f64,

    /// Global rotation per 60 Hz frame (radians).
    pub rotation_step: f64,

    /// Arrow shaft length as a fraction of the cell size.
    pub arrow_length: f64,

    /// Arrowhead barb length as a fraction of the cell size.
    pub arrowhead_length: f64,

    /// Barb angle either side of the shaft, in degrees.
    pub arrowhead_angle_deg: f64,

    /// Initial tick-rate control, 1..=10.
    pub speed: u32,

    /// Initial noise amplitude, 0..=1.
    pub temperature: f64,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Colour arrows by phase hue; `false` draws monochrome.
    pub hue_colouring: bool,

    /// Fold angles back into `[0, 2π)` after every global rotation step.
    pub normalize_on_rotation: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 24.0,
            physics_lerp: 0.2,
            render_lerp_base: 0.1,
            render_lerp_gain: 0.9,
            interaction_radius_cells: 1.5,
            rotation_step: 0.03,
            arrow_length: 0.8,
            arrowhead_length: 0.25,
            arrowhead_angle_deg: 30.0,
            speed: 5,
            temperature: 0.1,
            seed: None,
            hue_colouring: true,
            normalize_on_rotation: true,
        }
    }
}

impl SimConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> XyResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(XyError::Config(format!(
                "cell_size must be finite and > 0, got {}",
                self.cell_size
            )));
        }
        if !(self.physics_lerp > 0.0 && self.physics_lerp <= 1.0) {
            return Err(XyError::Config(format!(
                "physics_lerp must be in (0, 1], got {}",
                self.physics_lerp
            )));
        }
        if !(0.0..=1.0).contains(&self.render_lerp_base) {
            return Err(XyError::Config(format!(
                "render_lerp_base must be in [0, 1], got {}",
                self.render_lerp_base
            )));
        }
        let top = self.render_lerp_base + self.render_lerp_gain;
        if !(self.render_lerp_gain >= 0.0 && top <= 1.0 + 1e-9) {
            return Err(XyError::Config(format!(
                "render_lerp_base + render_lerp_gain must stay within [0, 1], got {} + {}",
                self.render_lerp_base, self.render_lerp_gain
            )));
        }
        if !self.interaction_radius_cells.is_finite() || self.interaction_radius_cells < 0.0 {
            return Err(XyError::Config(format!(
                "interaction_radius_cells must be finite and >= 0, got {}",
                self.interaction_radius_cells
            )));
        }
        if !self.rotation_step.is_finite() {
            return Err(XyError::Config(format!(
                "rotation_step must be finite, got {}",
                self.rotation_step
            )));
        }
        if !(self.arrow_length > 0.0 && self.arrowhead_length >= 0.0) {
            return Err(XyError::Config(format!(
                "arrow_length must be > 0 and arrowhead_length >= 0, got {} / {}",
                self.arrow_length, self.arrowhead_length
            )));
        }
        if !(0.0..=90.0).contains(&self.arrowhead_angle_deg) {
            return Err(XyError::Config(format!(
                "arrowhead_angle_deg must be in [0, 90], got {}",
                self.arrowhead_angle_deg
            )));
        }
        if !(1..=10).contains(&self.speed) {
            return Err(XyError::Config(format!(
                "speed must be in [1, 10], got {}",
                self.speed
            )));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(XyError::Config(format!(
                "temperature must be in [0, 1], got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Parse and validate from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> XyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> XyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
