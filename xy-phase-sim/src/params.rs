//! Live, externally settable simulation knobs.

use log::warn;

use crate::error::{XyError, XyResult};

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;

/// `speed` gates the physics cadence, `temperature` scales the thermal kick
/// and the render interpolation factor. Changing either never touches grid state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    speed: u32,
    temperature: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            speed: 5,
            temperature: 0.1,
        }
    }
}

impl SimulationParameters {
    /// Out-of-range inputs are clamped; NaN temperature is rejected.
    pub fn new(speed: u32, temperature: f64) -> XyResult<Self> {
        let mut p = Self::default();
        p.set_speed(speed);
        p.set_temperature(temperature)?;
        Ok(p)
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Clamp into `[1, 10]`.
    pub fn set_speed(&mut self, speed: u32) {
        let clamped = speed.clamp(MIN_SPEED, MAX_SPEED);
        if clamped != speed {
            warn!("speed {speed} out of range, clamped to {clamped}");
        }
        self.speed = clamped;
    }

    /// Clamp into `[0, 1]`. NaN leaves the current value in place.
    pub fn set_temperature(&mut self, temperature: f64) -> XyResult<()> {
        if temperature.is_nan() {
            return Err(XyError::InvalidParameter(
                "temperature must be a number".to_string(),
            ));
        }
        let clamped = temperature.clamp(0.0, 1.0);
        if clamped != temperature {
            warn!("temperature {temperature} out of range, clamped to {clamped}");
        }
        self.temperature = clamped;
        Ok(())
    }

    /// Physics runs once every `11 - speed` frames.
    pub fn tick_interval(&self) -> u64 {
        u64::from(MAX_SPEED + 1 - self.speed)
    }
}
