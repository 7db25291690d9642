//! Error hierarchy for the phase lattice.
//!
//! The numeric core is total: angles are unbounded reals and every
//! trigonometric call is defined everywhere. The only faults are
//! configuration faults caught at the sizing / parameter boundary.

use thiserror::Error;

/// Root error type for all lattice failures.
#[derive(Error, Debug)]
pub enum XyError {
    /// A lattice dimension came out as zero.
    #[error("invalid lattice shape {width}x{height}: both dimensions must be at least 1")]
    InvalidShape { width: usize, height: usize },

    /// The sizing provider handed over a non-finite, negative or degenerate viewport.
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    /// A live parameter (speed, temperature) was out of its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A config value failed validation.
    #[error("config error: {0}")]
    Config(String),

    /// Config file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file was not valid JSON for `SimConfig`.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type XyResult<T> = Result<T, XyError>;
