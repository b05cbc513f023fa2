//! Error types for the wave field engine.

use std::time::Duration;

use thiserror::Error;

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors surfaced by the lattice, the engine and configuration.
///
/// Numeric preconditions of the models (zero frequency, zero wavelength) are
/// not represented here: they are the caller's responsibility.
#[derive(Error, Debug)]
pub enum FieldError {
    /// Lattice dimensions or spacing are unusable.
    #[error("Invalid lattice configuration: {0}")]
    InvalidLattice(String),

    /// Wave or oscillation parameters are unusable.
    #[error("Invalid wave configuration: {0}")]
    InvalidWave(String),

    /// Headless playback settings are unusable.
    #[error("Invalid playback configuration: {0}")]
    InvalidPlayback(String),

    /// An oscillator index does not exist in the lattice.
    #[error("Oscillator index {index} is outside the lattice ({len} points)")]
    PointOutOfRange { index: usize, len: usize },

    /// The background distance worker did not publish in time.
    #[error("Distance recomputation did not settle within {0:?}")]
    RecomputeTimeout(Duration),

    /// The background distance worker could not be started.
    #[error("Failed to spawn distance worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),
}

impl FieldError {
    /// Create an invalid lattice error.
    pub fn lattice(msg: impl Into<String>) -> Self {
        Self::InvalidLattice(msg.into())
    }

    /// Create an invalid wave error.
    pub fn wave(msg: impl Into<String>) -> Self {
        Self::InvalidWave(msg.into())
    }

    /// Create an invalid playback error.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::InvalidPlayback(msg.into())
    }
}
