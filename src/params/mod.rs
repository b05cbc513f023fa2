//! Parameter definitions with physical units and documented semantics.
//!
//! Defaults reproduce the two classic experiments:
//! - a single oscillator (2 cm amplitude at 0.5 Hz)
//! - a 30×30 oscillator plane carrying 0.6 Hz waves at 0.9 m/s

mod field;
mod playback;
mod wave;

// Re-export all types
pub use field::LatticeConfig;
pub use playback::PlaybackConfig;
pub use wave::{OscillationConfig, WaveConfig};
