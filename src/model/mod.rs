//! Value models for oscillations and waves.

mod oscillation;
mod wave;

pub use oscillation::{MotionState, Oscillation};
pub use wave::Wave;
