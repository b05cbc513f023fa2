//! Wave field simulation over a lattice of point oscillators.

mod distances;
mod engine;
mod lattice;

// Re-export public types
pub use distances::{DistanceCache, DistanceTable, WaveId};
pub use engine::{ActiveWave, WaveField};
pub use lattice::{Lattice, OscillatorPoint, PointVertex};
