//! Wave Lab library - harmonic waves spreading across a plane of oscillators

pub mod cli;
pub mod error;
pub mod field;
pub mod model;
pub mod params;
pub mod report;
