//! Harmonic oscillation of a single point.

use std::f64::consts::TAU;

/// A harmonic oscillating motion.
///
/// Only the frequency is stored; period and angular speed are derived.
/// Frequency must be positive: a zero frequency yields infinities/NaNs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    /// Amplitude ŷ (meters)
    amplitude_m: f64,
    /// Frequency f (Hz)
    frequency_hz: f64,
    /// Initial phase φ₀ (radians, not normalized)
    phase_rad: f64,
}

/// Position, velocity and acceleration sampled at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub time_s: f64,
    pub displacement_m: f64,
    pub velocity_m_per_s: f64,
    pub acceleration_m_per_s2: f64,
}

impl Oscillation {
    /// Create an oscillation from amplitude and frequency.
    pub fn from_frequency(amplitude_m: f64, frequency_hz: f64) -> Self {
        Self {
            amplitude_m,
            frequency_hz,
            phase_rad: 0.0,
        }
    }

    /// Create an oscillation from amplitude and period.
    pub fn from_period(amplitude_m: f64, period_s: f64) -> Self {
        Self::from_frequency(amplitude_m, 1.0 / period_s)
    }

    /// Create an oscillation from amplitude and angular speed.
    pub fn from_angular_speed(amplitude_m: f64, angular_speed: f64) -> Self {
        Self::from_frequency(amplitude_m, angular_speed / TAU)
    }

    /// Builder-style phase offset.
    pub fn with_phase(mut self, phase_rad: f64) -> Self {
        self.phase_rad = phase_rad;
        self
    }

    pub fn set_phase(&mut self, phase_rad: f64) {
        self.phase_rad = phase_rad;
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude_m
    }

    pub fn frequency(&self) -> f64 {
        self.frequency_hz
    }

    pub fn phase(&self) -> f64 {
        self.phase_rad
    }

    /// Period T = 1/f (seconds).
    pub fn period(&self) -> f64 {
        1.0 / self.frequency_hz
    }

    /// Angular speed ω = 2πf (1/s).
    pub fn angular_speed(&self) -> f64 {
        TAU * self.frequency_hz
    }

    /// Peak velocity v̂ = ŷω.
    pub fn peak_velocity(&self) -> f64 {
        self.amplitude_m * self.angular_speed()
    }

    /// Peak acceleration â = ŷω².
    pub fn peak_acceleration(&self) -> f64 {
        self.amplitude_m * self.angular_speed().powi(2)
    }

    /// Displacement y(t) = ŷ·sin(ωt + φ₀).
    pub fn displacement(&self, t: f64) -> f64 {
        self.amplitude_m * (self.angular_speed() * t + self.phase_rad).sin()
    }

    /// Velocity v(t) = ŷω·cos(ωt + φ₀).
    pub fn velocity(&self, t: f64) -> f64 {
        self.peak_velocity() * (self.angular_speed() * t + self.phase_rad).cos()
    }

    /// Acceleration a(t) = -ŷω²·sin(ωt + φ₀).
    pub fn acceleration(&self, t: f64) -> f64 {
        -self.peak_acceleration() * (self.angular_speed() * t + self.phase_rad).sin()
    }

    /// Sample all three equations of motion at `t`.
    pub fn state_at(&self, t: f64) -> MotionState {
        MotionState {
            time_s: t,
            displacement_m: self.displacement(t),
            velocity_m_per_s: self.velocity(t),
            acceleration_m_per_s2: self.acceleration(t),
        }
    }
}
