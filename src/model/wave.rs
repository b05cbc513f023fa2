//! Transverse wave: an oscillation that propagates through space.

use std::f64::consts::TAU;

use super::Oscillation;

/// A transverse wave model.
///
/// Stores the wavelength; the propagation speed is derived via `c = λ·f`.
/// Wavelength and frequency must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    oscillation: Oscillation,
    /// Wavelength λ (meters)
    wavelength_m: f64,
}

impl Wave {
    /// Create a wave from its source oscillation and wavelength.
    pub fn from_wavelength(oscillation: Oscillation, wavelength_m: f64) -> Self {
        Self {
            oscillation,
            wavelength_m,
        }
    }

    /// Create a wave from its source oscillation and propagation speed.
    pub fn from_speed(oscillation: Oscillation, speed_m_per_s: f64) -> Self {
        Self::from_wavelength(oscillation, speed_m_per_s / oscillation.frequency())
    }

    pub fn oscillation(&self) -> &Oscillation {
        &self.oscillation
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength_m
    }

    /// Propagation speed c = λ·f (m/s).
    pub fn speed(&self) -> f64 {
        self.wavelength_m * self.oscillation.frequency()
    }

    /// Wave number k = 2π/λ (rad/m).
    pub fn wave_number(&self) -> f64 {
        TAU / self.wavelength_m
    }

    /// Whether the wavefront has travelled `distance_m` after `elapsed_s`.
    pub fn has_arrived(&self, distance_m: f64, elapsed_s: f64) -> bool {
        self.speed() * elapsed_s >= distance_m
    }

    /// Displacement this wave causes at `distance_m` from its source,
    /// `elapsed_s` seconds after the source started.
    ///
    /// Zero until the wavefront arrives; afterwards `ŷ·sin(ω·t − k·d)`.
    /// The source's phase offset φ₀ does not enter the field.
    pub fn contribution(&self, distance_m: f64, elapsed_s: f64) -> f64 {
        if !self.has_arrived(distance_m, elapsed_s) {
            return 0.0;
        }

        let phase = self.oscillation.angular_speed() * elapsed_s - self.wave_number() * distance_m;
        self.oscillation.amplitude() * phase.sin()
    }
}
