//! Oscillation and wave parameters.

use crate::error::{FieldError, Result};
use crate::model::{Oscillation, Wave};

/// Single oscillator parameters
#[derive(Debug, Clone)]
pub struct OscillationConfig {
    /// Amplitude ŷ (meters): maximum distance from equilibrium
    pub amplitude_m: f64,

    /// Frequency f (Hz): back-and-forth cycles per second
    pub frequency_hz: f64,

    /// Initial phase φ₀ (radians), 0 = standard sine start
    pub phase_rad: f64,
}

impl Default for OscillationConfig {
    fn default() -> Self {
        Self {
            amplitude_m: 0.02,
            frequency_hz: 0.5,
            phase_rad: 0.0,
        }
    }
}

impl OscillationConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        check_positive("amplitude", self.amplitude_m)?;
        check_positive("frequency", self.frequency_hz)?;
        if !self.phase_rad.is_finite() {
            return Err(FieldError::wave(format!(
                "phase must be finite, got {}",
                self.phase_rad
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Oscillation> {
        self.validate()?;
        let oscillation = Oscillation::from_frequency(self.amplitude_m, self.frequency_hz);
        Ok(oscillation.with_phase(self.phase_rad))
    }
}

/// Wave placed on a source oscillator
#[derive(Debug, Clone)]
pub struct WaveConfig {
    /// Source amplitude ŷ (meters)
    pub amplitude_m: f64,

    /// Source frequency f (Hz)
    pub frequency_hz: f64,

    /// Propagation speed c (m/s): distance the front travels per second
    pub speed_m_per_s: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude_m: 0.3,
            frequency_hz: 0.6,
            speed_m_per_s: 0.9,
        }
    }
}

impl WaveConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        check_positive("amplitude", self.amplitude_m)?;
        check_positive("frequency", self.frequency_hz)?;
        check_positive("propagation speed", self.speed_m_per_s)
    }

    /// Wavelength λ = c / f (meters)
    pub fn wavelength_m(&self) -> f64 {
        self.speed_m_per_s / self.frequency_hz
    }

    pub fn to_wave(&self) -> Result<Wave> {
        self.validate()?;
        let oscillation = Oscillation::from_frequency(self.amplitude_m, self.frequency_hz);
        Ok(Wave::from_speed(oscillation, self.speed_m_per_s))
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FieldError::wave(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wave() {
        let config = WaveConfig::default();
        let wave = config.to_wave().unwrap();
        assert!((wave.speed() - 0.9).abs() < 1e-12);
        assert!((wave.wavelength() - 1.5).abs() < 1e-12);
        assert!((config.wavelength_m() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let config = WaveConfig {
            frequency_hz: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.to_wave(), Err(FieldError::InvalidWave(_))));

        let config = OscillationConfig {
            frequency_hz: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_oscillation_keeps_phase() {
        let config = OscillationConfig {
            phase_rad: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        };
        let osc = config.build().unwrap();
        assert!((osc.displacement(0.0) - 0.02).abs() < 1e-12);
    }
}
