//! Lattice layout parameters.

use crate::error::{FieldError, Result};
use crate::field::Lattice;

/// Oscillator plane layout
#[derive(Debug, Clone)]
pub struct LatticeConfig {
    /// Oscillators along the x-axis (30 → 900 oscillators with the default z count)
    pub x_count: usize,

    /// Oscillators along the z-axis
    pub z_count: usize,

    /// Distance between neighbouring oscillator centres (meters)
    pub spacing_m: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            x_count: 30,
            z_count: 30,
            spacing_m: 0.06,
        }
    }
}

impl LatticeConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.x_count == 0 || self.z_count == 0 {
            return Err(FieldError::lattice(format!(
                "lattice needs at least one oscillator per axis, got {}x{}",
                self.x_count, self.z_count
            )));
        }
        if !(self.spacing_m.is_finite() && self.spacing_m > 0.0) {
            return Err(FieldError::lattice(format!(
                "spacing must be positive, got {} m",
                self.spacing_m
            )));
        }
        if self.x_count.checked_mul(self.z_count).is_none() {
            return Err(FieldError::lattice(format!(
                "{}x{} oscillators overflow usize",
                self.x_count, self.z_count
            )));
        }
        Ok(())
    }

    /// Total number of oscillators
    pub fn point_count(&self) -> usize {
        self.x_count.saturating_mul(self.z_count)
    }

    /// Side lengths of the plane (meters)
    pub fn extent_m(&self) -> (f64, f64) {
        (
            self.x_count.saturating_sub(1) as f64 * self.spacing_m,
            self.z_count.saturating_sub(1) as f64 * self.spacing_m,
        )
    }

    pub fn build(&self) -> Result<Lattice> {
        self.validate()?;
        Lattice::new(self.x_count, self.z_count, self.spacing_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lattice() {
        let config = LatticeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.point_count(), 900);

        let lattice = config.build().unwrap();
        assert_eq!(lattice.len(), 900);

        let (x, z) = config.extent_m();
        assert!((x - 29.0 * 0.06).abs() < 1e-12);
        assert_eq!(x, z);
    }

    #[test]
    fn test_invalid_spacing() {
        let config = LatticeConfig {
            spacing_m: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FieldError::InvalidLattice(_))
        ));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let config = LatticeConfig {
            x_count: usize::MAX,
            z_count: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FieldError::InvalidLattice(_))
        ));
        assert_eq!(config.point_count(), usize::MAX);
    }
}
