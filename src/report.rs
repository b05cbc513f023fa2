//! Text summaries of a lattice for terminal output.

use crate::field::Lattice;
use crate::model::Oscillation;

/// Characters from deepest trough to highest crest
const HEIGHT_RAMP: &[char] = &['#', '=', '-', '.', ' ', '.', '+', '*', '@'];

/// Largest absolute displacement in the lattice
pub fn peak_displacement(lattice: &Lattice) -> f64 {
    lattice
        .points()
        .iter()
        .map(|p| p.displacement().abs())
        .fold(0.0, f64::max)
}

/// Render displacements as one text row per z line.
///
/// `scale_m` is the displacement mapped to the ends of the ramp; values
/// beyond it are clamped.
pub fn height_map(lattice: &Lattice, scale_m: f64) -> String {
    let top = (HEIGHT_RAMP.len() - 1) as f64;
    let mut out = String::with_capacity(lattice.len() + lattice.z_count());

    for row in lattice.points().chunks(lattice.x_count()) {
        for point in row {
            let normalized = if scale_m > 0.0 {
                (point.displacement() / scale_m).clamp(-1.0, 1.0)
            } else {
                0.0
            };
            let slot = ((normalized + 1.0) / 2.0 * top).round() as usize;
            out.push(HEIGHT_RAMP[slot.min(HEIGHT_RAMP.len() - 1)]);
        }
        out.push('\n');
    }
    out
}

/// One table row per sample across a full period: t, y, v, a
pub fn motion_table(oscillation: &Oscillation, samples: usize) -> String {
    let mut out = format!(
        "{:>10} {:>12} {:>12} {:>12}\n",
        "t [s]", "y [m]", "v [m/s]", "a [m/s²]"
    );
    let samples = samples.max(1);
    let step = oscillation.period() / samples as f64;

    for i in 0..=samples {
        let state = oscillation.state_at(i as f64 * step);
        out.push_str(&format!(
            "{:>10.4} {:>12.5} {:>12.5} {:>12.5}\n",
            state.time_s,
            state.displacement_m,
            state.velocity_m_per_s,
            state.acceleration_m_per_s2
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_lattice_renders_blank() {
        let lattice = Lattice::new(4, 2, 1.0).unwrap();
        assert_eq!(height_map(&lattice, 1.0), "    \n    \n");
        assert_eq!(peak_displacement(&lattice), 0.0);
    }

    #[test]
    fn test_extremes_use_ramp_ends() {
        let mut lattice = Lattice::new(3, 1, 1.0).unwrap();
        lattice.set_displacement(0, -2.0).unwrap();
        lattice.set_displacement(2, 0.5).unwrap();

        assert_eq!(height_map(&lattice, 0.5), "# @\n");
        assert_eq!(peak_displacement(&lattice), 2.0);
    }

    #[test]
    fn test_motion_table_rows() {
        let osc = Oscillation::from_frequency(0.02, 0.5);
        let table = motion_table(&osc, 4);
        // Header plus samples + 1 rows
        assert_eq!(table.lines().count(), 6);
    }
}
