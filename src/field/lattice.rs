//! Lattice of point oscillators on the x-z plane.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;

use super::distances::{DistanceCache, DistanceTable};
use crate::error::{FieldError, Result};

/// Vertex data for one oscillator (x, displacement, z) ready for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

/// A single oscillator in the lattice.
#[derive(Debug, Clone)]
pub struct OscillatorPoint {
    /// Fixed planar position (x, z)
    position: DVec2,
    /// Current vertical displacement (meters)
    displacement: f64,
    /// Distances to the sources of one published wave snapshot
    distances: DistanceCache,
}

impl OscillatorPoint {
    fn new(position: DVec2) -> Self {
        Self {
            position,
            displacement: 0.0,
            distances: DistanceCache::default(),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn distances(&self) -> &DistanceCache {
        &self.distances
    }

    pub(crate) fn set_displacement(&mut self, displacement: f64) {
        self.displacement = displacement;
    }
}

/// Grid of oscillators, identified by row-major index (`z * x_count + x`).
#[derive(Debug, Clone)]
pub struct Lattice {
    points: Vec<OscillatorPoint>,
    x_count: usize,
    z_count: usize,
    spacing_m: f64,
    /// Generation of the distance table currently installed
    distance_generation: u64,
}

impl Lattice {
    /// Create an `x_count × z_count` lattice centred at the origin.
    ///
    /// # Arguments
    /// * `x_count` - Oscillators along the x-axis
    /// * `z_count` - Oscillators along the z-axis
    /// * `spacing_m` - Distance between neighbouring oscillator centres
    pub fn new(x_count: usize, z_count: usize, spacing_m: f64) -> Result<Self> {
        if x_count == 0 || z_count == 0 {
            return Err(FieldError::lattice(format!(
                "dimensions must be non-zero, got {}x{}",
                x_count, z_count
            )));
        }
        if !spacing_m.is_finite() || spacing_m <= 0.0 {
            return Err(FieldError::lattice(format!(
                "spacing must be positive and finite, got {}",
                spacing_m
            )));
        }

        let count = x_count.checked_mul(z_count).ok_or_else(|| {
            FieldError::lattice(format!("{}x{} points overflow usize", x_count, z_count))
        })?;

        // Offsets that put the grid's centre at the origin
        let x_half = (x_count - 1) as f64 * spacing_m / 2.0;
        let z_half = (z_count - 1) as f64 * spacing_m / 2.0;

        let mut points = Vec::with_capacity(count);
        for z in 0..z_count {
            for x in 0..x_count {
                let position = DVec2::new(
                    x as f64 * spacing_m - x_half,
                    z as f64 * spacing_m - z_half,
                );
                points.push(OscillatorPoint::new(position));
            }
        }

        Ok(Self {
            points,
            x_count,
            z_count,
            spacing_m,
            distance_generation: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_count(&self) -> usize {
        self.x_count
    }

    pub fn z_count(&self) -> usize {
        self.z_count
    }

    pub fn spacing(&self) -> f64 {
        self.spacing_m
    }

    /// Points in stable index order.
    pub fn points(&self) -> &[OscillatorPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&OscillatorPoint> {
        self.points.get(index)
    }

    pub fn position(&self, index: usize) -> Option<DVec2> {
        self.points.get(index).map(|p| p.position)
    }

    pub fn displacement(&self, index: usize) -> Option<f64> {
        self.points.get(index).map(|p| p.displacement)
    }

    pub fn set_displacement(&mut self, index: usize, displacement: f64) -> Result<()> {
        self.point_mut(index)?.displacement = displacement;
        Ok(())
    }

    pub fn distances(&self, index: usize) -> Option<&DistanceCache> {
        self.points.get(index).map(|p| &p.distances)
    }

    /// Replace a point's distance cache wholesale.
    pub fn set_distances(&mut self, index: usize, distances: DistanceCache) -> Result<()> {
        self.point_mut(index)?.distances = distances;
        Ok(())
    }

    /// Index of the oscillator at grid coordinates (x, z).
    pub fn index_of(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.x_count && z < self.z_count).then(|| z * self.x_count + x)
    }

    /// Grid coordinates (x, z) of an index.
    pub fn coordinates(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.len()).then(|| (index % self.x_count, index / self.x_count))
    }

    /// All positions in index order.
    pub fn positions(&self) -> Vec<DVec2> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Snapshot of every oscillator as (x, displacement, z) vertices.
    pub fn vertices(&self) -> Vec<PointVertex> {
        self.points
            .iter()
            .map(|p| PointVertex {
                position: [
                    p.position.x as f32,
                    p.displacement as f32,
                    p.position.y as f32,
                ],
            })
            .collect()
    }

    pub(crate) fn distance_generation(&self) -> u64 {
        self.distance_generation
    }

    /// Install a complete table, one cache per point.
    ///
    /// Tables older than the installed one, or built for a different lattice
    /// size, are ignored. Returns whether the table was installed.
    pub(crate) fn install_distances(&mut self, table: DistanceTable) -> bool {
        if table.generation() <= self.distance_generation || table.len() != self.points.len() {
            return false;
        }

        self.distance_generation = table.generation();
        for (point, cache) in self.points.iter_mut().zip(table.into_caches()) {
            point.distances = cache;
        }
        true
    }

    pub(crate) fn points_mut(&mut self) -> &mut [OscillatorPoint] {
        &mut self.points
    }

    fn point_mut(&mut self, index: usize) -> Result<&mut OscillatorPoint> {
        let len = self.points.len();
        self.points
            .get_mut(index)
            .ok_or(FieldError::PointOutOfRange { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::distances::WaveId;

    #[test]
    fn test_lattice_creation() {
        let lattice = Lattice::new(30, 20, 0.06).unwrap();
        assert_eq!(lattice.len(), 600);
        assert!(lattice.points().iter().all(|p| p.displacement() == 0.0));
        assert!(lattice.points().iter().all(|p| p.distances().is_empty()));
    }

    #[test]
    fn test_lattice_is_centred() {
        let lattice = Lattice::new(3, 3, 1.0).unwrap();
        assert_eq!(lattice.position(4), Some(DVec2::ZERO));
        assert_eq!(lattice.position(0), Some(DVec2::new(-1.0, -1.0)));
        assert_eq!(lattice.position(8), Some(DVec2::new(1.0, 1.0)));

        let even = Lattice::new(4, 2, 2.0).unwrap();
        let centroid = even
            .positions()
            .iter()
            .fold(DVec2::ZERO, |acc, p| acc + *p)
            / even.len() as f64;
        assert!(centroid.length() < 1e-12);
    }

    #[test]
    fn test_row_major_indexing() {
        let lattice = Lattice::new(4, 3, 0.5).unwrap();
        assert_eq!(lattice.index_of(1, 2), Some(9));
        assert_eq!(lattice.coordinates(9), Some((1, 2)));
        assert_eq!(lattice.index_of(4, 0), None);
        assert_eq!(lattice.coordinates(12), None);

        // x varies fastest
        let p0 = lattice.position(0).unwrap();
        let p1 = lattice.position(1).unwrap();
        assert!((p1.x - p0.x - 0.5).abs() < 1e-12);
        assert_eq!(p1.y, p0.y);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(matches!(
            Lattice::new(0, 3, 1.0),
            Err(FieldError::InvalidLattice(_))
        ));
        assert!(matches!(
            Lattice::new(3, 3, 0.0),
            Err(FieldError::InvalidLattice(_))
        ));
        assert!(matches!(
            Lattice::new(3, 3, f64::NAN),
            Err(FieldError::InvalidLattice(_))
        ));
    }

    #[test]
    fn test_overflowing_point_count_rejected() {
        assert!(matches!(
            Lattice::new(usize::MAX, 2, 1.0),
            Err(FieldError::InvalidLattice(_))
        ));
        assert!(matches!(
            Lattice::new(usize::MAX / 2 + 1, 2, 1.0),
            Err(FieldError::InvalidLattice(_))
        ));
    }

    #[test]
    fn test_displacement_access() {
        let mut lattice = Lattice::new(2, 2, 1.0).unwrap();
        lattice.set_displacement(3, 0.25).unwrap();
        assert_eq!(lattice.displacement(3), Some(0.25));
        assert_eq!(lattice.displacement(4), None);
        assert!(matches!(
            lattice.set_displacement(4, 1.0),
            Err(FieldError::PointOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_set_distances_replaces_cache() {
        let mut lattice = Lattice::new(2, 1, 1.0).unwrap();
        let cache = DistanceCache::from_entries(vec![(WaveId(1), 0.5), (WaveId(2), 1.5)]);
        lattice.set_distances(1, cache).unwrap();
        assert_eq!(lattice.distances(1).unwrap().get(WaveId(2)), Some(1.5));

        lattice
            .set_distances(1, DistanceCache::from_entries(vec![(WaveId(3), 2.0)]))
            .unwrap();
        let cache = lattice.distances(1).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(WaveId(1)), None);
    }

    #[test]
    fn test_stale_tables_are_not_installed() {
        let mut lattice = Lattice::new(2, 1, 1.0).unwrap();
        let newer = DistanceTable::new(2, vec![DistanceCache::default(); 2]);
        let older = DistanceTable::new(1, vec![DistanceCache::default(); 2]);
        let wrong_size = DistanceTable::new(3, vec![DistanceCache::default(); 5]);

        assert!(lattice.install_distances(newer));
        assert!(!lattice.install_distances(older));
        assert!(!lattice.install_distances(wrong_size));
        assert_eq!(lattice.distance_generation(), 2);
    }

    #[test]
    fn test_vertices_snapshot() {
        let mut lattice = Lattice::new(3, 1, 1.0).unwrap();
        lattice.set_displacement(2, 0.5).unwrap();

        let vertices = lattice.vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[2].position, [1.0, 0.5, 0.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 3 * 3 * 4);
    }
}
