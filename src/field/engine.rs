//! Wave field engine: active sources, causal superposition, async distances.

use std::time::Duration;

use tracing::{debug, trace};

use super::distances::{DistanceWorker, RecomputeRequest, WaveId};
use super::lattice::Lattice;
use crate::error::{FieldError, Result};
use crate::model::Wave;

/// A wave bound to a source oscillator and an activation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveWave {
    pub id: WaveId,
    /// Lattice index of the source oscillator
    pub source: usize,
    pub wave: Wave,
    /// Time the wave starts spreading (seconds)
    pub t0: f64,
}

/// Owns a lattice and the waves travelling across it.
///
/// `advance` is meant for a fixed-rate render loop and never waits on the
/// background worker. Distances for a newly activated wave become visible a
/// few frames later; until then the wave contributes nothing.
pub struct WaveField {
    lattice: Lattice,
    waves: Vec<ActiveWave>,
    next_wave_id: u64,
    /// Generation of the most recent recompute request
    requested_generation: u64,
    worker: DistanceWorker,
}

impl WaveField {
    /// Take ownership of a lattice and start its distance worker.
    pub fn new(lattice: Lattice) -> Result<Self> {
        let worker = DistanceWorker::spawn(lattice.positions())?;
        Ok(Self {
            lattice,
            waves: Vec::new(),
            next_wave_id: 0,
            requested_generation: 0,
            worker,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Active waves in activation order.
    pub fn active_waves(&self) -> &[ActiveWave] {
        &self.waves
    }

    pub fn is_active(&self, source: usize) -> bool {
        self.waves.iter().any(|w| w.source == source)
    }

    /// Start a wave at `source`, beginning at `at_time`.
    ///
    /// Returns `Ok(None)` without changing anything if the source already
    /// has an active wave.
    pub fn activate(
        &mut self,
        source: usize,
        wave: Wave,
        at_time: f64,
    ) -> Result<Option<WaveId>> {
        if source >= self.lattice.len() {
            return Err(FieldError::PointOutOfRange {
                index: source,
                len: self.lattice.len(),
            });
        }
        if self.is_active(source) {
            return Ok(None);
        }

        let id = WaveId(self.next_wave_id);
        self.next_wave_id += 1;
        self.waves.push(ActiveWave {
            id,
            source,
            wave,
            t0: at_time,
        });
        debug!(source, wave_id = id.0, t0 = at_time, "activated wave");

        self.schedule_recompute();
        Ok(Some(id))
    }

    /// Stop the wave at `source`. Returns the removed wave's id, if any.
    pub fn deactivate(&mut self, source: usize) -> Option<WaveId> {
        let position = self.waves.iter().position(|w| w.source == source)?;
        let removed = self.waves.remove(position);
        debug!(source, wave_id = removed.id.0, "deactivated wave");

        self.schedule_recompute();
        Some(removed.id)
    }

    /// Stop every wave. Returns how many were active.
    pub fn deactivate_all(&mut self) -> usize {
        let count = self.waves.len();
        if count > 0 {
            self.waves.clear();
            debug!(count, "deactivated all waves");
            self.schedule_recompute();
        }
        count
    }

    /// Recompute every oscillator's displacement at `current_time`.
    ///
    /// Each wave contributes zero at points its front has not reached yet and
    /// at points whose installed distances do not cover it.
    pub fn advance(&mut self, current_time: f64) {
        self.adopt_published();

        let waves = &self.waves;
        for point in self.lattice.points_mut() {
            let distances = point.distances();
            let displacement: f64 = waves
                .iter()
                .map(|active| match distances.get(active.id) {
                    Some(d) => active.wave.contribution(d, current_time - active.t0),
                    None => 0.0,
                })
                .sum();
            point.set_displacement(displacement);
        }
    }

    /// Current displacement of the oscillator at `index`.
    pub fn displacement_of(&self, index: usize) -> Option<f64> {
        self.lattice.displacement(index)
    }

    /// Whether the installed distances reflect the latest source set.
    pub fn distances_settled(&self) -> bool {
        self.lattice.distance_generation() == self.requested_generation
    }

    /// Block until the latest recompute has been published and install it.
    ///
    /// For headless runs and tests; a render loop should rely on `advance`
    /// picking tables up as they arrive.
    pub fn sync_distances(&mut self, timeout: Duration) -> Result<()> {
        if self.distances_settled() {
            return Ok(());
        }
        if let Some(table) = self.worker.wait_for(self.requested_generation, timeout)? {
            self.lattice.install_distances(table);
        }
        Ok(())
    }

    fn schedule_recompute(&mut self) {
        self.requested_generation += 1;
        self.worker.submit(RecomputeRequest {
            generation: self.requested_generation,
            sources: self.waves.iter().map(|w| (w.id, w.source)).collect(),
        });
    }

    fn adopt_published(&mut self) {
        if let Some(table) = self.worker.try_take() {
            let generation = table.generation();
            if self.lattice.install_distances(table) {
                trace!(generation, "installed distance table");
            }
        }
    }
}
