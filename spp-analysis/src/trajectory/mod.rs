use crate::{Error, Vector2D};

mod simulation_box;
pub use self::simulation_box::{SimulationBox, ImageConvention};

mod io;
pub use self::io::{read_trajectory, write_snapshot};

#[cfg(test)]
pub(crate) mod test_utils;

/// A `Trajectory` gives read-only access to the recorded snapshots of a
/// simulation.
///
/// All snapshots must contain the same number of particles, and share the
/// same simulation box.
pub trait Trajectory: Send + Sync {
    /// Get the periodic box containing the particles
    fn simulation_box(&self) -> SimulationBox;

    /// Get the number of snapshots in this trajectory
    fn len(&self) -> usize;

    /// Check if this trajectory does not contain any snapshot
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of particles in each snapshot
    fn particle_count(&self) -> usize;

    /// Get the positions of all particles in the snapshot at index `step`. The
    /// returned slice has length `self.particle_count()`.
    fn positions(&self, step: usize) -> Result<&[Vector2D], Error>;

    /// Get the velocities of all particles in the snapshot at index `step`,
    /// if they were recorded.
    fn velocities(&self, step: usize) -> Result<Option<&[Vector2D]>, Error>;
}

/// Positions (and optionally velocities) of all particles at a single time
/// step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    positions: Vec<Vector2D>,
    velocities: Option<Vec<Vector2D>>,
}

impl Snapshot {
    /// Create a snapshot containing only particle positions
    pub fn new(positions: Vec<Vector2D>) -> Snapshot {
        Snapshot {
            positions: positions,
            velocities: None,
        }
    }

    /// Create a snapshot containing both positions and velocities of the
    /// particles. Both vectors must have the same length.
    pub fn with_velocities(positions: Vec<Vector2D>, velocities: Vec<Vector2D>) -> Result<Snapshot, Error> {
        if positions.len() != velocities.len() {
            return Err(Error::InvalidParameter(format!(
                "got {} positions but {} velocities in the same snapshot",
                positions.len(), velocities.len()
            )));
        }

        Ok(Snapshot {
            positions: positions,
            velocities: Some(velocities),
        })
    }

    /// Get the number of particles in this snapshot
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if this snapshot does not contain any particle
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get the positions of the particles
    pub fn positions(&self) -> &[Vector2D] {
        &self.positions
    }

    /// Get the velocities of the particles, if any
    pub fn velocities(&self) -> Option<&[Vector2D]> {
        self.velocities.as_deref()
    }
}

/// A simple in-memory implementation of `Trajectory`
#[derive(Debug, Clone)]
pub struct SimpleTrajectory {
    simulation_box: SimulationBox,
    snapshots: Vec<Snapshot>,
}

impl SimpleTrajectory {
    /// Create a new empty trajectory inside the given box
    pub fn new(simulation_box: SimulationBox) -> SimpleTrajectory {
        SimpleTrajectory {
            simulation_box: simulation_box,
            snapshots: Vec::new(),
        }
    }

    /// Add a new snapshot at the end of this trajectory. The snapshot must
    /// contain the same number of particles as the existing ones.
    pub fn add_snapshot(&mut self, snapshot: Snapshot) -> Result<(), Error> {
        if let Some(first) = self.snapshots.first() {
            if first.len() != snapshot.len() {
                return Err(Error::InvalidParameter(format!(
                    "all snapshots must contain the same number of particles, \
                    expected {} but got {}", first.len(), snapshot.len()
                )));
            }
        }

        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Add a new snapshot containing only positions at the end of this
    /// trajectory.
    pub fn add_positions(&mut self, positions: Vec<Vector2D>) -> Result<(), Error> {
        self.add_snapshot(Snapshot::new(positions))
    }

    /// Get all the snapshots in this trajectory
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    fn snapshot(&self, step: usize) -> Result<&Snapshot, Error> {
        self.snapshots.get(step).ok_or(Error::SnapshotOutOfRange {
            step: step,
            length: self.snapshots.len(),
        })
    }
}

impl Trajectory for SimpleTrajectory {
    fn simulation_box(&self) -> SimulationBox {
        self.simulation_box
    }

    fn len(&self) -> usize {
        self.snapshots.len()
    }

    fn particle_count(&self) -> usize {
        self.snapshots.first().map_or(0, Snapshot::len)
    }

    fn positions(&self, step: usize) -> Result<&[Vector2D], Error> {
        Ok(self.snapshot(step)?.positions())
    }

    fn velocities(&self, step: usize) -> Result<Option<&[Vector2D]>, Error> {
        Ok(self.snapshot(step)?.velocities())
    }
}
