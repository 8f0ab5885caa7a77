use ndarray::Array2;

use crate::{Error, Vector2D, SimulationBox};

/// Maximal number of buckets along each axis, this prevents using too much
/// memory with a large box and a small cutoff
const MAX_BUCKETS_PER_AXIS: usize = 1000;

/// What to do with particles outside of `[-L_min, L_min)` when assigning them
/// to buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum OutOfBox {
    /// Replace the particle by its periodic image inside the box for the
    /// pair search
    #[default]
    Wrap,
    /// Fail the pair search with `Error::OutOfBox`
    Reject,
}

/// Where the second particle of a candidate pair was found, relative to the
/// bucket of the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// Both particles are in the same bucket
    SameBucket,
    /// The particles are in adjacent buckets
    NeighborBucket,
}

/// The spatial grid sorts the particles of one snapshot into square buckets
/// covering the simulation box.
///
/// Buckets are at least as large as the cutoff, so all pairs closer than the
/// cutoff (using periodic boundary conditions) are either in the same bucket
/// or in adjacent buckets. Candidate pairs are then produced by a half-stencil
/// sweep over the grid, visiting every pair of adjacent buckets only once.
///
/// The number of particles in each bucket is not bounded: very inhomogeneous
/// systems end up with a few crowded buckets, and the search becomes
/// quadratic in the number of particles in these buckets.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// particles inside each bucket, by index in the snapshot
    buckets: Array2<Vec<usize>>,
    /// box used to compute bucket coordinates
    simulation_box: SimulationBox,
    /// snapshot the particles come from
    step: usize,
    /// number of particles put in the box through the periodic boundaries
    wrapped: usize,
}

impl SpatialGrid {
    /// Create an empty grid for particles of snapshot `step`, using buckets
    /// large enough for the given `cutoff`.
    pub fn new(simulation_box: SimulationBox, cutoff: f64, step: usize) -> SpatialGrid {
        let l_min = simulation_box.min_half_length();
        let n_buckets = f64::floor(2.0 * l_min / cutoff) - 1.0;
        let n_buckets = f64::min(n_buckets, MAX_BUCKETS_PER_AXIS as f64);

        // with less than 3 buckets per axis, the periodic stencil would visit
        // the same pair of buckets more than once. Use a single bucket instead,
        // containing all particles
        let n_buckets = if n_buckets >= 3.0 { n_buckets as usize } else { 1 };

        SpatialGrid {
            buckets: Array2::from_elem((n_buckets, n_buckets), Vec::new()),
            simulation_box: simulation_box,
            step: step,
            wrapped: 0,
        }
    }

    /// Get the number of buckets along each axis
    pub fn size(&self) -> usize {
        self.buckets.nrows()
    }

    /// Get the number of particles which were outside of the box and wrapped
    /// back inside when added to this grid
    pub fn wrapped(&self) -> usize {
        self.wrapped
    }

    /// Get the indexes of the particles in the bucket at `[x, y]`
    pub fn bucket(&self, x: usize, y: usize) -> &[usize] {
        &self.buckets[[x, y]]
    }

    /// Add the particle at `index` with the given `position` to the bucket
    /// containing it, and return the position of the particle inside the
    /// box. This is `position` for particles inside the box, and the periodic
    /// image of `position` in the box for wrapped particles.
    pub fn add_particle(&mut self, index: usize, position: Vector2D, policy: OutOfBox) -> Result<Vector2D, Error> {
        if !position.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "particle {} at step {} does not have a finite position", index, self.step
            )));
        }

        let position = if self.simulation_box.contains(position) {
            position
        } else if policy == OutOfBox::Reject {
            return Err(Error::OutOfBox {
                particle: index,
                step: self.step,
                position: position,
            });
        } else {
            self.wrapped += 1;
            self.simulation_box.wrap_position(position)
        };

        let n_buckets = self.size();
        let l_min = self.simulation_box.min_half_length();
        let coordinate = |value: f64| {
            let bucket = f64::floor((value + l_min) * n_buckets as f64 / (2.0 * l_min)) as i64;
            // rounding errors can send particles right below L_min in the
            // bucket past the end
            bucket.clamp(0, n_buckets as i64 - 1) as usize
        };

        let bucket = [coordinate(position[0]), coordinate(position[1])];
        self.buckets[bucket].push(index);

        Ok(position)
    }

    /// Call `function` with all candidate pairs `(first, second,
    /// neighborhood)`. Each unordered pair of particles in the same or in
    /// adjacent buckets is visited exactly once. The order of the pairs only
    /// depends on the order in which particles were added to the grid.
    pub fn for_each_candidate(&self, mut function: impl FnMut(usize, usize, Neighborhood)) {
        let n_buckets = self.size();

        for ((x, y), current) in self.buckets.indexed_iter() {
            for (i, &first) in current.iter().enumerate() {
                for &second in &current[(i + 1)..] {
                    function(first, second, Neighborhood::SameBucket);
                }
            }

            if n_buckets == 1 {
                continue;
            }

            // half of the 8 neighbors, the other half is visited when the
            // sweep reaches these buckets
            let next_x = (x + 1) % n_buckets;
            let next_y = (y + 1) % n_buckets;
            let previous_y = (y + n_buckets - 1) % n_buckets;
            let neighbors = [
                [next_x, y],
                [next_x, next_y],
                [next_x, previous_y],
                [x, next_y],
            ];

            for neighbor in neighbors {
                let neighbor = &self.buckets[neighbor];
                for &first in current {
                    for &second in neighbor {
                        function(first, second, Neighborhood::NeighborBucket);
                    }
                }
            }
        }
    }
}
