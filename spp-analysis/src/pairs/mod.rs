use log::{debug, warn};

use crate::{Error, Trajectory, Vector2D};
use crate::trajectory::{SimulationBox, ImageConvention};

mod grid;
pub use self::grid::{SpatialGrid, OutOfBox, Neighborhood};

/// Pair of particles found by a `PairSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Deserialize, serde::Serialize)]
pub struct Pair {
    /// index of the first particle in the pair
    pub first: usize,
    /// index of the second particle in the pair
    pub second: usize,
}

/// How pairs between particles in neighboring buckets are filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum PairFilter {
    /// All pairs are kept if their squared distance is in `(r_min², r_max²)`
    #[default]
    Window,
    /// Pairs in the same bucket are kept if their squared distance is in
    /// `(r_min², r_max²)`, and pairs in neighboring buckets if their squared
    /// distance is below `r_cut²`. Since the grid is sized by `r_max`, pairs
    /// found with `r_cut < r_max` are a subset of the ones found with
    /// `r_max`. When the box is too small for more than one bucket, all pairs
    /// are in the same bucket and `r_cut` is unused.
    Split,
}

/// Parameters for a pair search
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PairSearch {
    /// Snapshot in which to search for pairs
    pub step: usize,
    /// Pairs must be strictly further apart than this distance
    #[serde(default)]
    pub r_min: f64,
    /// Pairs must be strictly closer than this distance. This also sets the
    /// size of the buckets used for the search.
    pub r_max: f64,
    /// Cutoff for pairs in neighboring buckets with `PairFilter::Split`,
    /// defaults to `r_max`
    #[serde(default)]
    pub r_cut: Option<f64>,
    /// How to filter pairs in neighboring buckets
    #[serde(default)]
    pub filter: PairFilter,
    /// How to compute the periodic image of the displacement between
    /// particles
    #[serde(default)]
    pub image_convention: ImageConvention,
    /// What to do with particles outside of the box
    #[serde(default)]
    pub out_of_box: OutOfBox,
}

impl PairSearch {
    /// Search for pairs in snapshot `step` with a distance between `r_min`
    /// and `r_max`, using the default options.
    pub fn new(r_min: f64, r_max: f64, step: usize) -> PairSearch {
        PairSearch {
            step: step,
            r_min: r_min,
            r_max: r_max,
            r_cut: None,
            filter: PairFilter::default(),
            image_convention: ImageConvention::default(),
            out_of_box: OutOfBox::default(),
        }
    }

    /// Create search parameters from their JSON representation, and validate
    /// them.
    pub fn from_json(parameters: &str) -> Result<PairSearch, Error> {
        let search = serde_json::from_str::<PairSearch>(parameters)?;
        search.validate()?;
        return Ok(search);
    }

    /// Get the cutoff used for pairs in neighboring buckets with
    /// `PairFilter::Split`
    pub fn r_cut(&self) -> f64 {
        self.r_cut.unwrap_or(self.r_max)
    }

    /// Check that the distances define a non-empty search window
    pub fn validate(&self) -> Result<(), Error> {
        if !self.r_min.is_finite() || self.r_min < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "r_min must be a positive number, got {}", self.r_min
            )));
        }

        if !self.r_max.is_finite() || self.r_max <= self.r_min {
            return Err(Error::InvalidParameter(format!(
                "r_max must be larger than r_min ({}), got {}", self.r_min, self.r_max
            )));
        }

        if let Some(r_cut) = self.r_cut {
            if !(r_cut > 0.0 && r_cut <= self.r_max) {
                return Err(Error::InvalidParameter(format!(
                    "r_cut must be positive and at most r_max ({}), got {}", self.r_max, r_cut
                )));
            }
        }

        return Ok(());
    }
}

/// A `PairSet` finds pairs of particles in one snapshot of a trajectory, and
/// keeps them to follow their evolution in later snapshots.
///
/// The trajectory is borrowed for the whole lifetime of the pair set. A
/// search that fails leaves the pairs from the previous search untouched.
#[derive(Clone)]
pub struct PairSet<'a> {
    trajectory: &'a dyn Trajectory,
    pairs: Vec<Pair>,
    search: Option<PairSearch>,
}

impl<'a> std::fmt::Debug for PairSet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PairSet")
            .field("pairs", &self.pairs)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

impl<'a> PairSet<'a> {
    /// Create an empty pair set for the given trajectory
    pub fn new(trajectory: &'a dyn Trajectory) -> PairSet<'a> {
        PairSet {
            trajectory: trajectory,
            pairs: Vec::new(),
            search: None,
        }
    }

    /// Use a different trajectory for this pair set. This removes all pairs
    /// found in the previous trajectory.
    pub fn set_trajectory(&mut self, trajectory: &'a dyn Trajectory) {
        self.trajectory = trajectory;
        self.pairs.clear();
        self.search = None;
    }

    /// Get the trajectory used by this pair set
    pub fn trajectory(&self) -> &'a dyn Trajectory {
        self.trajectory
    }

    /// Find all pairs of particles closer than `r_cut` in snapshot `step`.
    pub fn find_close_particles(&mut self, r_cut: f64, step: usize) -> Result<(), Error> {
        self.find_particles(0.0, r_cut, step)
    }

    /// Find all pairs of particles with a distance in the open interval
    /// `(r_min, r_max)` in snapshot `step`.
    pub fn find_particles(&mut self, r_min: f64, r_max: f64, step: usize) -> Result<(), Error> {
        self.find_particles_with(&PairSearch::new(r_min, r_max, step))
    }

    /// Find all pairs of particles matching the given search parameters,
    /// replacing the current pairs.
    pub fn find_particles_with(&mut self, search: &PairSearch) -> Result<(), Error> {
        search.validate()?;

        let length = self.trajectory.len();
        if search.step >= length {
            return Err(Error::SnapshotOutOfRange { step: search.step, length: length });
        }

        let positions = self.trajectory.positions(search.step)?;
        let pairs = find_pairs(positions, self.trajectory.simulation_box(), search)?;

        self.pairs = pairs;
        self.search = Some(*search);
        Ok(())
    }

    /// Get the pairs found by the last search
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Get the number of pairs found by the last search
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the last search did not find any pair
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Get the parameters of the last search, or `None` if no search was done
    pub fn parameters(&self) -> Option<&PairSearch> {
        self.search.as_ref()
    }

    /// Get the snapshot used by the last search
    pub fn step(&self) -> Option<usize> {
        self.search.map(|search| search.step)
    }

    /// Get the minimal distance used by the last search
    pub fn r_min(&self) -> Option<f64> {
        self.search.map(|search| search.r_min)
    }

    /// Get the maximal distance used by the last search
    pub fn r_max(&self) -> Option<f64> {
        self.search.map(|search| search.r_max)
    }

    /// Get the cutoff for neighboring buckets used by the last search
    pub fn r_cut(&self) -> Option<f64> {
        self.search.map(|search| search.r_cut())
    }
}

#[time_graph::instrument(name = "PairSet::find_particles")]
fn find_pairs(positions: &[Vector2D], simulation_box: SimulationBox, search: &PairSearch) -> Result<Vec<Pair>, Error> {
    let mut grid = SpatialGrid::new(simulation_box, search.r_max, search.step);
    // positions inside the box, distances are computed with these
    let mut positions_in_box = Vec::with_capacity(positions.len());
    for (index, &position) in positions.iter().enumerate() {
        positions_in_box.push(grid.add_particle(index, position, search.out_of_box)?);
    }

    if grid.wrapped() != 0 {
        warn!(
            "{} particles at step {} are outside of the simulation box and were wrapped back inside",
            grid.wrapped(), search.step
        );
    }

    let r2_min = search.r_min * search.r_min;
    let r2_max = search.r_max * search.r_max;
    let r2_cut = search.r_cut() * search.r_cut();

    let mut pairs = Vec::new();
    grid.for_each_candidate(|first, second, neighborhood| {
        let vector = simulation_box.pair_vector(positions_in_box[first], positions_in_box[second], search.image_convention);
        let distance2 = vector.norm2();

        let keep = match (neighborhood, search.filter) {
            (Neighborhood::SameBucket, _) | (Neighborhood::NeighborBucket, PairFilter::Window) => {
                distance2 > r2_min && distance2 < r2_max
            }
            (Neighborhood::NeighborBucket, PairFilter::Split) => distance2 < r2_cut,
        };

        if keep {
            if distance2 < 1e-6 {
                warn!(
                    "particles {} and {} are very close to one another ({}) at step {}",
                    first, second, distance2.sqrt(), search.step
                );
            }
            pairs.push(Pair { first, second });
        }
    });

    if pairs.is_empty() {
        warn!(
            "no pairs found at step {} with distances between {} and {}",
            search.step, search.r_min, search.r_max
        );
    }

    debug!(
        "found {} pairs at step {} with a {}x{} grid",
        pairs.len(), search.step, grid.size(), grid.size()
    );

    return Ok(pairs);
}
