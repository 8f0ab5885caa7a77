use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Vector2D, Pair};
use super::{SimpleTrajectory, SimulationBox, ImageConvention};

/// Trajectory with 3 snapshots of 4 particles in a box with `L = L_min = 10`.
///
/// At step 0, particles 0-1 are 2 apart and particles 2-3 are 15 apart (5
/// through the periodic boundary). At step 1, both separations are doubled.
/// At step 2, particles 0-1 are 1 apart and particles 2-3 are back to their
/// initial positions.
pub fn test_trajectory() -> SimpleTrajectory {
    let mut trajectory = SimpleTrajectory::new(SimulationBox::square(10.0));
    trajectory.add_positions(vec![
        Vector2D::new(0.0, 0.0),
        Vector2D::new(2.0, 0.0),
        Vector2D::new(-7.0, 5.0),
        Vector2D::new(8.0, 5.0),
    ]).unwrap();
    trajectory.add_positions(vec![
        Vector2D::new(0.0, 0.0),
        Vector2D::new(4.0, 0.0),
        Vector2D::new(-5.0, 5.0),
        Vector2D::new(5.0, 5.0),
    ]).unwrap();
    trajectory.add_positions(vec![
        Vector2D::new(0.0, 0.0),
        Vector2D::new(1.0, 0.0),
        Vector2D::new(-7.0, 5.0),
        Vector2D::new(8.0, 5.0),
    ]).unwrap();
    return trajectory;
}

/// Uniformly distributed positions inside `[-half_length, half_length)`
pub fn random_positions(count: usize, half_length: f64, seed: u64) -> Vec<Vector2D> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    return (0..count)
        .map(|_| Vector2D::new(
            rng.gen_range(-half_length..half_length),
            rng.gen_range(-half_length..half_length),
        ))
        .collect();
}

/// All pairs with squared distance in `(r_min², r_max²)`, checking every
/// possible pair
pub fn brute_force_pairs(
    positions: &[Vector2D],
    simulation_box: SimulationBox,
    r_min: f64,
    r_max: f64,
    convention: ImageConvention,
) -> BTreeSet<(usize, usize)> {
    let mut pairs = BTreeSet::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let distance2 = simulation_box.pair_vector(positions[i], positions[j], convention).norm2();
            if distance2 > r_min * r_min && distance2 < r_max * r_max {
                pairs.insert((i, j));
            }
        }
    }
    return pairs;
}

/// Convert a list of pairs to a set of `(smallest, largest)` indexes,
/// checking that no pair is present twice.
pub fn unordered_pairs(pairs: &[Pair]) -> BTreeSet<(usize, usize)> {
    let mut set = BTreeSet::new();
    for pair in pairs {
        assert_ne!(pair.first, pair.second, "found a self pair for particle {}", pair.first);
        let key = (usize::min(pair.first, pair.second), usize::max(pair.first, pair.second));
        assert!(set.insert(key), "pair {:?} is present more than once", key);
    }
    return set;
}
