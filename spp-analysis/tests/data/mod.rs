#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use spp_analysis::{SimpleTrajectory, SimulationBox, Vector2D};
use spp_analysis::trajectory::write_snapshot;

/// Distance between a walker and its anchor in the first snapshot
pub const INITIAL_SEPARATION: f64 = 0.01;

/// Create a trajectory containing `n_side²` fixed anchor particles on a square
/// lattice with spacing `spacing`, and the same number of walkers. Each walker
/// starts `INITIAL_SEPARATION` away from its anchor, and then moves by `±step`
/// along each axis at every snapshot.
///
/// Anchors have indexes `0..n_side²`, and the walker of anchor `i` has index
/// `i + n_side²`.
pub fn anchored_random_walk(n_side: usize, spacing: f64, step: f64, n_snapshots: usize, seed: u64) -> SimpleTrajectory {
    let half_length = 0.5 * spacing * n_side as f64;
    let mut anchors = Vec::new();
    for i in 0..n_side {
        for j in 0..n_side {
            anchors.push(Vector2D::new(
                -half_length + (i as f64 + 0.5) * spacing,
                -half_length + (j as f64 + 0.5) * spacing,
            ));
        }
    }

    let mut walkers = anchors.iter()
        .map(|&anchor| anchor + Vector2D::new(INITIAL_SEPARATION, 0.0))
        .collect::<Vec<_>>();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut trajectory = SimpleTrajectory::new(SimulationBox::square(half_length));
    for _ in 0..n_snapshots {
        let mut positions = anchors.clone();
        positions.extend_from_slice(&walkers);
        trajectory.add_positions(positions).unwrap();

        for walker in &mut walkers {
            let dx = if rng.gen_bool(0.5) { step } else { -step };
            let dy = if rng.gen_bool(0.5) { step } else { -step };
            *walker += Vector2D::new(dx, dy);
        }
    }

    return trajectory;
}

/// Encode the snapshots as the simulation engine would write them: 4
/// particles in a box with `L = L_min = 10`, where pair 0-1 is 2 apart and
/// pair 2-3 is 5 apart through the periodic boundary. Both separations are
/// doubled in the second snapshot.
pub fn engine_output() -> Vec<u8> {
    let snapshots = [
        [(0.0, 0.0), (2.0, 0.0), (-7.0, 5.0), (8.0, 5.0)],
        [(0.0, 0.0), (4.0, 0.0), (-5.0, 5.0), (5.0, 5.0)],
        [(0.0, 0.0), (1.0, 0.0), (-7.0, 5.0), (8.0, 5.0)],
    ];

    let mut data = Vec::new();
    for snapshot in snapshots {
        let positions = snapshot.iter()
            .map(|&(x, y)| Vector2D::new(x, y))
            .collect::<Vec<_>>();
        let velocities = vec![Vector2D::new(1.0, 0.0); positions.len()];
        write_snapshot(&mut data, &positions, Some(&velocities)).unwrap();
    }

    return data;
}
