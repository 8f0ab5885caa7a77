use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use spp_analysis::{PairSet, SimpleTrajectory, SimulationBox, Vector2D};

use criterion::{Criterion, BenchmarkId, black_box, criterion_group, criterion_main};

/// Uniform snapshot with a density of one particle per unit area
fn uniform_trajectory(n_particles: usize, n_snapshots: usize) -> SimpleTrajectory {
    let half_length = 0.5 * f64::sqrt(n_particles as f64);
    let mut rng = ChaCha8Rng::seed_from_u64(n_particles as u64);

    let mut trajectory = SimpleTrajectory::new(SimulationBox::square(half_length));
    for _ in 0..n_snapshots {
        let positions = (0..n_particles)
            .map(|_| Vector2D::new(
                rng.gen_range(-half_length..half_length),
                rng.gen_range(-half_length..half_length),
            ))
            .collect();
        trajectory.add_positions(positions).expect("invalid snapshot");
    }

    return trajectory;
}

fn find_particles(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair search");
    group.noise_threshold(0.05);

    for &n_particles in black_box(&[1_000, 10_000, 100_000]) {
        let trajectory = uniform_trajectory(n_particles, 1);
        let mut pairs = PairSet::new(&trajectory);

        for &r_cut in &[1.0, 3.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("r_cut = {}", r_cut), n_particles),
                &r_cut,
                |b, &r_cut| b.iter(|| {
                    pairs.find_close_particles(r_cut, 0).expect("failed to find pairs");
                    black_box(pairs.len())
                })
            );
        }
    }
}

fn lag_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("lag sweep");
    group.noise_threshold(0.05);

    let trajectory = uniform_trajectory(10_000, 32);
    let mut pairs = PairSet::new(&trajectory);
    pairs.find_close_particles(1.0, 0).expect("failed to find pairs");

    let lags = (0..32).collect::<Vec<_>>();
    group.bench_function(format!("{} pairs, {} lags", pairs.len(), lags.len()), |b| b.iter(|| {
        pairs.lag_sweep(&lags).expect("failed to compute statistics")
    }));
}

criterion_group!(benches, find_particles, lag_sweep);
criterion_main!(benches);
