use rayon::prelude::*;

use crate::{Error, PairSet};

/// Statistics over the pairs of a `PairSet` at a single lag
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize)]
pub struct LagStatistics {
    /// number of snapshots between the pair search and the statistics
    pub lag: usize,
    /// mean square distance between the particles of each pair
    pub mean_square_displacement: f64,
    /// short-time Lyapunov exponent, `None` for a lag of zero
    pub lyapunov_exponent: Option<f64>,
}

impl<'a> PairSet<'a> {
    /// Get the squared separation of all pairs at the snapshot `tau` steps
    /// after the one used for the pair search.
    fn squared_separations(&self, tau: usize) -> Result<Vec<f64>, Error> {
        let search = self.parameters().ok_or(Error::EmptyPairSet)?;

        let length = self.trajectory().len();
        let step = match search.step.checked_add(tau) {
            Some(step) if step < length => step,
            _ => return Err(Error::SnapshotOutOfRange { step: search.step.saturating_add(tau), length }),
        };

        if self.is_empty() {
            return Err(Error::EmptyPairSet);
        }

        let simulation_box = self.trajectory().simulation_box();
        let positions = self.trajectory().positions(step)?;
        let checked = |particle: usize| {
            let position = positions[particle];
            if position.is_finite() {
                Ok(position)
            } else {
                Err(Error::InvalidParameter(format!(
                    "particle {} at step {} does not have a finite position", particle, step
                )))
            }
        };

        let mut separations = Vec::with_capacity(self.len());
        for pair in self.pairs() {
            let first = checked(pair.first)?;
            let second = checked(pair.second)?;
            let vector = simulation_box.separation(first, second, search.image_convention);
            separations.push(vector.norm2());
        }

        return Ok(separations);
    }

    /// Compute the mean square distance between the particles of each pair,
    /// `tau` snapshots after the pair search.
    ///
    /// The distance is computed with periodic boundary conditions, shifting
    /// displacements by `2 L` for each periodic image.
    pub fn mean_square_displacement(&self, tau: usize) -> Result<f64, Error> {
        let separations = self.squared_separations(tau)?;
        return Ok(separations.iter().sum::<f64>() / separations.len() as f64);
    }

    /// Compute the short-time Lyapunov exponent of the pairs, comparing their
    /// separation `tau` snapshots after the pair search with the initial one.
    ///
    /// For each pair, the exponent is `ln(d_τ / d_0) / τ`; the result is the
    /// average over all pairs. Positive values mean the pairs separate, and
    /// negative values mean they come closer.
    pub fn short_time_lyapunov_exponent(&self, tau: usize) -> Result<f64, Error> {
        if tau == 0 {
            return Err(Error::InvalidLag);
        }

        let initial = self.squared_separations(0)?;
        let later = self.squared_separations(tau)?;

        let mut sum = 0.0;
        for ((pair, &d0_2), &dt_2) in self.pairs().iter().zip(&initial).zip(&later) {
            if d0_2 == 0.0 || dt_2 == 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "particles {} and {} are at the same position, can not compute their Lyapunov exponent",
                    pair.first, pair.second
                )));
            }
            sum += 0.5 * f64::ln(dt_2 / d0_2) / tau as f64;
        }

        return Ok(sum / initial.len() as f64);
    }

    /// Compute the statistics at all the given `lags` in parallel. The
    /// Lyapunov exponent is not computed for a lag of zero.
    #[time_graph::instrument(name = "PairSet::lag_sweep")]
    pub fn lag_sweep(&self, lags: &[usize]) -> Result<Vec<LagStatistics>, Error> {
        lags.par_iter()
            .map(|&lag| -> Result<LagStatistics, Error> {
                let lyapunov_exponent = if lag == 0 {
                    None
                } else {
                    Some(self.short_time_lyapunov_exponent(lag)?)
                };

                Ok(LagStatistics {
                    lag: lag,
                    mean_square_displacement: self.mean_square_displacement(lag)?,
                    lyapunov_exponent: lyapunov_exponent,
                })
            })
            .collect()
    }
}
