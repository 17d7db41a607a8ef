//! Treat a synthesized prior sample set as a trace database and resample it.
//!
//! Draws correlated 2D Gaussian samples, wraps them in a `MockDatabase` and checks
//! that draws taken through `TraceSampler` keep the prior's mean.

use approx::assert_abs_diff_eq;
use mcmc_trace::database::TraceDatabase;
use mcmc_trace::mock::MockDatabase;
use mcmc_trace::sampler::TraceSampler;
use ndarray::{arr1, Array2, Axis};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 5000;
    const MEAN: [f64; 2] = [2.48, 1.2];

    /// Samples `N(MEAN, L L^T)` with a lower-triangular `L`.
    fn prior_samples(rng: &mut SmallRng) -> Array2<f64> {
        let l = [[0.03, 0.0], [-0.06, 0.12]];
        let mut samples = Array2::zeros((N, 2));
        for mut row in samples.outer_iter_mut() {
            let z0: f64 = StandardNormal.sample(rng);
            let z1: f64 = StandardNormal.sample(rng);
            row[0] = MEAN[0] + l[0][0] * z0;
            row[1] = MEAN[1] + l[1][0] * z0 + l[1][1] * z1;
        }
        samples
    }

    #[test]
    fn test_prior_resampling_keeps_mean() {
        let mut rng = SmallRng::seed_from_u64(42);
        let samples = prior_samples(&mut rng);
        let db = MockDatabase::from_samples(samples.view(), &["a", "b"]).unwrap();
        assert_eq!(db.trace("a").unwrap().len(), N);

        let sampler = TraceSampler::from_database(&db).unwrap();
        assert_eq!(sampler.samples(), samples);

        let draws = sampler.sample(N - 1, &mut rng).unwrap();
        let resampled = Array2::from_shape_fn((draws.len(), 2), |(i, j)| {
            draws[i][["a", "b"][j]]
        });
        let mean = resampled.mean_axis(Axis(0)).unwrap();
        assert_abs_diff_eq!(mean, arr1(&MEAN), epsilon = 0.02);
    }
}
