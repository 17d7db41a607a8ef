/*!
# Trace Sampler

[`TraceSampler`] loads every chain of an MCMC run once, stacks them into a
`[draws x params]` sample matrix and serves random draws from it as
parameter-name → value maps.

The sampler owns no random state: the caller passes the RNG to
[`TraceSampler::sample`], so seeding it makes the draws reproducible.

## Example Usage

```rust
use mcmc_trace::mock::MockDatabase;
use mcmc_trace::sampler::TraceSampler;
use ndarray::arr2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

let samples = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]);
let db = MockDatabase::from_samples(samples.view(), &["a", "b"])?;
let sampler = TraceSampler::from_database(&db)?;

let mut rng = SmallRng::seed_from_u64(42);
let draws = sampler.sample(2, &mut rng)?;
assert_eq!(draws.len(), 2);
assert_eq!(draws[0].len(), 2);
assert!(sampler.sample(5, &mut rng).is_err());
# Ok::<(), mcmc_trace::error::TraceError>(())
```
*/

use std::path::Path;

use indexmap::IndexMap;
use log::{info, warn};
use ndarray::{Array2, ArrayView1, ArrayView2};
use rand::Rng;

use crate::backend::{self, LoadOptions};
use crate::database::{ChainSet, TraceDatabase};
use crate::error::{Result, TraceError};

/// One joint sample: every parameter name mapped to its value, in parameter order.
pub type Draw = IndexMap<String, f64>;

/// Random access to the draws of a fully loaded MCMC run.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSampler {
    param_names: Vec<String>,
    samples: Array2<f64>,
}

impl TraceSampler {
    /**
    Opens the run stored at `path` with the named backend (`"hdf5"`, `"pickle"` or
    `"sqlite"`) and reads every chain into memory.

    The storage handle is closed before this returns, whether loading succeeds or not.
    */
    pub fn new<P: AsRef<Path>>(path: P, backend: &str) -> Result<Self> {
        Self::with_options(path, backend, LoadOptions::default())
    }

    /// Like [`TraceSampler::new`], selecting chains and burn-in via `options`.
    pub fn with_options<P: AsRef<Path>>(
        path: P,
        backend: &str,
        options: LoadOptions,
    ) -> Result<Self> {
        let db = backend::load_with(path, backend, options)?;
        let sampler = Self::from_database(&db)?;
        if sampler.draw_count() == 0 && options.discard > 0 {
            warn!(
                "Discarding {} draws left no samples in the {} database",
                options.discard,
                db.backend()
            );
        }
        Ok(sampler)
    }

    /// Reads every chain of `db`, in its reported order, into the sample matrix.
    pub fn from_database<D: TraceDatabase + ?Sized>(db: &D) -> Result<Self> {
        let chains = ChainSet::from_database(db)?;
        let sampler = Self {
            param_names: chains.trace_names().to_vec(),
            samples: chains.to_sample_matrix(),
        };
        info!(
            "Loaded {} draws of {} parameters",
            sampler.draw_count(),
            sampler.param_count()
        );
        Ok(sampler)
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The `[draws x params]` sample matrix.
    pub fn samples(&self) -> ArrayView2<f64> {
        self.samples.view()
    }

    pub fn draw_count(&self) -> usize {
        self.samples.nrows()
    }

    pub fn param_count(&self) -> usize {
        self.param_names.len()
    }

    /// Returns row `index` of the sample matrix as a [`Draw`], or `None` if out of range.
    pub fn draw(&self, index: usize) -> Option<Draw> {
        if index >= self.draw_count() {
            return None;
        }
        Some(self.row_to_draw(self.samples.row(index)))
    }

    fn row_to_draw(&self, row: ArrayView1<f64>) -> Draw {
        self.param_names
            .iter()
            .cloned()
            .zip(row.iter().copied())
            .collect()
    }

    /**
    Draws `count` rows uniformly at random, with replacement, and returns them as
    [`Draw`]s in the order they were picked.

    `count` must be strictly smaller than [`TraceSampler::draw_count`]; otherwise
    [`TraceError::InsufficientSamples`] is returned and nothing is drawn.
    */
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<Draw>> {
        let available = self.draw_count();
        if count >= available {
            return Err(TraceError::InsufficientSamples {
                requested: count,
                available,
            });
        }
        let draws = (0..count)
            .map(|_| self.row_to_draw(self.samples.row(rng.gen_range(0..available))))
            .collect();
        Ok(draws)
    }
}
