/*!
# Mock Trace Database

Presents an in-memory sample set as if it were a persisted MCMC run, so code that
consumes a [`TraceDatabase`] (for example a prior built from samples) can use it
without touching storage.

```rust
use mcmc_trace::database::TraceDatabase;
use mcmc_trace::mock::MockDatabase;
use ndarray::{arr1, arr2};

let samples = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]);
let db = MockDatabase::from_samples(samples.view(), &["a", "b"])?;
assert_eq!(db.trace("a")?, arr1(&[1.0, 2.0, 3.0]));
assert_eq!(db.trace("b")?, arr1(&[10.0, 20.0, 30.0]));
# Ok::<(), mcmc_trace::error::TraceError>(())
```
*/

use indexmap::IndexMap;
use ndarray::{Array1, ArrayView2, Axis};

use crate::database::{Chain, ChainSet, TraceDatabase};
use crate::error::{Result, TraceError};

#[derive(Debug, Clone, PartialEq)]
pub struct MockDatabase {
    chains: ChainSet,
}

impl MockDatabase {
    /// Splits a `[draws x params]` sample array column-wise into one chain per name.
    ///
    /// Fails with [`TraceError::ShapeMismatch`] unless there is exactly one name per column.
    pub fn from_samples<S: AsRef<str>>(samples: ArrayView2<f64>, names: &[S]) -> Result<Self> {
        if names.len() != samples.ncols() {
            return Err(TraceError::ShapeMismatch {
                names: names.len(),
                columns: samples.ncols(),
            });
        }
        let chains = ChainSet::new(
            names
                .iter()
                .map(|name| name.as_ref().to_string())
                .zip(samples.axis_iter(Axis(1)).map(|column| column.to_owned())),
        )?;
        Ok(Self { chains })
    }

    /// Builds the database from a name -> values map, keeping the map's order.
    pub fn from_params<I, K, V>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<f64>>,
    {
        let chains = ChainSet::new(
            params
                .into_iter()
                .map(|(name, values)| (name.into(), Array1::from(values.into()))),
        )?;
        Ok(Self { chains })
    }

    pub fn chains(&self) -> &ChainSet {
        &self.chains
    }
}

impl From<ChainSet> for MockDatabase {
    fn from(chains: ChainSet) -> Self {
        Self { chains }
    }
}

impl From<MockDatabase> for IndexMap<String, Chain> {
    fn from(db: MockDatabase) -> Self {
        let names = db.chains.trace_names().to_vec();
        names
            .into_iter()
            .filter_map(|name| {
                let chain = db.chains.get(&name)?.clone();
                Some((name, chain))
            })
            .collect()
    }
}

impl TraceDatabase for MockDatabase {
    fn trace_names(&self) -> &[String] {
        self.chains.trace_names()
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        self.chains.trace(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, stack, Array2};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_columns_become_traces() {
        let samples = arr2(&[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]);
        let db = MockDatabase::from_samples(samples.view(), &["a", "b"]).unwrap();
        assert_eq!(db.trace_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(db.trace("a").unwrap(), arr1(&[1.0, 2.0, 3.0]));
        assert_eq!(db.trace("b").unwrap(), arr1(&[10.0, 20.0, 30.0]));
    }

    #[test]
    fn test_restacking_traces_reproduces_samples() {
        let mut rng = SmallRng::seed_from_u64(42);
        let samples = Array2::from_shape_fn((50, 2), |_| rng.gen::<f64>() * 1e3 - 5e2);
        let db = MockDatabase::from_samples(samples.view(), &["a", "b"]).unwrap();

        let a = db.trace("a").unwrap();
        let b = db.trace("b").unwrap();
        let restacked = stack(Axis(1), &[a.view(), b.view()]).unwrap();
        // Bit-for-bit, no tolerance.
        assert_eq!(restacked, samples);
        assert_eq!(db.chains().to_sample_matrix(), samples);
    }

    #[test]
    fn test_name_count_must_match_columns() {
        let samples = arr2(&[[1.0, 10.0], [2.0, 20.0]]);
        let err = MockDatabase::from_samples(samples.view(), &["a"]).unwrap_err();
        assert!(matches!(
            err,
            TraceError::ShapeMismatch {
                names: 1,
                columns: 2
            }
        ));
        assert!(MockDatabase::from_samples(samples.view(), &["a", "b", "c"]).is_err());
    }

    #[test]
    fn test_from_params_keeps_order() {
        let db = MockDatabase::from_params([("b", vec![1.0, 2.0]), ("a", vec![3.0, 4.0])]).unwrap();
        assert_eq!(db.trace_names(), &["b".to_string(), "a".to_string()]);
        assert_eq!(db.trace("a").unwrap(), arr1(&[3.0, 4.0]));
    }

    #[test]
    fn test_from_params_rejects_ragged_chains() {
        let err = MockDatabase::from_params([("a", vec![1.0, 2.0]), ("b", vec![3.0])]).unwrap_err();
        assert!(matches!(err, TraceError::RaggedChains { .. }));
    }

    #[test]
    fn test_into_param_map() {
        let db = MockDatabase::from_params([("a", vec![1.0]), ("b", vec![2.0])]).unwrap();
        let map: IndexMap<String, Chain> = db.into();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map["b"], arr1(&[2.0]));
    }

    #[test]
    fn test_unknown_trace() {
        let db = MockDatabase::from_params([("a", vec![1.0])]).unwrap();
        assert!(matches!(db.trace("z"), Err(TraceError::UnknownTrace(_))));
    }
}
