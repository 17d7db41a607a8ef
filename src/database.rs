/*!
# Trace Databases

A trace database exposes the chains of an MCMC run by parameter name. Two kinds
implement [`TraceDatabase`]:

- [`StoredDatabase`](crate::backend::StoredDatabase), which reads chains from a
  persisted run on disk, and
- [`MockDatabase`](crate::mock::MockDatabase), which wraps an in-memory sample set.

[`ChainSet`] is the eagerly materialized form of either: every chain read once
and kept in memory, all of the same length.
*/

use indexmap::IndexMap;
use log::debug;
use ndarray::{Array1, Array2, Axis};

use crate::error::{Result, TraceError};

/// Sequence of values sampled for one parameter, one entry per draw.
pub type Chain = Array1<f64>;

/// Access to per-parameter chains of an MCMC run.
pub trait TraceDatabase {
    /// Parameter names in storage order. This order defines the column order of
    /// any sample matrix derived from the database.
    fn trace_names(&self) -> &[String];

    /// Returns the chain stored for `name`.
    fn trace(&self, name: &str) -> Result<Chain>;
}

/// Ordered mapping from parameter name to chain, all chains of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainSet {
    names: Vec<String>,
    chains: IndexMap<String, Chain>,
    draw_count: usize,
}

impl ChainSet {
    /// Builds a chain set from `(name, chain)` pairs, keeping their order.
    ///
    /// Fails with [`TraceError::RaggedChains`] if the chains differ in length.
    pub fn new<I>(chains: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Chain)>,
    {
        let mut set = ChainSet::default();
        for (name, chain) in chains {
            set.insert(name, chain)?;
        }
        Ok(set)
    }

    /// Reads every chain of `db` in its reported order.
    pub fn from_database<D: TraceDatabase + ?Sized>(db: &D) -> Result<Self> {
        let mut set = ChainSet::default();
        for name in db.trace_names() {
            debug!("Reading trace '{name}'");
            let chain = db.trace(name)?;
            set.insert(name.clone(), chain)?;
        }
        Ok(set)
    }

    fn insert(&mut self, name: String, chain: Chain) -> Result<()> {
        if self.chains.is_empty() {
            self.draw_count = chain.len();
        } else if chain.len() != self.draw_count {
            return Err(TraceError::RaggedChains {
                name,
                expected: self.draw_count,
                found: chain.len(),
            });
        }
        // Later duplicates replace the chain but keep the first position.
        if self.chains.insert(name.clone(), chain).is_none() {
            self.names.push(name);
        }
        Ok(())
    }

    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    pub fn param_count(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Chain> {
        self.chains.get(name)
    }

    /// Stacks the chains as columns of a `[draws x params]` matrix.
    pub fn to_sample_matrix(&self) -> Array2<f64> {
        let mut samples = Array2::zeros((self.draw_count, self.names.len()));
        for (mut column, chain) in samples.axis_iter_mut(Axis(1)).zip(self.chains.values()) {
            column.assign(chain);
        }
        samples
    }
}

impl TraceDatabase for ChainSet {
    fn trace_names(&self) -> &[String] {
        &self.names
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        self.get(name)
            .cloned()
            .ok_or_else(|| TraceError::UnknownTrace(name.to_string()))
    }
}
