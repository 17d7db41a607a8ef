//! Reader for runs persisted as a pickled dictionary.
//!
//! The file holds one top-level dict keyed by parameter name. A value is either a
//! list of numbers (a single chain) or a dict mapping chain index to such a list.
//! Keys starting with `_` hold sampler bookkeeping and are skipped.
//!
//! This is a plain-list export layout. Pickles that store chains as numpy arrays
//! (as the Python MCMC libraries write them natively) are not decoded and fail to
//! load; convert them to lists before reading.
//!
//! Pickle offers no random access, so the whole file is decoded when opened and
//! the handle is closed before [`PickleDatabase::open`] returns. Enable via the
//! `pickle` feature (on by default).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use ndarray::Array1;
use serde_pickle::{DeOptions, HashableValue, Value};

use super::LoadOptions;
use crate::database::{Chain, TraceDatabase};
use crate::error::{Result, TraceError};

/// Chain index -> values.
type StoredChains = BTreeMap<usize, Vec<f64>>;

#[derive(Debug)]
pub struct PickleDatabase {
    names: Vec<String>,
    chains: IndexMap<String, StoredChains>,
    options: LoadOptions,
}

impl PickleDatabase {
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let value = {
            let file = File::open(path).map_err(|e| TraceError::load(path, e))?;
            serde_pickle::value_from_reader(BufReader::new(file), DeOptions::new())
                .map_err(|e| TraceError::load(path, e))?
        };
        let chains = decode_database(value).map_err(|e| TraceError::load(path, e))?;
        debug!("Decoded {} traces from {}", chains.len(), path.display());
        Ok(Self {
            names: chains.keys().cloned().collect(),
            chains,
            options,
        })
    }
}

impl TraceDatabase for PickleDatabase {
    fn trace_names(&self) -> &[String] {
        &self.names
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        let stored = self
            .chains
            .get(name)
            .ok_or_else(|| TraceError::UnknownTrace(name.to_string()))?;
        let available: Vec<usize> = stored.keys().copied().collect();
        let selected = self.options.chain.select(&available).ok_or_else(|| {
            TraceError::read(
                name,
                format!(
                    "chain {:?} not found (stored chains: {available:?})",
                    self.options.chain
                ),
            )
        })?;

        let mut values = Vec::new();
        for chain in selected {
            let chunk = Array1::from(stored[&chain].clone());
            values.extend(self.options.apply_discard(chunk).iter().copied());
        }
        Ok(Array1::from(values))
    }
}

fn decode_database(value: Value) -> std::result::Result<IndexMap<String, StoredChains>, String> {
    let entries = match value {
        Value::Dict(entries) => entries,
        other => return Err(format!("expected a dict at the top level, found {other:?}")),
    };
    let mut chains = IndexMap::new();
    for (key, value) in entries {
        let name = match key {
            HashableValue::String(name) => name,
            other => return Err(format!("expected string keys, found {other:?}")),
        };
        if name.starts_with('_') {
            continue;
        }
        let decoded = decode_chains(value).map_err(|e| format!("trace '{name}': {e}"))?;
        chains.insert(name, decoded);
    }
    Ok(chains)
}

fn decode_chains(value: Value) -> std::result::Result<StoredChains, String> {
    match value {
        Value::Dict(entries) => entries
            .into_iter()
            .map(|(key, values)| {
                let index = match key {
                    HashableValue::I64(i) if i >= 0 => i as usize,
                    other => return Err(format!("invalid chain index {other:?}")),
                };
                Ok((index, decode_values(values)?))
            })
            .collect(),
        other => Ok(BTreeMap::from([(0, decode_values(other)?)])),
    }
}

fn decode_values(value: Value) -> std::result::Result<Vec<f64>, String> {
    let items = match value {
        Value::List(items) | Value::Tuple(items) => items,
        other => return Err(format!("expected a list of numbers, found {other:?}")),
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::F64(x) => Ok(x),
            Value::I64(i) => Ok(i as f64),
            Value::Bool(b) => Ok(f64::from(u8::from(b))),
            other => Err(format!("expected a number, found {other:?}")),
        })
        .collect()
}
