//! Reader for runs persisted in an HDF5 container.
//!
//! Chains live in root groups named `chain0`, `chain1`, ... and each group holds
//! one 1-D float dataset per parameter. Parameter names are taken from the first
//! chain group. Enable via the `hdf5` feature, which links the system HDF5 library.
//!
//! Only this group-per-chain export layout is read. Files using the PyTables
//! record-table layout of the Python MCMC libraries, where a chain is a single
//! compound table with one column per parameter, are not supported.

use std::path::Path;

use log::debug;
use ndarray::Array1;

use super::LoadOptions;
use crate::database::{Chain, TraceDatabase};
use crate::error::{Result, TraceError};

const CHAIN_GROUP_PREFIX: &str = "chain";

#[derive(Debug)]
pub struct Hdf5Database {
    file: ::hdf5::File,
    chains: Vec<usize>,
    names: Vec<String>,
    options: LoadOptions,
}

impl Hdf5Database {
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let file = ::hdf5::File::open(path).map_err(|e| TraceError::load(path, e.to_string()))?;
        let mut chains: Vec<usize> = file
            .member_names()
            .map_err(|e| TraceError::load(path, e.to_string()))?
            .iter()
            .filter_map(|member| member.strip_prefix(CHAIN_GROUP_PREFIX)?.parse().ok())
            .collect();
        chains.sort_unstable();

        let names = match chains.first() {
            Some(&first) => file
                .group(&chain_group(first))
                .and_then(|group| group.member_names())
                .map_err(|e| TraceError::load(path, e.to_string()))?,
            None => Vec::new(),
        };
        debug!(
            "Found {} traces in {} chains in {}",
            names.len(),
            chains.len(),
            path.display()
        );
        Ok(Self {
            file,
            chains,
            names,
            options,
        })
    }

    fn read_chain(&self, name: &str, chain: usize) -> ::hdf5::Result<Vec<f64>> {
        self.file
            .group(&chain_group(chain))?
            .dataset(name)?
            .read_raw::<f64>()
    }
}

impl TraceDatabase for Hdf5Database {
    fn trace_names(&self) -> &[String] {
        &self.names
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        if !self.names.iter().any(|n| n == name) {
            return Err(TraceError::UnknownTrace(name.to_string()));
        }
        let selected = self.options.chain.select(&self.chains).ok_or_else(|| {
            TraceError::read(
                name,
                format!(
                    "chain {:?} not found (stored chains: {:?})",
                    self.options.chain, self.chains
                ),
            )
        })?;

        let mut values = Vec::new();
        for chain in selected {
            let chunk = self
                .read_chain(name, chain)
                .map_err(|e| TraceError::read(name, e.to_string()))?;
            values.extend(self.options.apply_discard(Array1::from(chunk)).iter().copied());
        }
        Ok(Array1::from(values))
    }
}

fn chain_group(chain: usize) -> String {
    format!("{CHAIN_GROUP_PREFIX}{chain}")
}
