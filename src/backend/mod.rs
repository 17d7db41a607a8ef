/*!
# Storage Backends

An MCMC run can be persisted in one of three formats. [`Backend`] is the closed
set of them; [`resolve`] maps a backend name onto it and [`load`] opens a file
with the chosen reader.

```rust,no_run
use mcmc_trace::backend::load;
use mcmc_trace::database::TraceDatabase;

let db = load("mcmc.sqlite", "sqlite")?;
for name in db.trace_names() {
    println!("{name}: {} draws", db.trace(name)?.len());
}
# Ok::<(), mcmc_trace::error::TraceError>(())
```
*/

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use ndarray::s;

use crate::database::{Chain, TraceDatabase};
use crate::error::{Result, TraceError};

#[cfg(feature = "hdf5")]
pub mod h5;
#[cfg(feature = "pickle")]
pub mod pickle;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// On-disk format of a persisted MCMC run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Hdf5,
    Pickle,
    Sqlite,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Hdf5, Backend::Pickle, Backend::Sqlite];

    /// The name under which the backend is selected.
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Hdf5 => "hdf5",
            Backend::Pickle => "pickle",
            Backend::Sqlite => "sqlite",
        }
    }

    /// Opens `path` with this backend's reader.
    pub fn open<P: AsRef<Path>>(self, path: P, options: LoadOptions) -> Result<StoredDatabase> {
        let path = path.as_ref();
        debug!("Opening {} trace database {}", self, path.display());
        match self {
            #[cfg(feature = "hdf5")]
            Backend::Hdf5 => Ok(StoredDatabase::Hdf5(h5::Hdf5Database::open(path, options)?)),
            #[cfg(feature = "pickle")]
            Backend::Pickle => Ok(StoredDatabase::Pickle(pickle::PickleDatabase::open(
                path, options,
            )?)),
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => Ok(StoredDatabase::Sqlite(sqlite::SqliteDatabase::open(
                path, options,
            )?)),
            #[allow(unreachable_patterns)]
            disabled => {
                let _ = options;
                Err(TraceError::BackendDisabled(disabled))
            }
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hdf5" => Ok(Backend::Hdf5),
            "pickle" => Ok(Backend::Pickle),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(TraceError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Maps a backend name (`"hdf5"`, `"pickle"` or `"sqlite"`) to its [`Backend`].
pub fn resolve(name: &str) -> Result<Backend> {
    name.parse()
}

/// Opens the trace database at `path` using the named backend and default options.
pub fn load<P: AsRef<Path>>(path: P, backend: &str) -> Result<StoredDatabase> {
    load_with(path, backend, LoadOptions::default())
}

/// Opens the trace database at `path` using the named backend.
pub fn load_with<P: AsRef<Path>>(
    path: P,
    backend: &str,
    options: LoadOptions,
) -> Result<StoredDatabase> {
    resolve(backend)?.open(path, options)
}

/// Which of the stored chains `trace(name)` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// The most recently stored chain.
    #[default]
    Last,
    /// The chain with the given index.
    Index(usize),
    /// All chains concatenated in index order.
    All,
}

impl ChainSelection {
    /// Picks chain indices out of the (sorted) indices available in storage.
    pub(crate) fn select(self, available: &[usize]) -> Option<Vec<usize>> {
        match self {
            ChainSelection::Last => available.last().map(|&i| vec![i]),
            ChainSelection::Index(i) => available.contains(&i).then(|| vec![i]),
            ChainSelection::All => Some(available.to_vec()),
        }
    }
}

/// Options applied to every chain read from a stored database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub chain: ChainSelection,
    /// Number of leading draws dropped from each chain (burn-in).
    pub discard: usize,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(mut self, chain: ChainSelection) -> Self {
        self.chain = chain;
        self
    }

    pub fn discard(mut self, discard: usize) -> Self {
        self.discard = discard;
        self
    }

    pub(crate) fn apply_discard(&self, chain: Chain) -> Chain {
        if self.discard == 0 {
            return chain;
        }
        let start = self.discard.min(chain.len());
        chain.slice(s![start..]).to_owned()
    }
}

/// A trace database opened from disk.
///
/// The underlying file handle lives as long as this value and is released on drop.
#[derive(Debug)]
pub enum StoredDatabase {
    #[cfg(feature = "hdf5")]
    Hdf5(h5::Hdf5Database),
    #[cfg(feature = "pickle")]
    Pickle(pickle::PickleDatabase),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteDatabase),
}

impl StoredDatabase {
    pub fn backend(&self) -> Backend {
        match *self {
            #[cfg(feature = "hdf5")]
            StoredDatabase::Hdf5(_) => Backend::Hdf5,
            #[cfg(feature = "pickle")]
            StoredDatabase::Pickle(_) => Backend::Pickle,
            #[cfg(feature = "sqlite")]
            StoredDatabase::Sqlite(_) => Backend::Sqlite,
        }
    }
}

impl TraceDatabase for StoredDatabase {
    fn trace_names(&self) -> &[String] {
        match *self {
            #[cfg(feature = "hdf5")]
            StoredDatabase::Hdf5(ref db) => db.trace_names(),
            #[cfg(feature = "pickle")]
            StoredDatabase::Pickle(ref db) => db.trace_names(),
            #[cfg(feature = "sqlite")]
            StoredDatabase::Sqlite(ref db) => db.trace_names(),
        }
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        match *self {
            #[cfg(feature = "hdf5")]
            StoredDatabase::Hdf5(ref db) => db.trace(name),
            #[cfg(feature = "pickle")]
            StoredDatabase::Pickle(ref db) => db.trace(name),
            #[cfg(feature = "sqlite")]
            StoredDatabase::Sqlite(ref db) => db.trace(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_resolve_known_backends() {
        assert_eq!(resolve("hdf5").unwrap(), Backend::Hdf5);
        assert_eq!(resolve("pickle").unwrap(), Backend::Pickle);
        assert_eq!(resolve("sqlite").unwrap(), Backend::Sqlite);
    }

    #[test]
    fn test_resolve_backends_are_distinct() {
        for (i, a) in Backend::ALL.iter().enumerate() {
            for b in &Backend::ALL[i + 1..] {
                assert_ne!(a, b);
            }
            assert_eq!(resolve(a.name()).unwrap(), *a);
        }
    }

    #[test]
    fn test_resolve_unknown_backend() {
        let err = resolve("xml").unwrap_err();
        assert!(matches!(err, TraceError::UnsupportedBackend(ref n) if n == "xml"));
        assert_eq!(err.to_string(), "Backend xml is not supported.");
        // Names are matched exactly.
        assert!(resolve("SQLite").is_err());
        assert!(resolve("").is_err());
    }

    #[test]
    fn test_load_unknown_backend_does_not_touch_storage() {
        let err = load("/nonexistent/mcmc.db", "xml").unwrap_err();
        assert!(matches!(err, TraceError::UnsupportedBackend(_)));
    }

    #[test]
    fn test_chain_selection() {
        let available = [0, 1, 2];
        assert_eq!(ChainSelection::Last.select(&available), Some(vec![2]));
        assert_eq!(ChainSelection::Index(1).select(&available), Some(vec![1]));
        assert_eq!(ChainSelection::Index(5).select(&available), None);
        assert_eq!(ChainSelection::All.select(&available), Some(vec![0, 1, 2]));
        assert_eq!(ChainSelection::Last.select(&[]), None);
    }

    #[test]
    fn test_apply_discard() {
        let chain = arr1(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(
            LoadOptions::new().discard(2).apply_discard(chain.clone()),
            arr1(&[3.0, 4.0])
        );
        assert_eq!(LoadOptions::new().apply_discard(chain.clone()), chain);
        assert!(LoadOptions::new().discard(10).apply_discard(chain).is_empty());
    }
}
