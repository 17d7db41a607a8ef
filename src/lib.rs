//! # MCMC Trace
//!
//! Loads the persisted chains of an MCMC run and draws random posterior samples
//! from them as parameter-name → value maps.
//!
//! - [`backend`]: picks the storage reader (`hdf5`, `pickle`, `sqlite`) and opens a run.
//! - [`database`]: the [`TraceDatabase`](database::TraceDatabase) interface, `trace(name)`.
//! - [`mock`]: an in-memory sample set posing as a trace database.
//! - [`sampler`]: [`TraceSampler`](sampler::TraceSampler), random draws from a loaded run.
//! - [`io`]: optional CSV / Arrow / Parquet export of the sample matrix.
//!
//! ```rust,no_run
//! use mcmc_trace::sampler::TraceSampler;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let sampler = TraceSampler::new("mcmc.sqlite", "sqlite")?;
//! let mut rng = SmallRng::seed_from_u64(42);
//! for draw in sampler.sample(100, &mut rng)? {
//!     println!("{draw:?}");
//! }
//! # Ok::<(), mcmc_trace::error::TraceError>(())
//! ```

pub mod backend;
pub mod database;
pub mod error;
pub mod io;
pub mod mock;
pub mod sampler;
