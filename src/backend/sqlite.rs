//! Reader for runs persisted in a single-file SQLite database.
//!
//! Each parameter is stored in its own table, named after the parameter:
//!
//! ```sql
//! CREATE TABLE "a" (recid INTEGER PRIMARY KEY, trace INTEGER, v1 REAL);
//! ```
//!
//! `trace` holds the chain index and `v1` the sampled value. Rows are read in
//! `recid` order. Enable via the `sqlite` feature (on by default).

use std::path::Path;

use log::debug;
use ndarray::Array1;
use rusqlite::{Connection, OpenFlags};

use super::LoadOptions;
use crate::database::{Chain, TraceDatabase};
use crate::error::{BoxedSource, Result, TraceError};

#[derive(Debug)]
pub struct SqliteDatabase {
    conn: Connection,
    names: Vec<String>,
    options: LoadOptions,
}

impl SqliteDatabase {
    /// Opens `path` read-only and lists the stored parameters.
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| TraceError::load(path, e))?;
        let names = list_tables(&conn).map_err(|e| TraceError::load(path, e))?;
        debug!("Found {} traces in {}", names.len(), path.display());
        Ok(Self {
            conn,
            names,
            options,
        })
    }

    fn chain_indices(&self, table: &str) -> std::result::Result<Vec<usize>, BoxedSource> {
        let sql = format!("SELECT DISTINCT trace FROM {table} ORDER BY trace");
        let mut stmt = self.conn.prepare(&sql)?;
        let indices = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        indices
            .into_iter()
            .map(|i| usize::try_from(i).map_err(|_| BoxedSource::from(format!("invalid chain index {i}"))))
            .collect()
    }

    fn read_chain(&self, table: &str, chain: usize) -> rusqlite::Result<Vec<f64>> {
        let sql = format!("SELECT v1 FROM {table} WHERE trace = ?1 ORDER BY recid");
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([chain as i64], |row| row.get::<_, f64>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(values)
    }
}

impl TraceDatabase for SqliteDatabase {
    fn trace_names(&self) -> &[String] {
        &self.names
    }

    fn trace(&self, name: &str) -> Result<Chain> {
        if !self.names.iter().any(|n| n == name) {
            return Err(TraceError::UnknownTrace(name.to_string()));
        }
        let table = quote_identifier(name);
        let available = self
            .chain_indices(&table)
            .map_err(|e| TraceError::read(name, e))?;
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
            let chunk = self
                .read_chain(&table, chain)
                .map_err(|e| TraceError::read(name, e))?;
            values.extend(self.options.apply_discard(Array1::from(chunk)).iter().copied());
        }
        Ok(Array1::from(values))
    }
}

fn list_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND substr(name, 1, 7) <> 'sqlite_' \
         ORDER BY rowid",
    )?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
