//! Store handle over a SQLite simulation output file.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, params};
use tracing::debug;

use crate::resolver::Resolver;
use crate::{StoreError, StoreResult};

/// One result row: integer key columns followed by a single measured value.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyedRow {
    pub keys: Vec<i64>,
    pub value: f64,
}

/// Owns the connection used by one query. Closed on drop.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open an existing database file read-only.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened store");
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already-open connection (e.g. an in-memory database).
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn, path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.conn)
    }

    /// Run `sql` and read `key_count` integer columns plus one value column per row.
    ///
    /// A NULL value reads as zero.
    pub fn query_keyed_rows(&self, sql: &str, key_count: usize) -> StoreResult<Vec<KeyedRow>> {
        debug!(sql, "running statement");
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            let mut keys = Vec::with_capacity(key_count);
            for i in 0..key_count {
                keys.push(row.get::<_, i64>(i)?);
            }
            let value: Option<f64> = row.get(key_count)?;
            Ok(KeyedRow {
                keys,
                value: value.unwrap_or(0.0),
            })
        })?;
        let out = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(out)
    }

    /// `(time, quantity)` for every transacted resource received by `receiver`.
    pub fn received_by(&self, receiver: i64) -> StoreResult<Vec<(i64, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT Transactions.Time, TransactedResources.Quantity \
             FROM Transactions, TransactedResources \
             WHERE Transactions.ID = TransactedResources.TransactionID \
             AND Transactions.ReceiverID = ?1 \
             ORDER BY Transactions.Time",
        )?;
        let rows = stmt.query_map(params![receiver], |row| {
            let quantity: Option<f64> = row.get(1)?;
            Ok((row.get::<_, i64>(0)?, quantity.unwrap_or(0.0)))
        })?;
        let out = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(out)
    }
}
