//! gp-store: relational store access for genpost.
//!
//! - `statement`: SELECT/FROM/WHERE/ORDER BY construction
//! - `store`: the SQLite connection and row fetching
//! - `resolver`: distinct-entity lookups that fix dense index order

pub mod resolver;
pub mod statement;
pub mod store;

pub use resolver::{IndexMap, Resolver};
pub use statement::Statement;
pub use store::{KeyedRow, Store};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to open store {path}: {source}")]
    Open {
        path: std::path::PathBuf,
        source: rusqlite::Error,
    },

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Invalid SQL identifier: {name}")]
    InvalidIdentifier { name: String },
}
