//! gp-query: the query engine.
//!
//! Provides:
//! - `Query`: builds a statement for a query kind, executes it once and
//!   scatters the rows into a dense cube
//! - `DataCube`: the dense array plus one descriptor (name, unit, labels) per axis
//! - collapse/integrate operators that keep the cube and its descriptors in step
//! - the annual "all received by" lookup for resource queries

pub mod axis;
pub mod cube;
pub mod engine;
pub mod error;
pub mod received;
pub mod transform;
pub mod window;

pub use axis::Axis;
pub use cube::{DEFAULT_MAX_CELLS, DataCube};
pub use engine::{ExecutionReport, Query, initial_statement};
pub use error::{QueryError, QueryResult};
pub use window::TimeWindow;

pub use gp_catalog::{AxisKind, IsotopeFilter, QueryKind};
