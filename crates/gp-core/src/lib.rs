//! gp-core: shared foundation for genpost.
//!
//! Contains:
//! - units (uom mass types + isotope atom-count conversion)
//! - numeric (Real, finiteness check, rounding and bucketing)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
