//! gp-catalog: static dimension metadata for genpost queries.
//!
//! Provides:
//! - `QueryKind` and its axis/unit template
//! - `AxisKind` name tokens
//! - the reference isotope list and per-query isotope index maps

pub mod axis;
pub mod isotopes;
pub mod kind;
pub mod template;

pub use axis::AxisKind;
pub use isotopes::{IsotopeFilter, IsotopeIndex, KNOWN_ISOTOPES, element, ground_state, mass_number};
pub use kind::QueryKind;
pub use template::{AxisTemplate, AxisSpec, QuantitySpec};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{name} is not a recognized query type")]
    UnknownQueryKind { name: String },

    #[error("{name} is not a recognized axis")]
    UnknownAxis { name: String },
}
