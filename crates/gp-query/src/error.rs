//! Error types for query construction, execution and transforms.

use thiserror::Error;

/// Errors raised by [`crate::Query`] and [`crate::DataCube`].
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Sequencing error: {what}")]
    Sequencing { what: &'static str },

    #[error("Dimension error: {message}")]
    Dimension { message: String },

    #[error("Capacity error: an array of shape {} is too large ({reason})", format_shape(.shape))]
    Capacity { shape: Vec<usize>, reason: String },

    #[error("Store error: {0}")]
    Store(#[from] gp_store::StoreError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] gp_core::CoreError),
}

pub type QueryResult<T> = Result<T, QueryError>;

impl From<gp_catalog::CatalogError> for QueryError {
    fn from(e: gp_catalog::CatalogError) -> Self {
        QueryError::Configuration {
            message: e.to_string(),
        }
    }
}

/// `"12 x 3 x 3"`.
pub fn format_shape(shape: &[usize]) -> String {
    shape
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" x ")
}
