//! Error types for the gp-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Analysis error: {0}")]
    Project(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Failed to write export file: {path}")]
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gp_project::ProjectError> for AppError {
    fn from(err: gp_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<gp_project::ValidationError> for AppError {
    fn from(err: gp_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<gp_query::QueryError> for AppError {
    fn from(err: gp_query::QueryError) -> Self {
        AppError::Query(err.to_string())
    }
}

impl From<gp_plot::PlotError> for AppError {
    fn from(err: gp_plot::PlotError) -> Self {
        AppError::Plot(err.to_string())
    }
}

impl From<gp_store::StoreError> for AppError {
    fn from(err: gp_store::StoreError) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
