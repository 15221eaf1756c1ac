//! Shared application service layer for genpost.
//!
//! Runs analysis files end to end (query, transforms, plot, export) and
//! provides the one-off store inspections behind the CLI.

pub mod analysis_service;
pub mod error;
pub mod export;
pub mod hash;
pub mod project_service;
pub mod store_service;
pub mod summary;

// Re-export key types for convenience
pub use analysis_service::{
    AnalysisOutcome, apply_transforms, open_query, run_analysis, run_analysis_file,
};
pub use error::{AppError, AppResult};
pub use export::{ExportAxis, ExportManifest, MANIFEST_FILE, VALUES_FILE, export_cube};
pub use hash::compute_analysis_id;
pub use project_service::{load_analysis, save_analysis, validate_analysis};
pub use store_service::{annual_receipts, inspect_store, list_components};
pub use summary::{AxisSummary, CubeSummary, summarize};
