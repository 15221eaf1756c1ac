//! gp-project: analysis file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

use std::path::Path;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_analysis};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &Path) -> ProjectResult<AnalysisDef> {
    let content = std::fs::read_to_string(path)?;
    let mut analysis: AnalysisDef = serde_yaml::from_str(&content)?;
    analysis = migrate_to_latest(analysis)?;
    validate_analysis(&analysis)?;
    Ok(analysis)
}

pub fn save_yaml(path: &Path, analysis: &AnalysisDef) -> ProjectResult<()> {
    validate_analysis(analysis)?;
    let content = serde_yaml::to_string(analysis)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<AnalysisDef> {
    let content = std::fs::read_to_string(path)?;
    let mut analysis: AnalysisDef = serde_json::from_str(&content)?;
    analysis = migrate_to_latest(analysis)?;
    validate_analysis(&analysis)?;
    Ok(analysis)
}

pub fn save_json(path: &Path, analysis: &AnalysisDef) -> ProjectResult<()> {
    validate_analysis(analysis)?;
    let content = serde_json::to_string_pretty(analysis)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load(path: &Path) -> ProjectResult<AnalysisDef> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json { load_json(path) } else { load_yaml(path) }
}
