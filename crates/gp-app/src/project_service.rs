//! Analysis file management.

use std::path::Path;

use gp_project::AnalysisDef;

use crate::error::AppResult;

/// Load by extension (`.json` or YAML), migrating and validating.
pub fn load_analysis(path: &Path) -> AppResult<AnalysisDef> {
    Ok(gp_project::load(path)?)
}

pub fn save_analysis(path: &Path, analysis: &AnalysisDef) -> AppResult<()> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        gp_project::save_json(path, analysis)?;
    } else {
        gp_project::save_yaml(path, analysis)?;
    }
    Ok(())
}

pub fn validate_analysis(analysis: &AnalysisDef) -> AppResult<()> {
    gp_project::validate_analysis(analysis)?;
    Ok(())
}
