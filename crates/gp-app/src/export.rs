//! Writes an executed query's cube to a directory as a JSON manifest plus CSV values.

use std::path::Path;

use gp_project::AnalysisDef;
use gp_query::Query;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::hash::compute_analysis_id;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const VALUES_FILE: &str = "values.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportAxis {
    pub name: String,
    pub unit: String,
    pub labels: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportManifest {
    pub analysis_id: String,
    pub name: String,
    pub created_at: String,
    pub kind: String,
    pub quantity: String,
    pub shape: Vec<usize>,
    pub axes: Vec<ExportAxis>,
    pub values_file: String,
}

/// Write `manifest.json` and `values.csv` for `query` into `dir`.
///
/// `values.csv` has one column per axis (holding that axis's label) and a
/// final `value` column; rows follow the array's logical order.
pub fn export_cube(query: &Query, dir: &Path, analysis: &AnalysisDef) -> AppResult<ExportManifest> {
    if !query.is_executed() {
        return Err(AppError::InvalidInput(
            "only an executed query can be exported".to_string(),
        ));
    }
    std::fs::create_dir_all(dir)?;

    let quantity = &query.template().quantity;
    let manifest = ExportManifest {
        analysis_id: compute_analysis_id(analysis),
        name: analysis.name.clone(),
        created_at: chrono::Utc::now().to_rfc3339(),
        kind: query.kind().to_string(),
        quantity: format!("{} ({})", quantity.name, quantity.unit),
        shape: query.values().shape().to_vec(),
        axes: query
            .axes()
            .iter()
            .map(|a| ExportAxis {
                name: a.name().to_string(),
                unit: a.unit.clone(),
                labels: a.labels.clone(),
            })
            .collect(),
        values_file: VALUES_FILE.to_string(),
    };

    write_values(query, &dir.join(VALUES_FILE))?;

    let manifest_path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&manifest_path, json).map_err(|source| AppError::ExportWrite {
        path: manifest_path.clone(),
        source,
    })?;

    info!(dir = %dir.display(), cells = query.values().len(), "exported query cube");
    Ok(manifest)
}

fn write_values(query: &Query, path: &Path) -> AppResult<()> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;

    let mut header: Vec<&str> = query.axis_names();
    header.push("value");
    writer.write_record(&header)?;

    let axes = query.axes();
    for (index, value) in query.values().indexed_iter() {
        let mut record: Vec<String> = axes
            .iter()
            .enumerate()
            .map(|(k, axis)| axis.labels[index[k]].to_string())
            .collect();
        record.push(value.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
