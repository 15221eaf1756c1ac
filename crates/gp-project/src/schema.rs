//! Analysis file schema.

use std::path::{Path, PathBuf};

use gp_catalog::{AxisKind, QueryKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisDef {
    pub version: u32,
    pub name: String,
    /// Simulation output database; relative paths resolve against the analysis file.
    pub store: PathBuf,
    pub query: QueryDef,
    #[serde(default)]
    pub transforms: Vec<TransformDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryDef {
    pub kind: QueryKind,
    #[serde(default)]
    pub t0: i64,
    #[serde(default = "default_tf")]
    pub tf: i64,
    /// Replaces the generated WHERE clause.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

fn default_tf() -> i64 {
    1200
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransformDef {
    CollapseIsotopes,
    CollapseSenders,
    CollapseReceivers,
    CollapseSendersAndReceivers,
    IntegrateOverTime,
}

impl TransformDef {
    /// Whether the transform works on the `from`/`to` axes.
    pub fn needs_actor_axes(self) -> bool {
        matches!(
            self,
            TransformDef::CollapseSenders
                | TransformDef::CollapseReceivers
                | TransformDef::CollapseSendersAndReceivers
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotDef {
    pub stream_axis: AxisKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_filter: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_axis: Option<AxisKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_item: Option<i64>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportDef {
    pub dir: PathBuf,
}

/// `path` if absolute, otherwise `base.join(path)`.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
