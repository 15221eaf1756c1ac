//! One-off store inspections used by the CLI.

use std::collections::BTreeMap;
use std::path::Path;

use gp_catalog::QueryKind;
use gp_project::TransformDef;
use gp_query::{Query, TimeWindow};
use gp_store::Store;

use crate::analysis_service::apply_transforms;
use crate::error::AppResult;
use crate::summary::{CubeSummary, summarize};

/// Execute a query of `kind`, apply `transforms` and summarize the result.
pub fn inspect_store(
    store: &Path,
    kind: QueryKind,
    window: TimeWindow,
    transforms: &[TransformDef],
) -> AppResult<CubeSummary> {
    let mut query = Query::open(store, kind, window)?;
    query.execute()?;
    apply_transforms(&mut query, transforms)?;
    Ok(summarize(&query))
}

/// Annual totals of resources received by `agent` over `window`.
pub fn annual_receipts(store: &Path, agent: i64, window: TimeWindow) -> AppResult<Vec<f64>> {
    let query = Query::open(store, QueryKind::Resource, window)?;
    Ok(query.all_received_by(agent)?.unwrap_or_default())
}

/// Repository component id -> component type.
pub fn list_components(store: &Path) -> AppResult<BTreeMap<i64, String>> {
    let store = Store::open(store)?;
    Ok(store.resolver().component_types()?)
}
