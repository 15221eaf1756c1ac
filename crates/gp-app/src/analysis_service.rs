//! Running analysis files end to end.

use std::path::{Path, PathBuf};

use gp_plot::{RiverPlotter, RiverRequest};
use gp_project::{AnalysisDef, PlotDef, QueryDef, TransformDef, resolve_path};
use gp_query::{ExecutionReport, Query, TimeWindow};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::export::export_cube;
use crate::summary::{CubeSummary, summarize};

/// What a finished analysis produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub name: String,
    pub report: ExecutionReport,
    pub summary: CubeSummary,
    pub plot: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

/// Load an analysis file and run it; relative paths resolve against its directory.
pub fn run_analysis_file(path: &Path) -> AppResult<AnalysisOutcome> {
    let analysis = crate::project_service::load_analysis(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    run_analysis(&analysis, base_dir)
}

/// Open, execute, transform, then optionally plot and export.
pub fn run_analysis(analysis: &AnalysisDef, base_dir: &Path) -> AppResult<AnalysisOutcome> {
    gp_project::validate_analysis(analysis)?;

    let store = resolve_path(base_dir, &analysis.store);
    let mut query = open_query(&store, &analysis.query)?;
    let report = query.execute()?;
    info!(
        analysis = %analysis.name,
        rows = report.rows_read,
        skipped = report.rows_skipped,
        "query executed"
    );

    apply_transforms(&mut query, &analysis.transforms)?;

    let plot = match &analysis.plot {
        Some(def) => {
            let output = resolve_path(base_dir, &def.output);
            let mut plotter = RiverPlotter::new();
            plotter.river_plot(&query, &river_request(def))?;
            plotter.save_plot(&output)?;
            Some(output)
        }
        None => None,
    };

    let export_dir = match &analysis.export {
        Some(def) => {
            let dir = resolve_path(base_dir, &def.dir);
            export_cube(&query, &dir, analysis)?;
            Some(dir)
        }
        None => None,
    };

    Ok(AnalysisOutcome {
        name: analysis.name.clone(),
        report,
        summary: summarize(&query),
        plot,
        export_dir,
    })
}

/// Build an unexecuted query with the definition's statement overrides applied.
pub fn open_query(store: &Path, def: &QueryDef) -> AppResult<Query> {
    let window = TimeWindow::new(def.t0, def.tf)?;
    let mut query = Query::open(store, def.kind, window)?;
    let statement = query.statement_mut()?;
    if let Some(conditions) = &def.where_clause {
        statement.replace_where(conditions.as_str());
    }
    if let Some(sorting) = &def.order {
        statement.replace_order(sorting.as_str());
    }
    debug!(sql = %query.statement(), "prepared statement");
    Ok(query)
}

pub fn apply_transforms(query: &mut Query, transforms: &[TransformDef]) -> AppResult<()> {
    for &transform in transforms {
        debug!(?transform, "applying transform");
        match transform {
            TransformDef::CollapseIsotopes => query.collapse_isotopes()?,
            TransformDef::CollapseSenders => query.collapse_senders()?,
            TransformDef::CollapseReceivers => query.collapse_receivers()?,
            TransformDef::CollapseSendersAndReceivers => query.collapse_senders_and_receivers()?,
            TransformDef::IntegrateOverTime => query.integrate_over_time()?,
        }
    }
    Ok(())
}

fn river_request(def: &PlotDef) -> RiverRequest {
    RiverRequest {
        stream_axis: def.stream_axis,
        stream_filter: def.stream_filter.clone(),
        select_axis: def.select_axis,
        select_item: def.select_item,
    }
}
