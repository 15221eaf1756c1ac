//! Schema migration framework.

use crate::ProjectError;
use crate::schema::AnalysisDef;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut analysis: AnalysisDef) -> Result<AnalysisDef, ProjectError> {
    while analysis.version < LATEST_VERSION {
        analysis = migrate_one_version(analysis)?;
    }
    Ok(analysis)
}

fn migrate_one_version(analysis: AnalysisDef) -> Result<AnalysisDef, ProjectError> {
    match analysis.version {
        0 => migrate_v0_to_v1(analysis),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// Version 0 files predate the version field being checked; the layout is unchanged.
fn migrate_v0_to_v1(mut analysis: AnalysisDef) -> Result<AnalysisDef, ProjectError> {
    analysis.version = 1;
    Ok(analysis)
}
