//! Analysis validation logic.

use crate::schema::{AnalysisDef, PlotDef, QueryDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_analysis(analysis: &AnalysisDef) -> Result<(), ValidationError> {
    if analysis.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: analysis.version,
        });
    }
    if analysis.name.trim().is_empty() {
        return Err(missing("name"));
    }
    if analysis.store.as_os_str().is_empty() {
        return Err(missing("store"));
    }

    validate_query(&analysis.query)?;

    if !analysis.query.kind.has_actor_axes() {
        if let Some(t) = analysis.transforms.iter().find(|t| t.needs_actor_axes()) {
            return Err(ValidationError::Unsupported {
                feature: format!("transform {t:?}"),
                reason: "contaminant queries have no sender or receiver axes".to_string(),
            });
        }
    }

    if let Some(plot) = &analysis.plot {
        validate_plot(plot)?;
    }
    if let Some(export) = &analysis.export {
        if export.dir.as_os_str().is_empty() {
            return Err(missing("export.dir"));
        }
    }
    Ok(())
}

fn validate_query(query: &QueryDef) -> Result<(), ValidationError> {
    if query.tf < query.t0 {
        return Err(ValidationError::InvalidValue {
            field: "query.tf".to_string(),
            value: query.tf.to_string(),
            reason: format!("must not precede t0 = {}", query.t0),
        });
    }
    if let Some(w) = &query.where_clause {
        if w.trim().is_empty() {
            return Err(invalid("query.where", w, "must not be blank when given"));
        }
    }
    Ok(())
}

fn validate_plot(plot: &PlotDef) -> Result<(), ValidationError> {
    if plot.select_axis == Some(plot.stream_axis) {
        return Err(invalid(
            "plot.select_axis",
            plot.stream_axis.name(),
            "must differ from stream_axis",
        ));
    }
    if plot.select_axis.is_some() && plot.select_item.is_none() {
        return Err(missing("plot.select_item"));
    }
    if plot.output.as_os_str().is_empty() {
        return Err(missing("plot.output"));
    }
    if plot.stream_filter.as_ref().is_some_and(Vec::is_empty) {
        return Err(invalid("plot.stream_filter", "[]", "omit it to plot every stream"));
    }
    Ok(())
}

fn missing(field: &str) -> ValidationError {
    ValidationError::Missing {
        field: field.to_string(),
    }
}

fn invalid(field: &str, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
