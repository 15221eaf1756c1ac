//! Human-readable summaries of query results.

use std::fmt;

use gp_query::Query;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    pub name: String,
    pub unit: String,
    pub len: usize,
    pub first: Option<i64>,
    pub last: Option<i64>,
}

/// Shape, descriptors and grand total of a query's current cube.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeSummary {
    pub kind: String,
    pub executed: bool,
    pub axes: Vec<AxisSummary>,
    pub shape: Vec<usize>,
    pub quantity: String,
    pub total: f64,
}

pub fn summarize(query: &Query) -> CubeSummary {
    let axes = query
        .axes()
        .iter()
        .map(|a| AxisSummary {
            name: a.name().to_string(),
            unit: a.unit.clone(),
            len: a.len(),
            first: a.labels.first().copied(),
            last: a.labels.last().copied(),
        })
        .collect();
    let quantity = &query.template().quantity;
    CubeSummary {
        kind: query.kind().to_string(),
        executed: query.is_executed(),
        axes,
        shape: query.values().shape().to_vec(),
        quantity: format!("{} ({})", quantity.name, quantity.unit),
        total: query.cube().total(),
    }
}

impl fmt::Display for CubeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Kind:     {}", self.kind)?;
        writeln!(f, "Executed: {}", self.executed)?;
        writeln!(f, "Quantity: {}", self.quantity)?;
        writeln!(f, "Axes:")?;
        for axis in &self.axes {
            match (axis.first, axis.last) {
                (Some(first), Some(last)) => writeln!(
                    f,
                    "  {:<8} [{}] {} labels, {}..={}",
                    axis.name, axis.unit, axis.len, first, last
                )?,
                _ => writeln!(f, "  {:<8} [{}] empty", axis.name, axis.unit)?,
            }
        }
        let shape: Vec<String> = self.shape.iter().map(|n| n.to_string()).collect();
        writeln!(f, "Shape:    {}", shape.join(" x "))?;
        write!(f, "Total:    {}", self.total)
    }
}
