//! Reduction of an executed query to stacked bands.

use gp_query::{AxisKind, Query};
use ndarray::{ArrayView2, Axis as NdAxis, Ix2};

use crate::error::{PlotResult, dimension, precondition};

/// What to plot: one band per label of `stream_axis`, optionally restricted
/// to `stream_filter`, with a third axis pinned by `select_axis = select_item`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiverRequest {
    pub stream_axis: AxisKind,
    pub stream_filter: Option<Vec<i64>>,
    pub select_axis: Option<AxisKind>,
    pub select_item: Option<i64>,
}

impl RiverRequest {
    pub fn new(stream_axis: AxisKind) -> Self {
        Self {
            stream_axis,
            stream_filter: None,
            select_axis: None,
            select_item: None,
        }
    }

    pub fn streams(mut self, labels: impl IntoIterator<Item = i64>) -> Self {
        self.stream_filter = Some(labels.into_iter().collect());
        self
    }

    pub fn select(mut self, axis: AxisKind, item: i64) -> Self {
        self.select_axis = Some(axis);
        self.select_item = Some(item);
        self
    }
}

/// One stream stacked on those before it.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub label: i64,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Time labels, one per sample.
    pub x: Vec<i64>,
    pub bands: Vec<Band>,
    /// Half-open `[t0, tf)`.
    pub x_range: (i64, i64),
    pub y_range: (f64, f64),
}

impl Figure {
    /// Stack the streams selected by `request`.
    pub fn build(query: &Query, request: &RiverRequest) -> PlotResult<Figure> {
        if !query.is_executed() {
            return Err(precondition("plotting can only be performed after query execution"));
        }
        if request.select_axis == Some(request.stream_axis) {
            return Err(precondition(
                "stream and select axes are the same; use a single-item stream filter instead",
            ));
        }
        if request.stream_axis == AxisKind::Time || request.select_axis == Some(AxisKind::Time) {
            return Err(precondition("time is the plot's x axis and cannot be streamed or selected"));
        }
        if request.select_axis.is_some() && request.select_item.is_none() {
            return Err(precondition("a select axis needs the label of the item to select"));
        }

        let cube = query.cube();
        let missing = |kind: AxisKind| dimension(format!("query data no longer have a '{kind}' dimension"));
        let time_pos = cube.position(AxisKind::Time).ok_or_else(|| missing(AxisKind::Time))?;
        let stream_pos = cube
            .position(request.stream_axis)
            .ok_or_else(|| missing(request.stream_axis))?;
        let select = match (request.select_axis, request.select_item) {
            (Some(kind), Some(item)) => {
                let pos = cube.position(kind).ok_or_else(|| missing(kind))?;
                let index = cube.axes()[pos]
                    .index_of(item)
                    .ok_or_else(|| dimension(format!("'{kind}' has no label {item}")))?;
                Some((pos, index))
            }
            _ => None,
        };
        if cube.rank() > 3 {
            return Err(dimension(format!(
                "a river plot needs at most 3 dimensions, the data have {}",
                cube.rank()
            )));
        }

        let mut view = cube.values().view();
        let (mut time_col, mut stream_col) = (time_pos, stream_pos);
        if let Some((pos, index)) = select {
            view = view.index_axis_move(NdAxis(pos), index);
            time_col -= usize::from(pos < time_col);
            stream_col -= usize::from(pos < stream_col);
        }
        let table: ArrayView2<f64> = view.into_dimensionality::<Ix2>().map_err(|_| {
            precondition("only a two-dimensional (time, stream) projection can be plotted")
        })?;
        // Rows are time samples, columns are streams.
        let table = if time_col == 0 && stream_col == 1 {
            table
        } else {
            table.reversed_axes()
        };

        let stream_axis = &cube.axes()[stream_pos];
        let streams: Vec<(i64, usize)> = match &request.stream_filter {
            Some(filter) => filter
                .iter()
                .map(|&label| {
                    stream_axis.index_of(label).map(|i| (label, i)).ok_or_else(|| {
                        dimension(format!("'{}' has no label {label}", request.stream_axis))
                    })
                })
                .collect::<PlotResult<_>>()?,
            None => stream_axis.labels.iter().copied().zip(0..).collect(),
        };

        let samples = table.nrows();
        let mut running = vec![0.0; samples];
        let mut bands = Vec::with_capacity(streams.len());
        for (label, column) in streams {
            let lower = running.clone();
            for (acc, v) in running.iter_mut().zip(table.column(column)) {
                *acc += v;
            }
            bands.push(Band {
                label,
                lower,
                upper: running.clone(),
            });
        }

        let peak = running.iter().copied().fold(0.0_f64, f64::max);
        let floor = bands
            .iter()
            .flat_map(|b| b.lower.iter().chain(&b.upper))
            .copied()
            .fold(0.0_f64, f64::min);

        let title = match (request.select_axis, request.select_item, select) {
            (Some(kind), Some(item), Some((pos, _))) => {
                format!("{} {} = {item}", kind.name(), cube.axes()[pos].unit)
            }
            _ => format!("{} over time", request.stream_axis.name()),
        };
        let quantity = &query.template().quantity;

        Ok(Figure {
            title,
            x_label: "time (months)".to_string(),
            y_label: format!("{} ({})", quantity.name, quantity.unit),
            x: cube.axes()[time_pos].labels.clone(),
            bands,
            x_range: (query.t0(), query.tf()),
            y_range: (floor, peak * 1.05),
        })
    }
}
