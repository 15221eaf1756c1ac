//! Dense N-dimensional result array with its axis descriptors.
//!
//! Every operation that changes the rank builds a complete new cube (values
//! and descriptors) before handing it back, so a caller that swaps the result
//! in never observes a half-updated state.

use gp_catalog::{AxisKind, AxisTemplate};
use ndarray::{ArrayD, Axis as NdAxis, IxDyn};

use crate::axis::Axis;
use crate::error::{QueryError, QueryResult, format_shape};

/// Upper bound on cells a single query may allocate (2 GiB of `f64`).
pub const DEFAULT_MAX_CELLS: usize = 1 << 28;

/// Array values plus one descriptor per axis; `axes.len() == values.ndim()`.
#[derive(Clone, Debug, PartialEq)]
pub struct DataCube {
    values: ArrayD<f64>,
    axes: Vec<Axis>,
}

impl DataCube {
    /// Zero-extent cube with the template's axes and no labels.
    pub fn empty(template: &AxisTemplate) -> Self {
        let axes: Vec<Axis> = template.axes.iter().map(Axis::from_spec).collect();
        let shape = vec![0; axes.len()];
        Self {
            values: ArrayD::zeros(IxDyn(&shape)),
            axes,
        }
    }

    /// Zero-filled cube shaped by the label counts of `axes`.
    ///
    /// Fails with [`QueryError::Capacity`] when the cell count overflows,
    /// exceeds `max_cells`, or the allocator refuses the reservation.
    pub fn allocate(axes: Vec<Axis>, max_cells: usize) -> QueryResult<Self> {
        let shape: Vec<usize> = axes.iter().map(Axis::len).collect();
        let cells = checked_cells(&shape, max_cells)?;

        let mut buf: Vec<f64> = Vec::new();
        if let Err(e) = buf.try_reserve_exact(cells) {
            return Err(QueryError::Capacity {
                shape,
                reason: e.to_string(),
            });
        }
        buf.resize(cells, 0.0);

        let values = ArrayD::from_shape_vec(IxDyn(&shape), buf).map_err(|e| QueryError::Dimension {
            message: format!("cannot shape {} cells as {}: {e}", cells, format_shape(&shape)),
        })?;
        Ok(Self { values, axes })
    }

    /// Build from existing values; shapes must agree with label counts.
    pub fn from_parts(values: ArrayD<f64>, axes: Vec<Axis>) -> QueryResult<Self> {
        let expected: Vec<usize> = axes.iter().map(Axis::len).collect();
        if values.shape() != expected.as_slice() {
            return Err(QueryError::Dimension {
                message: format!(
                    "array shape {} does not match axis labels {}",
                    format_shape(values.shape()),
                    format_shape(&expected)
                ),
            });
        }
        Ok(Self { values, axes })
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn position(&self, kind: AxisKind) -> Option<usize> {
        self.axes.iter().position(|a| a.kind == kind)
    }

    pub fn position_where(&self, pred: impl Fn(AxisKind) -> bool) -> Option<usize> {
        self.axes.iter().position(|a| pred(a.kind))
    }

    pub fn axis(&self, kind: AxisKind) -> Option<&Axis> {
        self.axes.iter().find(|a| a.kind == kind)
    }

    pub fn get(&self, coord: &[usize]) -> Option<f64> {
        self.values.get(coord).copied()
    }

    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// Scatter-accumulate: add `value` into the cell at `coord`.
    pub(crate) fn add_at(&mut self, coord: &[usize], value: f64) -> bool {
        match self.values.get_mut(coord) {
            Some(cell) => {
                *cell += value;
                true
            }
            None => false,
        }
    }

    /// Sum over the axis at `pos` and drop its descriptor.
    pub fn sum_out(&self, pos: usize) -> DataCube {
        let values = self.values.sum_axis(NdAxis(pos));
        let mut axes = self.axes.clone();
        axes.remove(pos);
        let cube = DataCube { values, axes };
        cube.debug_check();
        cube
    }

    /// Net flow per actor: (sent) - (received).
    ///
    /// The `from` descriptor is renamed to `thru` and the `to` descriptor is dropped.
    pub fn net_flow(&self, from: usize, to: usize) -> QueryResult<DataCube> {
        if from == to {
            return Err(QueryError::Dimension {
                message: "sender and receiver axes must differ".to_string(),
            });
        }
        // Summing over receivers leaves what each sender sent, actor axis at `thru`.
        let thru = if to < from { from - 1 } else { from };
        let sent = self.values.sum_axis(NdAxis(to));
        // Summing over senders leaves what each receiver got, actor axis at `recv`.
        let recv = if from < to { to - 1 } else { to };
        let received = move_axis(self.values.sum_axis(NdAxis(from)), recv, thru);

        if sent.shape() != received.shape() {
            return Err(QueryError::Dimension {
                message: format!(
                    "sender and receiver extents differ: {} vs {}",
                    format_shape(sent.shape()),
                    format_shape(received.shape())
                ),
            });
        }
        let values = &sent - &received;

        let mut axes = self.axes.clone();
        axes[from] = self.axes[from].renamed(AxisKind::Thru);
        axes.remove(to);

        let cube = DataCube { values, axes };
        cube.debug_check();
        Ok(cube)
    }

    /// Running sum along the axis at `pos`; shape and descriptors unchanged.
    pub fn cumulative(&self, pos: usize) -> DataCube {
        let mut values = self.values.clone();
        values.accumulate_axis_inplace(NdAxis(pos), |&prev, cur| *cur += prev);
        DataCube {
            values,
            axes: self.axes.clone(),
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.axes.len(), self.values.ndim());
        debug_assert!(
            self.axes
                .iter()
                .zip(self.values.shape())
                .all(|(a, &n)| a.len() == n)
        );
    }
}

fn move_axis(values: ArrayD<f64>, src: usize, dst: usize) -> ArrayD<f64> {
    if src == dst {
        return values;
    }
    let mut order: Vec<usize> = (0..values.ndim()).collect();
    let moved = order.remove(src);
    order.insert(dst, moved);
    values.permuted_axes(IxDyn(&order))
}

/// Cell count of `shape`, or [`QueryError::Capacity`] when it overflows
/// or exceeds `max_cells`.
///
/// Each extent is also capped at `max_cells`: its labels are materialized
/// even when another axis is empty.
pub fn checked_cells(shape: &[usize], max_cells: usize) -> QueryResult<usize> {
    if let Some(&n) = shape.iter().find(|&&n| n > max_cells) {
        return Err(QueryError::Capacity {
            shape: shape.to_vec(),
            reason: format!("an axis of {n} labels exceeds the limit of {max_cells}"),
        });
    }
    match shape.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n)) {
        Some(c) if c <= max_cells => Ok(c),
        Some(c) => Err(QueryError::Capacity {
            shape: shape.to_vec(),
            reason: format!("{c} cells exceeds the limit of {max_cells}"),
        }),
        None => Err(QueryError::Capacity {
            shape: shape.to_vec(),
            reason: "cell count overflows".to_string(),
        }),
    }
}
