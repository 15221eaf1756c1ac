//! Post-execution transforms.
//!
//! All operators require an executed query. When the axis an operator works
//! on is already gone, it logs a warning and leaves the query untouched.

use gp_catalog::{AxisKind, IsotopeFilter, mass_number};
use gp_core::constants::atoms_to_mass;
use gp_core::{as_tons, round_to};
use ndarray::Axis as NdAxis;
use tracing::warn;

use crate::engine::Query;
use crate::error::{QueryError, QueryResult};

impl Query {
    fn require_executed(&self, what: &'static str) -> QueryResult<()> {
        if self.is_executed() {
            Ok(())
        } else {
            Err(QueryError::Sequencing { what })
        }
    }

    /// Sum over the isotope axis (`iso` or `IsoID`) and remove it.
    pub fn collapse_isotopes(&mut self) -> QueryResult<()> {
        self.require_executed(
            "operations on the isotope dimension can be performed only after query execution",
        )?;
        let Some(pos) = self.cube().position_where(AxisKind::is_isotope) else {
            warn!("query data no longer have an isotope dimension");
            return Ok(());
        };
        let cube = self.cube().sum_out(pos);
        self.replace_cube(cube);
        Ok(())
    }

    /// Sum over `from` and remove it.
    pub fn collapse_senders(&mut self) -> QueryResult<()> {
        self.require_executed(
            "operations on the 'from' dimension can be performed only after query execution",
        )?;
        self.collapse_axis(AxisKind::From);
        Ok(())
    }

    /// Sum over `to` and remove it.
    pub fn collapse_receivers(&mut self) -> QueryResult<()> {
        self.require_executed(
            "operations on the 'to' dimension can be performed only after query execution",
        )?;
        self.collapse_axis(AxisKind::To);
        Ok(())
    }

    /// Replace `from`/`to` with a signed `thru` axis: positive where an actor
    /// sent more than it received in a month, negative where it received more.
    pub fn collapse_senders_and_receivers(&mut self) -> QueryResult<()> {
        self.require_executed(
            "operations on the 'from' and 'to' dimensions can be performed only after query execution",
        )?;
        let (Some(from), Some(to)) = (
            self.cube().position(AxisKind::From),
            self.cube().position(AxisKind::To),
        ) else {
            warn!("query data no longer have both a 'from' and 'to' dimension");
            return Ok(());
        };
        let cube = self.cube().net_flow(from, to)?;
        self.replace_cube(cube);
        Ok(())
    }

    /// Running sum along time (rates become cumulative totals).
    pub fn integrate_over_time(&mut self) -> QueryResult<()> {
        self.require_executed("integration over time can only be performed after query execution")?;
        let Some(pos) = self.cube().position(AxisKind::Time) else {
            warn!("query data no longer have a 'time' dimension");
            return Ok(());
        };
        let cube = self.cube().cumulative(pos);
        self.replace_cube(cube);
        Ok(())
    }

    /// Mass in metric tons of the isotopes selected by `filter`.
    ///
    /// Cells hold atom counts; each matching isotope contributes
    /// `atoms * A / 6.02214e29` t. `selection` pins other axes to one label
    /// each; unpinned axes are summed. The result is rounded to 3 decimals.
    /// Returns `None` (with a warning) once the isotope axis is gone.
    pub fn collapse_isotopes_to_elements(
        &self,
        filter: &IsotopeFilter,
        selection: &[(AxisKind, i64)],
    ) -> QueryResult<Option<f64>> {
        self.require_executed(
            "operations on the isotope dimension can be performed only after query execution",
        )?;
        let cube = self.cube();
        let Some(iso_pos) = cube.position_where(AxisKind::is_isotope) else {
            warn!("query data no longer have an isotope dimension");
            return Ok(None);
        };

        let mut pins: Vec<(usize, usize)> = Vec::with_capacity(selection.len());
        for &(kind, label) in selection {
            let pos = cube.position(kind).ok_or_else(|| QueryError::Dimension {
                message: format!("query data have no '{kind}' dimension to select from"),
            })?;
            if pos == iso_pos {
                return Err(QueryError::Dimension {
                    message: "the isotope dimension cannot be pinned".to_string(),
                });
            }
            if pins.iter().any(|&(p, _)| p == pos) {
                return Err(QueryError::Dimension {
                    message: format!("'{kind}' is selected more than once"),
                });
            }
            let index = cube.axes()[pos]
                .index_of(label)
                .ok_or_else(|| QueryError::Dimension {
                    message: format!("'{kind}' has no label {label}"),
                })?;
            pins.push((pos, index));
        }
        // Index from the highest axis down so lower positions stay valid.
        pins.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let mut view = cube.values().view();
        for &(pos, index) in &pins {
            view = view.index_axis_move(NdAxis(pos), index);
        }
        let iso_axis = iso_pos - pins.iter().filter(|&&(p, _)| p < iso_pos).count();

        let mut total = 0.0;
        for (i, &code) in cube.axes()[iso_pos].labels.iter().enumerate() {
            if !filter.matches(code) {
                continue;
            }
            let atoms = view.index_axis(NdAxis(iso_axis), i).sum();
            total += as_tons(atoms_to_mass(atoms, mass_number(code)));
        }
        Ok(Some(round_to(total, 3)))
    }

    fn collapse_axis(&mut self, kind: AxisKind) {
        let Some(pos) = self.cube().position(kind) else {
            warn!("query data no longer have a '{kind}' dimension");
            return;
        };
        let cube = self.cube().sum_out(pos);
        self.replace_cube(cube);
    }
}
