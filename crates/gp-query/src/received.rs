//! Annual totals received by a single actor.

use gp_catalog::{AxisKind, QueryKind};
use gp_core::bucket_count;
use tracing::warn;

use crate::cube::checked_cells;
use crate::engine::Query;
use crate::error::{QueryError, QueryResult};

/// Months per bucket for [`Query::all_received_by`].
pub const MONTHS_PER_YEAR: usize = 12;

impl Query {
    /// Resources received by `receiver`, summed per year of the window.
    ///
    /// Bucket `k` covers months `t0 + 12k .. t0 + 12(k+1)`. Only resource
    /// queries support this; returns `None` once the `to` axis is gone.
    pub fn all_received_by(&self, receiver: i64) -> QueryResult<Option<Vec<f64>>> {
        if self.kind() != QueryKind::Resource {
            return Err(QueryError::Configuration {
                message: format!(
                    "{} queries cannot return all resources received",
                    self.kind()
                ),
            });
        }
        if self.cube().position(AxisKind::To).is_none() {
            warn!("query data no longer have a 'to' dimension");
            return Ok(None);
        }

        let window = self.window();
        let buckets = bucket_count(window.len(), MONTHS_PER_YEAR);
        checked_cells(&[buckets], self.max_cells())?;
        let mut totals = vec![0.0; buckets];
        for (time, quantity) in self.store().received_by(receiver)? {
            if let Some(month) = window.index_of(time) {
                totals[month / MONTHS_PER_YEAR] += quantity;
            }
        }
        Ok(Some(totals))
    }
}
