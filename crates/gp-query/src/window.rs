//! Half-open time windows in months.

use crate::error::{QueryError, QueryResult};

/// `[t0, tf)`: inclusive lower bound, exclusive upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    t0: i64,
    tf: i64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self { t0: 0, tf: 1200 }
    }
}

impl TimeWindow {
    /// `tf == t0` is a valid empty window; `tf < t0` is rejected, as is a
    /// width that does not fit in `i64`.
    pub fn new(t0: i64, tf: i64) -> QueryResult<Self> {
        if tf < t0 {
            return Err(QueryError::Configuration {
                message: format!("time window end {tf} precedes start {t0}"),
            });
        }
        let fits = tf
            .checked_sub(t0)
            .is_some_and(|width| usize::try_from(width).is_ok());
        if !fits {
            return Err(QueryError::Configuration {
                message: format!("time window [{t0}, {tf}) is too wide"),
            });
        }
        Ok(Self { t0, tf })
    }

    pub fn t0(&self) -> i64 {
        self.t0
    }

    pub fn tf(&self) -> i64 {
        self.tf
    }

    // Width fits in i64 and usize; checked in `new`.
    pub fn len(&self) -> usize {
        (self.tf - self.t0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.tf == self.t0
    }

    pub fn contains(&self, t: i64) -> bool {
        t >= self.t0 && t < self.tf
    }

    /// Dense time index of `t`, if inside the window.
    pub fn index_of(&self, t: i64) -> Option<usize> {
        self.contains(t).then(|| (t - self.t0) as usize)
    }

    /// Time axis labels: every month in the window.
    pub fn labels(&self) -> Vec<i64> {
        (self.t0..self.tf).collect()
    }
}
