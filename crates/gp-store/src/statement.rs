//! SQL statement construction.
//!
//! Fragments are stored verbatim without escaping; callers are trusted.

use core::fmt;

/// A SELECT statement held as independently replaceable clause fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    select: String,
    from: String,
    where_clause: Option<String>,
    order: Option<String>,
}

impl Statement {
    /// Clause text without the `SELECT`/`FROM` keywords.
    pub fn new(select: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            from: from.into(),
            where_clause: None,
            order: None,
        }
    }

    pub fn with_where(mut self, conditions: impl Into<String>) -> Self {
        self.where_clause = Some(conditions.into());
        self
    }

    pub fn with_order(mut self, sorting: impl Into<String>) -> Self {
        self.order = Some(sorting.into());
        self
    }

    pub fn replace_select(&mut self, columns: impl Into<String>) {
        self.select = columns.into();
    }

    pub fn replace_from(&mut self, tables: impl Into<String>) {
        self.from = tables.into();
    }

    pub fn replace_where(&mut self, conditions: impl Into<String>) {
        self.where_clause = Some(conditions.into());
    }

    pub fn replace_order(&mut self, sorting: impl Into<String>) {
        self.order = Some(sorting.into());
    }

    pub fn clear_where(&mut self) {
        self.where_clause = None;
    }

    pub fn clear_order(&mut self) {
        self.order = None;
    }

    pub fn select_clause(&self) -> &str {
        &self.select
    }

    pub fn from_clause(&self) -> &str {
        &self.from
    }

    pub fn where_clause(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    pub fn order_clause(&self) -> Option<&str> {
        self.order.as_deref()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.select.trim(), self.from.trim())?;
        if let Some(w) = &self.where_clause {
            write!(f, " WHERE {}", w.trim())?;
        }
        if let Some(o) = &self.order {
            write!(f, " ORDER BY {}", o.trim())?;
        }
        Ok(())
    }
}
