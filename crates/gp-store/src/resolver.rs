//! Entity resolution: the sorted identity lists that fix dense index order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rusqlite::{Connection, Params, params};

use crate::{StoreError, StoreResult};

pub const CONTAMINANT_TABLE: &str = "gen_repo_contaminants";

/// Raw identity -> dense index, built once from a resolver list.
#[derive(Clone, Debug, Default)]
pub struct IndexMap {
    ids: Vec<i64>,
    index_of: HashMap<i64, usize>,
}

impl IndexMap {
    /// `ids` must already be in canonical order; duplicates keep their first index.
    pub fn from_ids(ids: Vec<i64>) -> Self {
        let mut index_of = HashMap::with_capacity(ids.len());
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if let std::collections::hash_map::Entry::Vacant(e) = index_of.entry(id) {
                e.insert(unique.len());
                unique.push(id);
            }
        }
        Self {
            ids: unique,
            index_of,
        }
    }

    pub fn get(&self, id: i64) -> Option<usize> {
        self.index_of.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }
}

/// Distinct-value lookups against the store.
pub struct Resolver<'a> {
    conn: &'a Connection,
}

impl<'a> Resolver<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Agents that sent or received anything and whose activity overlaps `[t0, tf)`.
    ///
    /// Overlap rule: `EnterDate + LeaveDate > t0` and `EnterDate <= tf`.
    pub fn resolve_actors(&self, t0: i64, tf: i64) -> StoreResult<Vec<i64>> {
        self.distinct_ids(
            "SELECT DISTINCT Agents.ID FROM Agents, Transactions \
             WHERE Agents.EnterDate + Agents.LeaveDate > ?1 \
             AND Agents.EnterDate <= ?2 \
             AND (Agents.ID = Transactions.SenderID OR Agents.ID = Transactions.ReceiverID)",
            params![t0, tf],
        )
    }

    /// Repository components, provided any contaminant records exist.
    pub fn resolve_components(&self) -> StoreResult<Vec<i64>> {
        self.distinct_ids(
            "SELECT DISTINCT gen_repo_components.CompID FROM gen_repo_components \
             WHERE EXISTS (SELECT 1 FROM gen_repo_contaminants)",
            [],
        )
    }

    /// Every `IsoID` present in `table`.
    pub fn resolve_short_isotope_list(&self, table: &str) -> StoreResult<Vec<i64>> {
        ensure_identifier(table)?;
        let sql = format!("SELECT DISTINCT {table}.IsoID FROM {table}");
        self.distinct_ids(&sql, [])
    }

    /// Component id -> component type; the first type seen for an id wins.
    pub fn component_types(&self) -> StoreResult<BTreeMap<i64, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT gen_repo_components.CompID, gen_repo_components.Type FROM gen_repo_components")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut out = BTreeMap::new();
        for row in rows {
            let (id, kind) = row?;
            out.entry(id).or_insert(kind);
        }
        Ok(out)
    }

    fn distinct_ids<P: Params>(&self, sql: &str, params: P) -> StoreResult<Vec<i64>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| row.get::<_, i64>(0))?;
        let mut ids = BTreeSet::new();
        for id in rows {
            ids.insert(id?);
        }
        Ok(ids.into_iter().collect())
    }
}

fn ensure_identifier(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}
