//! Query construction and execution.

use std::path::Path;

use gp_catalog::{AxisKind, AxisTemplate, IsotopeIndex, QueryKind};
use gp_core::ensure_finite;
use gp_store::resolver::CONTAMINANT_TABLE;
use gp_store::{IndexMap, Statement, Store};
use ndarray::ArrayD;
use tracing::{debug, warn};

use crate::axis::Axis;
use crate::cube::{DEFAULT_MAX_CELLS, DataCube, checked_cells};
use crate::error::{QueryError, QueryResult};
use crate::window::TimeWindow;

/// Counts from one execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub shape: Vec<usize>,
}

/// The starting statement for a query kind over a window.
///
/// Window bounds are written into the WHERE clause literally.
pub fn initial_statement(kind: QueryKind, window: TimeWindow) -> Statement {
    let (t0, tf) = (window.t0(), window.tf());
    match kind {
        QueryKind::Material => Statement::new(
            "Transactions.Time, Transactions.SenderID, Transactions.ReceiverID, \
             IsotopicStates.IsoID, IsotopicStates.value",
            "Transactions, IsotopicStates",
        )
        .with_where(format!(
            "Transactions.ID = IsotopicStates.TransactionID AND \
             Transactions.Time >= {t0} AND Transactions.Time < {tf}"
        )),
        QueryKind::Resource => Statement::new(
            "Transactions.Time, Transactions.SenderID, Transactions.ReceiverID, \
             TransactedResources.Quantity",
            "Transactions, TransactedResources",
        )
        .with_where(format!(
            "Transactions.ID = TransactedResources.TransactionID AND \
             Transactions.Time >= {t0} AND Transactions.Time < {tf}"
        )),
        QueryKind::Contaminants => Statement::new(
            "gen_repo_contaminants.Time, gen_repo_contaminants.CompID, \
             gen_repo_contaminants.IsoID, gen_repo_contaminants.MassKG",
            "gen_repo_contaminants",
        )
        .with_where(format!(
            "gen_repo_contaminants.Time >= {t0} AND gen_repo_contaminants.Time < {tf}"
        )),
    }
}

/// Raw key -> dense index for one axis during scatter.
enum KeyLookup {
    Time(TimeWindow),
    Entities(IndexMap),
    Isotopes(IsotopeIndex),
}

impl KeyLookup {
    fn index(&self, raw: i64) -> Option<usize> {
        match self {
            KeyLookup::Time(w) => w.index_of(raw),
            KeyLookup::Entities(m) => m.get(raw),
            KeyLookup::Isotopes(m) => m.index_of(raw),
        }
    }

    fn len(&self) -> usize {
        match self {
            KeyLookup::Time(w) => w.len(),
            KeyLookup::Entities(m) => m.len(),
            KeyLookup::Isotopes(m) => m.len(),
        }
    }

    fn labels(&self) -> Vec<i64> {
        match self {
            KeyLookup::Time(w) => w.labels(),
            KeyLookup::Entities(m) => m.ids().to_vec(),
            KeyLookup::Isotopes(m) => m.codes().to_vec(),
        }
    }
}

/// A query over one simulation output store.
///
/// Construction fixes the kind and window. [`Query::execute`] runs once and
/// fills the cube; transforms then reshape it in place.
pub struct Query {
    kind: QueryKind,
    window: TimeWindow,
    template: AxisTemplate,
    statement: Statement,
    store: Store,
    isotopes: IsotopeIndex,
    cube: DataCube,
    executed: bool,
    max_cells: usize,
}

impl Query {
    /// Open `path` read-only and build a query of the named kind over `[t0, tf)`.
    pub fn new(path: impl AsRef<Path>, kind: &str, t0: i64, tf: i64) -> QueryResult<Self> {
        let kind: QueryKind = kind.parse()?;
        let window = TimeWindow::new(t0, tf)?;
        Self::open(path, kind, window)
    }

    pub fn open(path: impl AsRef<Path>, kind: QueryKind, window: TimeWindow) -> QueryResult<Self> {
        let store = Store::open(path.as_ref())?;
        Ok(Self::with_store(store, kind, window))
    }

    pub fn with_store(store: Store, kind: QueryKind, window: TimeWindow) -> Self {
        let template = AxisTemplate::for_kind(kind);
        let isotopes = if kind.uses_reference_isotopes() {
            IsotopeIndex::reference()
        } else {
            IsotopeIndex::default()
        };
        Self {
            kind,
            window,
            statement: initial_statement(kind, window),
            cube: DataCube::empty(&template),
            template,
            store,
            isotopes,
            executed: false,
            max_cells: DEFAULT_MAX_CELLS,
        }
    }

    /// Cap on the number of cells `execute` may allocate.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn t0(&self) -> i64 {
        self.window.t0()
    }

    pub fn tf(&self) -> i64 {
        self.window.tf()
    }

    pub fn template(&self) -> &AxisTemplate {
        &self.template
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Edit the statement; only allowed before execution.
    pub fn statement_mut(&mut self) -> QueryResult<&mut Statement> {
        if self.executed {
            return Err(QueryError::Sequencing {
                what: "the statement cannot change after query execution",
            });
        }
        Ok(&mut self.statement)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn is_executed(&self) -> bool {
        self.executed
    }

    pub fn isotopes(&self) -> &IsotopeIndex {
        &self.isotopes
    }

    pub fn cube(&self) -> &DataCube {
        &self.cube
    }

    pub fn values(&self) -> &ArrayD<f64> {
        self.cube.values()
    }

    pub fn axes(&self) -> &[Axis] {
        self.cube.axes()
    }

    pub fn axis_names(&self) -> Vec<&'static str> {
        self.cube.axes().iter().map(Axis::name).collect()
    }

    pub fn labels(&self) -> Vec<&[i64]> {
        self.cube.axes().iter().map(|a| a.labels.as_slice()).collect()
    }

    pub fn units(&self) -> Vec<&str> {
        self.cube.axes().iter().map(|a| a.unit.as_str()).collect()
    }

    pub(crate) fn replace_cube(&mut self, cube: DataCube) {
        self.cube = cube;
    }

    /// Execute if needed, then return the array.
    pub fn data(&mut self) -> QueryResult<&ArrayD<f64>> {
        if !self.executed {
            self.execute()?;
        }
        Ok(self.cube.values())
    }

    /// Run the statement once and scatter-accumulate its rows into a new cube.
    ///
    /// Nothing on `self` changes unless every step succeeds.
    pub fn execute(&mut self) -> QueryResult<ExecutionReport> {
        if self.executed {
            return Err(QueryError::Sequencing {
                what: "query already executed",
            });
        }

        let (lookups, isotopes) = self.resolve_lookups()?;
        // Size check before any labels are materialized.
        let shape: Vec<usize> = lookups.iter().map(KeyLookup::len).collect();
        checked_cells(&shape, self.max_cells)?;
        let axes: Vec<Axis> = self
            .template
            .axes
            .iter()
            .zip(&lookups)
            .map(|(spec, lookup)| Axis::new(spec.kind, spec.unit, lookup.labels()))
            .collect();
        let mut cube = DataCube::allocate(axes, self.max_cells)?;
        debug!(kind = %self.kind, shape = ?cube.shape(), "allocated query cube");

        let sql = self.statement.render();
        let rows = self.store.query_keyed_rows(&sql, lookups.len())?;

        let mut coord = vec![0usize; lookups.len()];
        let mut skipped = 0usize;
        for row in &rows {
            let value = ensure_finite(row.value, "row value")?;
            let resolved = row
                .keys
                .iter()
                .zip(&lookups)
                .zip(coord.iter_mut())
                .all(|((&raw, lookup), slot)| match lookup.index(raw) {
                    Some(i) => {
                        *slot = i;
                        true
                    }
                    None => false,
                });
            if !(resolved && cube.add_at(&coord, value)) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(
                skipped,
                total = rows.len(),
                "rows fell outside the window or referenced unknown entities"
            );
        }

        let report = ExecutionReport {
            rows_read: rows.len(),
            rows_skipped: skipped,
            shape: cube.shape().to_vec(),
        };
        self.cube = cube;
        self.isotopes = isotopes;
        self.executed = true;
        Ok(report)
    }

    fn resolve_lookups(&self) -> QueryResult<(Vec<KeyLookup>, IsotopeIndex)> {
        let resolver = self.store.resolver();
        let mut isotopes = self.isotopes.clone();
        let mut actors: Option<IndexMap> = None;
        let mut lookups = Vec::with_capacity(self.template.rank());

        for spec in &self.template.axes {
            let lookup = match spec.kind {
                AxisKind::Time => KeyLookup::Time(self.window),
                AxisKind::From | AxisKind::To => {
                    if actors.is_none() {
                        let ids = resolver.resolve_actors(self.window.t0(), self.window.tf())?;
                        actors = Some(IndexMap::from_ids(ids));
                    }
                    KeyLookup::Entities(actors.clone().unwrap_or_default())
                }
                AxisKind::CompId => KeyLookup::Entities(IndexMap::from_ids(resolver.resolve_components()?)),
                AxisKind::Iso => KeyLookup::Isotopes(isotopes.clone()),
                AxisKind::IsoId => {
                    isotopes = IsotopeIndex::from_codes(resolver.resolve_short_isotope_list(CONTAMINANT_TABLE)?);
                    KeyLookup::Isotopes(isotopes.clone())
                }
                AxisKind::Thru => {
                    return Err(QueryError::Configuration {
                        message: "a query template cannot start with a thru axis".to_string(),
                    });
                }
            };
            lookups.push(lookup);
        }
        Ok((lookups, isotopes))
    }
}
