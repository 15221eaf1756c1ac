//! Per-kind axis and unit templates.

use crate::axis::AxisKind;
use crate::kind::QueryKind;

/// One array axis as laid out by a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSpec {
    pub kind: AxisKind,
    pub unit: &'static str,
}

/// The measured value stored in each cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantitySpec {
    pub name: &'static str,
    pub unit: &'static str,
}

/// Ordered axis layout plus the cell quantity for a query kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisTemplate {
    pub axes: Vec<AxisSpec>,
    pub quantity: QuantitySpec,
}

const fn spec(kind: AxisKind, unit: &'static str) -> AxisSpec {
    AxisSpec { kind, unit }
}

impl AxisTemplate {
    pub fn for_kind(kind: QueryKind) -> Self {
        match kind {
            QueryKind::Material => Self {
                axes: vec![
                    spec(AxisKind::Time, "months"),
                    spec(AxisKind::From, "agentID"),
                    spec(AxisKind::To, "agentID"),
                    spec(AxisKind::Iso, "tons"),
                ],
                quantity: QuantitySpec {
                    name: "value",
                    unit: "tons",
                },
            },
            QueryKind::Resource => Self {
                axes: vec![
                    spec(AxisKind::Time, "months"),
                    spec(AxisKind::From, "agentID"),
                    spec(AxisKind::To, "agentID"),
                ],
                quantity: QuantitySpec {
                    name: "Quantity",
                    unit: "units",
                },
            },
            // MassKG is the cell value, not a fourth array axis.
            QueryKind::Contaminants => Self {
                axes: vec![
                    spec(AxisKind::Time, "months"),
                    spec(AxisKind::CompId, "CompID"),
                    spec(AxisKind::IsoId, "IsoID"),
                ],
                quantity: QuantitySpec {
                    name: "MassKG",
                    unit: "kg",
                },
            },
        }
    }

    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    pub fn axis_names(&self) -> Vec<&'static str> {
        self.axes.iter().map(|a| a.kind.name()).collect()
    }

    pub fn units(&self) -> Vec<&'static str> {
        self.axes.iter().map(|a| a.unit).collect()
    }

    /// Axis names followed by the quantity name when it is reported as a
    /// trailing dimension (contaminants only).
    pub fn catalog_names(&self) -> Vec<&'static str> {
        let mut names = self.axis_names();
        if self.quantity.name == "MassKG" {
            names.push(self.quantity.name);
        }
        names
    }

    /// Units matching [`AxisTemplate::catalog_names`].
    pub fn catalog_units(&self) -> Vec<&'static str> {
        let mut units = self.units();
        if self.quantity.name == "MassKG" {
            units.push(self.quantity.unit);
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_template() {
        let t = AxisTemplate::for_kind(QueryKind::Material);
        assert_eq!(t.axis_names(), vec!["time", "from", "to", "iso"]);
        assert_eq!(t.units(), vec!["months", "agentID", "agentID", "tons"]);
        assert_eq!(t.rank(), 4);
    }

    #[test]
    fn resource_template() {
        let t = AxisTemplate::for_kind(QueryKind::Resource);
        assert_eq!(t.axis_names(), vec!["time", "from", "to"]);
        assert_eq!(t.units(), vec!["months", "agentID", "agentID"]);
        assert_eq!(t.catalog_names(), t.axis_names());
    }

    #[test]
    fn contaminants_template_reports_mass_as_quantity() {
        let t = AxisTemplate::for_kind(QueryKind::Contaminants);
        assert_eq!(t.rank(), 3);
        assert_eq!(t.catalog_names(), vec!["time", "CompID", "IsoID", "MassKG"]);
        assert_eq!(t.catalog_units(), vec!["months", "CompID", "IsoID", "kg"]);
    }
}
