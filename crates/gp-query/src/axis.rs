//! Axis descriptors.

use gp_catalog::{AxisKind, AxisSpec};

/// One dimension of a cube: its name, unit, and index -> label mapping.
///
/// Name, unit and labels travel together so a collapse can never remove one
/// without the others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Axis {
    pub kind: AxisKind,
    pub unit: String,
    pub labels: Vec<i64>,
}

impl Axis {
    pub fn new(kind: AxisKind, unit: impl Into<String>, labels: Vec<i64>) -> Self {
        Self {
            kind,
            unit: unit.into(),
            labels,
        }
    }

    /// Descriptor with no labels yet.
    pub fn from_spec(spec: &AxisSpec) -> Self {
        Self::new(spec.kind, spec.unit, Vec::new())
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Array index of `label` along this axis.
    pub fn index_of(&self, label: i64) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// Same labels and unit under a different name.
    pub fn renamed(&self, kind: AxisKind) -> Self {
        Self {
            kind,
            unit: self.unit.clone(),
            labels: self.labels.clone(),
        }
    }
}
