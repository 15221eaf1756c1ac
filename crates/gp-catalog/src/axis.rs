//! Axis name tokens.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Identity of one dimension of a query cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "from")]
    From,
    #[serde(rename = "to")]
    To,
    #[serde(rename = "iso")]
    Iso,
    #[serde(rename = "CompID")]
    CompId,
    #[serde(rename = "IsoID")]
    IsoId,
    /// Signed net flow through an actor, produced by collapsing `from` and `to` together.
    #[serde(rename = "thru")]
    Thru,
}

impl AxisKind {
    pub const ALL: [AxisKind; 7] = [
        AxisKind::Time,
        AxisKind::From,
        AxisKind::To,
        AxisKind::Iso,
        AxisKind::CompId,
        AxisKind::IsoId,
        AxisKind::Thru,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AxisKind::Time => "time",
            AxisKind::From => "from",
            AxisKind::To => "to",
            AxisKind::Iso => "iso",
            AxisKind::CompId => "CompID",
            AxisKind::IsoId => "IsoID",
            AxisKind::Thru => "thru",
        }
    }

    pub fn is_isotope(self) -> bool {
        matches!(self, AxisKind::Iso | AxisKind::IsoId)
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AxisKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AxisKind::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| CatalogError::UnknownAxis {
                name: s.to_string(),
            })
    }
}
