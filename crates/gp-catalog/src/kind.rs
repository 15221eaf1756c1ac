//! Query kinds.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// The three record families a query can be built over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Isotopic content of each transaction: time x from x to x iso.
    Material,
    /// Bulk transacted quantity: time x from x to.
    Resource,
    /// Repository contaminant masses: time x component x isotope.
    Contaminants,
}

impl QueryKind {
    pub const ALL: [QueryKind; 3] = [
        QueryKind::Material,
        QueryKind::Resource,
        QueryKind::Contaminants,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QueryKind::Material => "material",
            QueryKind::Resource => "resource",
            QueryKind::Contaminants => "contaminants",
        }
    }

    /// Whether the query carries `from`/`to` actor axes.
    pub fn has_actor_axes(self) -> bool {
        matches!(self, QueryKind::Material | QueryKind::Resource)
    }

    /// Whether the isotope index is seeded from the fixed reference list.
    pub fn uses_reference_isotopes(self) -> bool {
        matches!(self, QueryKind::Material | QueryKind::Resource)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueryKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownQueryKind {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("material".parse::<QueryKind>().unwrap(), QueryKind::Material);
        assert_eq!("resource".parse::<QueryKind>().unwrap(), QueryKind::Resource);
        assert_eq!(
            "contaminants".parse::<QueryKind>().unwrap(),
            QueryKind::Contaminants
        );
    }

    #[test]
    fn actor_axes_match_templates() {
        use crate::{AxisKind, AxisTemplate};
        for kind in [QueryKind::Material, QueryKind::Resource, QueryKind::Contaminants] {
            let has_from = AxisTemplate::for_kind(kind)
                .axes
                .iter()
                .any(|a| a.kind == AxisKind::From);
            assert_eq!(kind.has_actor_axes(), has_from, "{kind}");
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "Material".parse::<QueryKind>().unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownQueryKind {
                name: "Material".to_string()
            }
        );
        assert!(err.to_string().contains("not a recognized query type"));
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&QueryKind::Contaminants).unwrap();
        assert_eq!(json, "\"contaminants\"");
        let back: QueryKind = serde_json::from_str("\"resource\"").unwrap();
        assert_eq!(back, QueryKind::Resource);
    }
}
