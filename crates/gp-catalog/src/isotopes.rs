//! Isotope codes and per-query isotope index maps.
//!
//! Codes follow the ZZZAAA convention (`92235` is U-235). A handful of
//! reference codes carry an extra trailing digit flagging a metastable state
//! (`952421` is Am-242m); [`ground_state`] strips it.

use std::collections::{BTreeSet, HashMap};

/// Reference isotope list used to seed material and resource queries.
///
/// Order is significant: it is the dense index order of the `iso` axis.
pub const KNOWN_ISOTOPES: [i64; 62] = [
    8016, 2004, 88226, 88228, 82206, 82207, 82208, 82210, 90228, 90229, 90230, 90232, 83209,
    89227, 91231, 92232, 92233, 92234, 92235, 92236, 92238, 93237, 94238, 94239, 94240, 94241,
    94242, 94244, 95241, 952421, 95243, 96242, 96243, 96244, 96245, 96246, 96247, 96248, 96250,
    98249, 98250, 98251, 98252, 1003, 6014, 60129, 36081, 36085, 360849, 38090, 380889, 43099,
    430989, 43097, 53129, 531279, 55134, 55135, 55137, 551339, 9992409, 8881159,
];

const METASTABLE_THRESHOLD: i64 = 200_000;

/// Strip a trailing metastable-state digit, if present.
pub fn ground_state(code: i64) -> i64 {
    if code > METASTABLE_THRESHOLD {
        code / 10
    } else {
        code
    }
}

/// Atomic number (Z) of an isotope code.
pub fn element(code: i64) -> i64 {
    ground_state(code) / 1000
}

/// Mass number (A) of an isotope code.
pub fn mass_number(code: i64) -> u32 {
    (ground_state(code) % 1000).unsigned_abs() as u32
}

/// Bidirectional isotope code <-> dense index map.
///
/// Each query owns its own instance.
#[derive(Clone, Debug, Default)]
pub struct IsotopeIndex {
    codes: Vec<i64>,
    index_of: HashMap<i64, usize>,
}

impl IsotopeIndex {
    /// Build from an ordered code list. Repeated codes keep their first index.
    pub fn from_codes<I: IntoIterator<Item = i64>>(codes: I) -> Self {
        let mut out = Self::default();
        for code in codes {
            if !out.index_of.contains_key(&code) {
                out.index_of.insert(code, out.codes.len());
                out.codes.push(code);
            }
        }
        out
    }

    /// Index seeded from [`KNOWN_ISOTOPES`].
    pub fn reference() -> Self {
        Self::from_codes(KNOWN_ISOTOPES)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn index_of(&self, code: i64) -> Option<usize> {
        self.index_of.get(&code).copied()
    }

    pub fn code_at(&self, index: usize) -> Option<i64> {
        self.codes.get(index).copied()
    }

    /// Codes in index order.
    pub fn codes(&self) -> &[i64] {
        &self.codes
    }
}

/// Selects isotopes by exact code or by element number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IsotopeFilter {
    All,
    Codes(BTreeSet<i64>),
}

impl IsotopeFilter {
    pub fn codes<I: IntoIterator<Item = i64>>(codes: I) -> Self {
        IsotopeFilter::Codes(codes.into_iter().collect())
    }

    /// Parse tokens such as `["92", "94239"]`; `All` (any case) matches everything.
    pub fn parse<'a, I: IntoIterator<Item = &'a str>>(tokens: I) -> Result<Self, String> {
        let mut set = BTreeSet::new();
        for token in tokens {
            let token = token.trim();
            if token.eq_ignore_ascii_case("all") {
                return Ok(IsotopeFilter::All);
            }
            let code = token
                .parse::<i64>()
                .map_err(|_| format!("invalid isotope or element code: {token}"))?;
            set.insert(code);
        }
        Ok(IsotopeFilter::Codes(set))
    }

    pub fn matches(&self, code: i64) -> bool {
        match self {
            IsotopeFilter::All => true,
            IsotopeFilter::Codes(set) => {
                set.contains(&code) || set.contains(&ground_state(code)) || set.contains(&element(code))
            }
        }
    }
}
