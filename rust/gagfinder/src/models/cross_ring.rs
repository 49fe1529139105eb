use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use super::class::GagClass;
use crate::chemistry::Residue;
use crate::errors::CatalogError;

/// Which side of the broken ring the fragment keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResidueEnd {
    NonReducing,
    Reducing,
}

impl ResidueEnd {
    pub fn code(&self) -> &'static str {
        match self {
            ResidueEnd::NonReducing => "NR",
            ResidueEnd::Reducing => "RE",
        }
    }
}

/// Cross-ring cleavage annotation, written as `<residue><NR|RE><a,b>`, e.g. `URE0,2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CrossRingSite {
    pub residue: Residue,
    pub end: ResidueEnd,
    /// Broken ring bonds, e.g. `0,2`.
    pub cleavage: String,
}

impl Display for CrossRingSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.residue.symbol(),
            self.end.code(),
            self.cleavage
        )
    }
}

impl FromStr for CrossRingSite {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidCrossRing(s.to_string());
        let mut chars = s.chars();
        let residue = chars
            .next()
            .and_then(Residue::from_symbol)
            .ok_or_else(invalid)?;
        let rest = chars.as_str();
        let end = if let Some(stripped) = rest.strip_prefix("NR") {
            (ResidueEnd::NonReducing, stripped)
        } else if let Some(stripped) = rest.strip_prefix("RE") {
            (ResidueEnd::Reducing, stripped)
        } else {
            return Err(invalid());
        };
        let cleavage = end.1;
        let well_formed = cleavage
            .split_once(',')
            .map(|(a, b)| {
                !a.is_empty()
                    && !b.is_empty()
                    && a.bytes().all(|c| c.is_ascii_digit())
                    && b.bytes().all(|c| c.is_ascii_digit())
            })
            .unwrap_or(false);
        if !well_formed {
            return Err(invalid());
        }
        Ok(Self {
            residue,
            end: end.0,
            cleavage: cleavage.to_string(),
        })
    }
}

type TableRow = (GagClass, Residue, ResidueEnd, &'static str, i32);

use GagClass::{
    CS,
    HS,
    KS,
};
use Residue::{
    D,
    N,
    U,
    X,
};
use ResidueEnd::{
    NonReducing as NR,
    Reducing as RE,
};

#[rustfmt::skip]
const RETAINED_CARBOXYLS: &[TableRow] = &[
    // (class, residue, end, cleavage, carboxyls)
    (HS, U, NR, "0,2", 1), (HS, U, NR, "1,5", 1), (HS, U, NR, "2,4", 0),
    (HS, U, NR, "3,5", 1), (HS, U, NR, "0,3", 1), (HS, U, NR, "1,4", 0),
    (HS, U, NR, "2,5", 1),
    (HS, U, RE, "0,2", 0), (HS, U, RE, "1,5", 0), (HS, U, RE, "2,4", 1),
    (HS, U, RE, "3,5", 0), (HS, U, RE, "0,3", 0), (HS, U, RE, "1,4", 1),
    (HS, U, RE, "2,5", 0),
    (HS, D, RE, "0,2", 0), (HS, D, RE, "1,5", 0), (HS, D, RE, "2,4", 1),
    (HS, D, RE, "3,5", 0), (HS, D, RE, "0,3", 0), (HS, D, RE, "1,4", 1),
    (HS, D, RE, "2,5", 0),
    (HS, N, NR, "0,2", 0), (HS, N, NR, "1,5", 0), (HS, N, NR, "2,4", 0),
    (HS, N, NR, "3,5", 0), (HS, N, NR, "0,3", 0), (HS, N, NR, "1,4", 0),
    (HS, N, NR, "2,5", 0),
    (HS, N, RE, "0,2", 0), (HS, N, RE, "1,5", 0), (HS, N, RE, "2,4", 0),
    (HS, N, RE, "3,5", 0), (HS, N, RE, "0,3", 0), (HS, N, RE, "1,4", 0),
    (HS, N, RE, "2,5", 0),

    (CS, U, NR, "0,2", 1), (CS, U, NR, "1,5", 1), (CS, U, NR, "2,4", 0),
    (CS, U, NR, "3,5", 1), (CS, U, NR, "0,3", 1), (CS, U, NR, "1,4", 0),
    (CS, U, NR, "2,5", 1),
    (CS, U, RE, "0,2", 0), (CS, U, RE, "1,5", 0), (CS, U, RE, "2,4", 1),
    (CS, U, RE, "3,5", 0), (CS, U, RE, "0,3", 0), (CS, U, RE, "1,4", 1),
    (CS, U, RE, "2,5", 0),
    (CS, D, RE, "0,2", 0), (CS, D, RE, "1,5", 0), (CS, D, RE, "2,4", 1),
    (CS, D, RE, "3,5", 0), (CS, D, RE, "0,3", 0), (CS, D, RE, "1,4", 1),
    (CS, D, RE, "2,5", 0),
    (CS, N, NR, "0,2", 0), (CS, N, NR, "1,3", 0), (CS, N, NR, "1,5", 0),
    (CS, N, NR, "2,4", 0), (CS, N, NR, "1,4", 0), (CS, N, NR, "2,5", 0),
    (CS, N, RE, "0,2", 0), (CS, N, RE, "1,3", 0), (CS, N, RE, "1,5", 0),
    (CS, N, RE, "2,4", 0), (CS, N, RE, "1,4", 0), (CS, N, RE, "2,5", 0),

    (KS, X, NR, "0,2", 0), (KS, X, NR, "1,3", 0), (KS, X, NR, "1,5", 0),
    (KS, X, NR, "2,4", 0), (KS, X, NR, "1,4", 0), (KS, X, NR, "2,5", 0),
    (KS, X, RE, "0,2", 0), (KS, X, RE, "1,3", 0), (KS, X, RE, "1,5", 0),
    (KS, X, RE, "2,4", 0), (KS, X, RE, "1,4", 0), (KS, X, RE, "2,5", 0),
    (KS, N, NR, "0,2", 0), (KS, N, NR, "1,5", 0), (KS, N, NR, "2,4", 0),
    (KS, N, NR, "3,5", 0), (KS, N, NR, "0,3", 0), (KS, N, NR, "1,4", 0),
    (KS, N, NR, "2,5", 0),
    (KS, N, RE, "0,2", 0), (KS, N, RE, "1,5", 0), (KS, N, RE, "2,4", 0),
    (KS, N, RE, "3,5", 0), (KS, N, RE, "0,3", 0), (KS, N, RE, "1,4", 0),
    (KS, N, RE, "2,5", 0),
];

/// Read-only lookup of the carboxyl groups kept by each cross-ring piece,
/// per GAG class. Build once and share by reference.
#[derive(Debug, Clone)]
pub struct CrossRingTable {
    entries: HashMap<(GagClass, Residue, ResidueEnd), HashMap<&'static str, i32>>,
}

impl CrossRingTable {
    pub fn standard() -> Self {
        let mut entries: HashMap<_, HashMap<_, _>> = HashMap::new();
        for &(class, residue, end, cleavage, carboxyls) in RETAINED_CARBOXYLS {
            entries
                .entry((class, residue, end))
                .or_default()
                .insert(cleavage, carboxyls);
        }
        Self { entries }
    }

    /// Carboxyls retained by the piece, `None` when the site is not tabulated.
    pub fn carboxyls(&self, class: GagClass, site: &CrossRingSite) -> Option<i32> {
        self.entries
            .get(&(class, site.residue, site.end))
            .and_then(|by_cleavage| by_cleavage.get(site.cleavage.as_str()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|x| x.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CrossRingTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_site() {
        let site: CrossRingSite = "URE0,2".parse().unwrap();
        assert_eq!(site.residue, Residue::U);
        assert_eq!(site.end, ResidueEnd::Reducing);
        assert_eq!(site.cleavage, "0,2");
        assert_eq!(site.to_string(), "URE0,2");

        let site: CrossRingSite = "NNR1,5".parse().unwrap();
        assert_eq!(site.end, ResidueEnd::NonReducing);

        for bad in ["", "QRE0,2", "UXX0,2", "URE02", "URE0,", "URE,2"] {
            assert!(bad.parse::<CrossRingSite>().is_err(), "{} should fail", bad);
        }
    }

    #[test]
    fn test_table_lookups() {
        let table = CrossRingTable::standard();
        assert_eq!(table.len(), RETAINED_CARBOXYLS.len());
        let site: CrossRingSite = "UNR1,5".parse().unwrap();
        assert_eq!(table.carboxyls(GagClass::HS, &site), Some(1));
        let site: CrossRingSite = "URE1,5".parse().unwrap();
        assert_eq!(table.carboxyls(GagClass::HS, &site), Some(0));
        let site: CrossRingSite = "NRE2,5".parse().unwrap();
        assert_eq!(table.carboxyls(GagClass::KS, &site), Some(0));
        // Unsaturated residues are only ever cleaved at the reducing side
        let site: CrossRingSite = "DNR0,2".parse().unwrap();
        assert!(table.carboxyls(GagClass::CS, &site).is_none());
    }
}
