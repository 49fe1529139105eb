use serde::Serialize;
use std::fmt::Display;

use super::class::GagClass;
use crate::chemistry::{
    Composition,
    Residue,
};

/// Residue found at one terminus, or `Unknown` when mass alone cannot tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EndResidue {
    Known(Residue),
    Unknown,
}

impl EndResidue {
    pub fn residue(&self) -> Option<Residue> {
        match self {
            EndResidue::Known(r) => Some(*r),
            EndResidue::Unknown => None,
        }
    }
}

impl Display for EndResidue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndResidue::Known(r) => write!(f, "{}", r.symbol()),
            EndResidue::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndAssignment {
    pub non_reducing: EndResidue,
    pub reducing: EndResidue,
}

impl EndAssignment {
    /// Assigns both termini of a chain from its composition.
    ///
    /// An unsaturated uronic acid can only sit at the non-reducing end. Without
    /// one, the more abundant backbone residue must cap both ends and a tie
    /// leaves both ends undetermined.
    ///
    /// ```
    /// use gagfinder::chemistry::{
    ///     Composition,
    ///     Residue,
    /// };
    /// use gagfinder::models::{
    ///     EndAssignment,
    ///     EndResidue,
    ///     GagClass,
    /// };
    ///
    /// let comp: Composition = "DU2N3S3".parse().unwrap();
    /// let ends = EndAssignment::resolve(&comp, GagClass::HS);
    /// assert_eq!(ends.non_reducing, EndResidue::Known(Residue::D));
    /// assert_eq!(ends.reducing, EndResidue::Known(Residue::N));
    /// ```
    pub fn resolve(composition: &Composition, class: GagClass) -> Self {
        if composition.d > 0 {
            let reducing = if composition.u == composition.n {
                Residue::U
            } else {
                Residue::N
            };
            return Self {
                non_reducing: EndResidue::Known(Residue::D),
                reducing: EndResidue::Known(reducing),
            };
        }
        let other = match class {
            GagClass::KS => (Residue::X, composition.x),
            GagClass::HS | GagClass::CS => (Residue::U, composition.u),
        };
        let both = match composition.n.cmp(&other.1) {
            std::cmp::Ordering::Greater => EndResidue::Known(Residue::N),
            std::cmp::Ordering::Less => EndResidue::Known(other.0),
            std::cmp::Ordering::Equal => EndResidue::Unknown,
        };
        Self {
            non_reducing: both,
            reducing: both,
        }
    }
}
