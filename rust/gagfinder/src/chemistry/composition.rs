use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use std::fmt::Display;
use std::str::FromStr;

use super::codec::{
    SymbolCounts,
    decode,
    encode,
};
use crate::errors::FormulaError;

/// Ring-forming monosaccharide residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Residue {
    /// Unsaturated hexuronic acid, only found at the non-reducing end.
    D,
    /// Hexuronic acid.
    U,
    /// Hexose.
    X,
    /// Hexosamine.
    N,
}

impl Residue {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'D' => Some(Residue::D),
            'U' => Some(Residue::U),
            'X' => Some(Residue::X),
            'N' => Some(Residue::N),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Residue::D => 'D',
            Residue::U => 'U',
            Residue::X => 'X',
            Residue::N => 'N',
        }
    }
}

/// Monosaccharide composition of a GAG chain or fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Composition {
    pub d: i32,
    pub u: i32,
    pub x: i32,
    pub n: i32,
    /// Acetyl groups.
    pub a: i32,
    /// Sulfate groups.
    pub s: i32,
}

impl Composition {
    pub fn residue_count(&self, residue: Residue) -> i32 {
        match residue {
            Residue::D => self.d,
            Residue::U => self.u,
            Residue::X => self.x,
            Residue::N => self.n,
        }
    }

    /// Number of complete rings.
    pub fn chain_length(&self) -> i32 {
        self.d + self.u + self.x + self.n
    }

    /// Acidic groups able to carry a metal: sulfates and carboxylates.
    pub fn acidic_sites(&self) -> i32 {
        self.s + self.u + self.d
    }
}

impl SymbolCounts for Composition {
    const KIND: &'static str = "composition";
    const SYMBOLS: &'static [&'static str] = &["D", "U", "X", "N", "A", "S"];

    fn count_at(&self, index: usize) -> i32 {
        [self.d, self.u, self.x, self.n, self.a, self.s][index]
    }

    fn count_at_mut(&mut self, index: usize) -> &mut i32 {
        match index {
            0 => &mut self.d,
            1 => &mut self.u,
            2 => &mut self.x,
            3 => &mut self.n,
            4 => &mut self.a,
            _ => &mut self.s,
        }
    }
}

impl Display for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for Composition {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for Composition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(self))
    }
}

impl<'de> Deserialize<'de> for Composition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let c: Composition = "D1U2N3A1S4".parse().unwrap();
        assert_eq!(c.chain_length(), 6);
        assert_eq!(c.acidic_sites(), 7);
        assert_eq!(c.residue_count(Residue::N), 3);
        assert_eq!(c.to_string(), "DU2N3AS4");
    }
}
