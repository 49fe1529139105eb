use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use std::fmt::Display;
use std::ops::{
    Add,
    Mul,
    Neg,
    Sub,
};
use std::str::FromStr;

use super::codec::{
    SymbolCounts,
    decode,
    encode,
};
use super::elements::{
    Element,
    Metal,
};
use crate::errors::FormulaError;

/// Elemental formula with a fixed set of elements.
///
/// Counts are signed so that losses can be expressed as formulas too;
/// only formulas passing [`ElementalFormula::is_valid`] describe real ions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementalFormula {
    pub c: i32,
    pub h: i32,
    pub o: i32,
    pub n: i32,
    pub s: i32,
    pub na: i32,
    pub k: i32,
    pub li: i32,
    pub ca: i32,
    pub mg: i32,
}

impl ElementalFormula {
    pub const WATER: Self = Self::chons(0, 2, 1, 0, 0);
    pub const CO2: Self = Self::chons(1, 0, 2, 0, 0);
    pub const SO3: Self = Self::chons(0, 0, 3, 0, 1);
    pub const HYDROGEN: Self = Self::chons(0, 1, 0, 0, 0);

    pub const fn chons(c: i32, h: i32, o: i32, n: i32, s: i32) -> Self {
        Self {
            c,
            h,
            o,
            n,
            s,
            na: 0,
            k: 0,
            li: 0,
            ca: 0,
            mg: 0,
        }
    }

    pub fn count(&self, element: Element) -> i32 {
        match element {
            Element::C => self.c,
            Element::H => self.h,
            Element::O => self.o,
            Element::N => self.n,
            Element::S => self.s,
            Element::Na => self.na,
            Element::K => self.k,
            Element::Li => self.li,
            Element::Ca => self.ca,
            Element::Mg => self.mg,
        }
    }

    pub fn count_mut(&mut self, element: Element) -> &mut i32 {
        match element {
            Element::C => &mut self.c,
            Element::H => &mut self.h,
            Element::O => &mut self.o,
            Element::N => &mut self.n,
            Element::S => &mut self.s,
            Element::Na => &mut self.na,
            Element::K => &mut self.k,
            Element::Li => &mut self.li,
            Element::Ca => &mut self.ca,
            Element::Mg => &mut self.mg,
        }
    }

    /// Replaces `count` hydrogens with `count` atoms of `metal`.
    pub fn with_metal(mut self, metal: Metal, count: i32) -> Self {
        *self.count_mut(metal.element()) += count;
        self.h -= count;
        self
    }

    /// True when the formula contains no metal.
    pub fn is_chons(&self) -> bool {
        self.na == 0 && self.k == 0 && self.li == 0 && self.ca == 0 && self.mg == 0
    }

    /// Non-negative everywhere and not empty.
    pub fn is_valid(&self) -> bool {
        let counts = Element::ALL.map(|e| self.count(e));
        counts.iter().all(|&n| n >= 0) && counts.iter().any(|&n| n > 0)
    }

    pub fn monoisotopic_mass(&self) -> f64 {
        Element::ALL
            .iter()
            .map(|e| self.count(*e) as f64 * e.monoisotopic_mass())
            .sum()
    }
}

impl SymbolCounts for ElementalFormula {
    const KIND: &'static str = "formula";
    const SYMBOLS: &'static [&'static str] = &["C", "H", "O", "N", "S", "Na", "K", "Li", "Ca", "Mg"];

    fn count_at(&self, index: usize) -> i32 {
        self.count(Element::ALL[index])
    }

    fn count_at_mut(&mut self, index: usize) -> &mut i32 {
        self.count_mut(Element::ALL[index])
    }
}

impl Add for ElementalFormula {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for e in Element::ALL {
            *out.count_mut(e) += rhs.count(e);
        }
        out
    }
}

impl Sub for ElementalFormula {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for ElementalFormula {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1
    }
}

impl Mul<i32> for ElementalFormula {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        let mut out = self;
        for e in Element::ALL {
            *out.count_mut(e) *= rhs;
        }
        out
    }
}

impl Display for ElementalFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for ElementalFormula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for ElementalFormula {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode(self))
    }
}

impl<'de> Deserialize<'de> for ElementalFormula {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode(&s).map_err(serde::de::Error::custom)
    }
}
