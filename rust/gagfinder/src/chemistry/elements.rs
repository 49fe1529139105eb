use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::FormulaError;

/// Mass of a proton, used to turn neutral masses into m/z.
pub const PROTON_MASS: f64 = 1.00727646677;

/// Mass of a hydrogen atom.
pub const HYDROGEN_MASS: f64 = 1.0078250322;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    C,
    H,
    O,
    N,
    S,
    Na,
    K,
    Li,
    Ca,
    Mg,
}

impl Element {
    /// Canonical serialization order of formulas.
    pub const ALL: [Element; 10] = [
        Element::C,
        Element::H,
        Element::O,
        Element::N,
        Element::S,
        Element::Na,
        Element::K,
        Element::Li,
        Element::Ca,
        Element::Mg,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::O => "O",
            Element::N => "N",
            Element::S => "S",
            Element::Na => "Na",
            Element::K => "K",
            Element::Li => "Li",
            Element::Ca => "Ca",
            Element::Mg => "Mg",
        }
    }

    /// Mass of the most abundant isotope.
    pub fn monoisotopic_mass(&self) -> f64 {
        match self {
            Element::C => 12.0,
            Element::H => HYDROGEN_MASS,
            Element::O => 15.994914620,
            Element::N => 14.003074004,
            Element::S => 31.972071174,
            Element::Na => 22.98976928,
            Element::K => 38.96370649,
            Element::Li => 7.01600344,
            Element::Ca => 39.9625909,
            Element::Mg => 23.98504170,
        }
    }
}

/// Metals that can replace a proton as an adduct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    Na,
    K,
    Li,
    Ca,
    Mg,
}

impl Metal {
    pub fn element(&self) -> Element {
        match self {
            Metal::Na => Element::Na,
            Metal::K => Element::K,
            Metal::Li => Element::Li,
            Metal::Ca => Element::Ca,
            Metal::Mg => Element::Mg,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.element().symbol()
    }
}

impl Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Metal {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Na" => Ok(Metal::Na),
            "K" => Ok(Metal::K),
            "Li" => Ok(Metal::Li),
            "Ca" => Ok(Metal::Ca),
            "Mg" => Ok(Metal::Mg),
            other => Err(FormulaError::UnknownMetal(other.to_string())),
        }
    }
}

/// `count` atoms of `metal` bound in place of as many protons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetalAdduct {
    pub metal: Metal,
    pub count: u32,
}

impl MetalAdduct {
    /// Mass change from swapping `count` hydrogens for the metal.
    pub fn mass_shift(&self) -> f64 {
        self.count as f64 * (self.metal.element().monoisotopic_mass() - HYDROGEN_MASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masses_follow_nominal_order() {
        let mut masses: Vec<f64> = Element::ALL.iter().map(|e| e.monoisotopic_mass()).collect();
        assert!(masses.iter().all(|m| *m > 0.0));
        masses.sort_by(f64::total_cmp);
        assert_eq!(masses[0], HYDROGEN_MASS);
        assert!((Element::Ca.monoisotopic_mass() - 39.9625909).abs() < 1e-9);
    }

    #[test]
    fn test_metal_parsing() {
        assert_eq!("Na".parse::<Metal>().unwrap(), Metal::Na);
        assert_eq!(
            "Fe".parse::<Metal>(),
            Err(FormulaError::UnknownMetal("Fe".to_string()))
        );
        let adduct = MetalAdduct {
            metal: Metal::Na,
            count: 2,
        };
        assert!((adduct.mass_shift() - 2.0 * 21.9819442478).abs() < 1e-8);
    }
}
