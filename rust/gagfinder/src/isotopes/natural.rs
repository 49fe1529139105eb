use rustyms::MolecularFormula;

use super::{
    IsotopeCalculator,
    IsotopePeak,
};
use crate::chemistry::{
    Element,
    ElementalFormula,
    PROTON_MASS,
};
use crate::errors::IsotopeError;

/// Binomial tail cut-off handed to rustyms.
const DISTRIBUTION_THRESHOLD: f64 = 1e-12;

/// Spacing between consecutive nominal offsets (13C - 12C).
const ISOTOPE_SPACING: f64 = 1.0033548353399997;

fn ms_element(element: Element) -> rustyms::Element {
    match element {
        Element::C => rustyms::Element::C,
        Element::H => rustyms::Element::H,
        Element::O => rustyms::Element::O,
        Element::N => rustyms::Element::N,
        Element::S => rustyms::Element::S,
        Element::Na => rustyms::Element::Na,
        Element::K => rustyms::Element::K,
        Element::Li => rustyms::Element::Li,
        Element::Ca => rustyms::Element::Ca,
        Element::Mg => rustyms::Element::Mg,
    }
}

fn to_molecular_formula(formula: &ElementalFormula) -> Option<MolecularFormula> {
    let mut out = MolecularFormula::default();
    for element in Element::ALL {
        let count = formula.count(element);
        if count != 0 && !out.add((ms_element(element), None, count)) {
            return None;
        }
    }
    Some(out)
}

/// Isotope patterns from natural isotopic abundances.
///
/// Relative abundances come from rustyms; peak `k` sits at the
/// monoisotopic mass plus `k` times the 13C spacing.
///
/// ```
/// use gagfinder::chemistry::ElementalFormula;
/// use gagfinder::isotopes::{
///     IsotopeCalculator,
///     NaturalAbundanceCalculator,
/// };
///
/// let water: ElementalFormula = "H2O".parse().unwrap();
/// let pattern = NaturalAbundanceCalculator
///     .isotope_pattern(&water, 1)
///     .unwrap();
/// assert!((pattern[0].mz - 19.01784).abs() < 1e-4);
/// assert!(pattern[0].intensity > 0.99);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalAbundanceCalculator;

impl IsotopeCalculator for NaturalAbundanceCalculator {
    fn isotope_pattern(
        &self,
        formula: &ElementalFormula,
        charge: i32,
    ) -> Result<Vec<IsotopePeak>, IsotopeError> {
        if charge == 0 {
            return Err(IsotopeError::ZeroCharge);
        }
        if !formula.is_valid() {
            return Err(IsotopeError::InvalidFormula(formula.to_string()));
        }
        let molecular = to_molecular_formula(formula)
            .ok_or_else(|| IsotopeError::InvalidFormula(formula.to_string()))?;
        let distribution = molecular.isotopic_distribution(DISTRIBUTION_THRESHOLD);

        // The distribution starts at the lightest isotope of every element.
        // Only lithium has one below its monoisotopic (7Li) mass, and those
        // offsets are dropped.
        let lighter = formula.li.max(0) as usize;
        let mono = formula.monoisotopic_mass();
        let kept: Vec<(f64, f64)> = distribution
            .iter()
            .copied()
            .enumerate()
            .skip(lighter)
            .filter(|(_, p)| *p > 0.0)
            .map(|(i, p)| (p, mono + (i - lighter) as f64 * ISOTOPE_SPACING))
            .collect();
        let total: f64 = kept.iter().map(|(p, _)| p).sum();
        if total <= 0.0 {
            return Err(IsotopeError::InvalidFormula(formula.to_string()));
        }

        let z = charge as f64;
        let abs_z = z.abs();
        Ok(kept
            .into_iter()
            .map(|(p, m)| IsotopePeak {
                mz: (m + z * PROTON_MASS) / abs_z,
                intensity: p / total,
            })
            .collect())
    }
}
