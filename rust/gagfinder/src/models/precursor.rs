use serde::{
    Deserialize,
    Serialize,
};

use super::class::GagClass;
use crate::chemistry::{
    Composition,
    ElementalFormula,
    MetalAdduct,
    PROTON_MASS,
};
use crate::errors::ConfigError;

/// Catalog entry resolved for the measured precursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Precursor {
    pub id: i64,
    pub class: GagClass,
    pub formula: ElementalFormula,
    pub composition: Composition,
    /// Neutral monoisotopic mass of the underivatized chain.
    pub mono_mass: f64,
}

/// What was measured for the precursor plus what was done to it chemically.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecursorQuery {
    pub class: GagClass,
    pub mz: f64,
    /// Signed charge, negative in negative ion mode.
    pub charge: i32,
    pub derivatization: Option<ElementalFormula>,
    pub adduct: Option<MetalAdduct>,
}

impl PrecursorQuery {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.charge == 0 {
            return Err(ConfigError::ZeroCharge);
        }
        if !(self.mz.is_finite() && self.mz > 0.0) {
            return Err(ConfigError::InvalidPrecursorMz(self.mz));
        }
        if matches!(self.adduct, Some(a) if a.count == 0) {
            return Err(ConfigError::EmptyAdduct);
        }
        Ok(())
    }

    /// Neutral mass of the measured ion, `mz * |z| - z * m_proton`.
    pub fn neutral_mass(&self) -> f64 {
        self.mz * self.charge.abs() as f64 - self.charge as f64 * PROTON_MASS
    }

    fn modification_mass(&self) -> f64 {
        let deriv = self
            .derivatization
            .map(|d| d.monoisotopic_mass())
            .unwrap_or(0.0);
        let adduct = self.adduct.map(|a| a.mass_shift()).unwrap_or(0.0);
        deriv + adduct
    }

    /// Mass to look up in the catalog: derivatization and metals removed.
    ///
    /// ```
    /// use gagfinder::models::{
    ///     GagClass,
    ///     PrecursorQuery,
    /// };
    ///
    /// let query = PrecursorQuery {
    ///     class: GagClass::HS,
    ///     mz: 176.548,
    ///     charge: -2,
    ///     derivatization: None,
    ///     adduct: None,
    /// };
    /// assert!((query.lookup_mass() - 355.1106).abs() < 1e-3);
    /// ```
    pub fn lookup_mass(&self) -> f64 {
        self.neutral_mass() - self.modification_mass()
    }

    /// Theoretical precursor m/z given the resolved catalog entry.
    pub fn theoretical_mz(&self, precursor: &Precursor) -> f64 {
        let z = self.charge as f64;
        (precursor.mono_mass + self.modification_mass() + z * PROTON_MASS) / z.abs()
    }

    /// Calibration error of the measured precursor, in ppm.
    pub fn ppm_error(&self, precursor: &Precursor) -> f64 {
        let theoretical = self.theoretical_mz(precursor);
        1e6 * (self.mz - theoretical) / theoretical
    }
}
