//! Theoretical isotope patterns and the truncated envelopes scored against spectra.

pub mod cache;
pub mod natural;

pub use cache::{
    EnvelopeCache,
    fragment_charges,
};
pub use natural::NaturalAbundanceCalculator;

use serde::Serialize;

use crate::chemistry::ElementalFormula;
use crate::errors::{
    ConfigError,
    IsotopeError,
};

pub const DEFAULT_TRUNCATION_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IsotopePeak {
    pub mz: f64,
    pub intensity: f64,
}

/// Turns a formula and a charge into an isotope pattern.
///
/// Implementations return peaks ascending by m/z, monoisotopic first,
/// with intensities summing to one.
pub trait IsotopeCalculator: Send + Sync {
    fn isotope_pattern(
        &self,
        formula: &ElementalFormula,
        charge: i32,
    ) -> Result<Vec<IsotopePeak>, IsotopeError>;
}

/// The most abundant head of an isotope pattern, renormalised to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsotopeEnvelope {
    pub charge: i32,
    peaks: Vec<IsotopePeak>,
}

pub fn check_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

impl IsotopeEnvelope {
    /// Keeps peaks until their cumulative intensity reaches `threshold`,
    /// including the peak that crosses it.
    ///
    /// ```
    /// use gagfinder::isotopes::{
    ///     IsotopeEnvelope,
    ///     IsotopePeak,
    /// };
    ///
    /// let pattern = [0.6, 0.3, 0.08, 0.02]
    ///     .iter()
    ///     .enumerate()
    ///     .map(|(i, &intensity)| IsotopePeak {
    ///         mz: 500.0 + i as f64,
    ///         intensity,
    ///     })
    ///     .collect();
    /// let env = IsotopeEnvelope::truncate(pattern, -1, 0.95);
    /// assert_eq!(env.len(), 3);
    /// assert!((env.intensities().sum::<f64>() - 1.0).abs() < 1e-12);
    /// ```
    pub fn truncate(pattern: Vec<IsotopePeak>, charge: i32, threshold: f64) -> Self {
        let mut cumulative = 0.0;
        let mut keep = 0;
        for peak in pattern.iter() {
            keep += 1;
            cumulative += peak.intensity;
            if cumulative >= threshold {
                break;
            }
        }
        let mut peaks = pattern;
        peaks.truncate(keep.max(1));
        let total: f64 = peaks.iter().map(|p| p.intensity).sum();
        if total > 0.0 {
            peaks.iter_mut().for_each(|p| p.intensity /= total);
        }
        Self { charge, peaks }
    }

    pub fn peaks(&self) -> &[IsotopePeak] {
        &self.peaks
    }

    pub fn monoisotopic(&self) -> Option<&IsotopePeak> {
        self.peaks.first()
    }

    pub fn intensities(&self) -> impl Iterator<Item = f64> + '_ {
        self.peaks.iter().map(|p| p.intensity)
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

pub fn build_envelope(
    calculator: &dyn IsotopeCalculator,
    formula: &ElementalFormula,
    charge: i32,
    threshold: f64,
) -> Result<IsotopeEnvelope, IsotopeError> {
    let pattern = calculator.isotope_pattern(formula, charge)?;
    if pattern.is_empty() {
        return Err(IsotopeError::InvalidFormula(formula.to_string()));
    }
    Ok(IsotopeEnvelope::truncate(pattern, charge, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(intensities: &[f64]) -> Vec<IsotopePeak> {
        intensities
            .iter()
            .enumerate()
            .map(|(i, &intensity)| IsotopePeak {
                mz: 300.0 + i as f64 * 0.5,
                intensity,
            })
            .collect()
    }

    #[test]
    fn test_crossing_peak_is_kept() {
        let env = IsotopeEnvelope::truncate(pattern(&[0.5, 0.46, 0.04]), -2, 0.95);
        assert_eq!(env.len(), 2);
        assert!((env.peaks()[0].intensity - 0.5 / 0.96).abs() < 1e-12);

        let env = IsotopeEnvelope::truncate(pattern(&[0.5, 0.44, 0.06]), -2, 0.95);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_monoisotopic_always_kept() {
        let env = IsotopeEnvelope::truncate(pattern(&[0.99, 0.01]), 1, 0.5);
        assert_eq!(env.len(), 1);
        assert_eq!(env.monoisotopic().unwrap().mz, 300.0);
        assert_eq!(env.peaks()[0].intensity, 1.0);
    }

    #[test]
    fn test_full_threshold_keeps_everything() {
        let env = IsotopeEnvelope::truncate(pattern(&[0.7, 0.2, 0.1]), 1, 1.0);
        assert_eq!(env.len(), 3);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(check_threshold(0.95).is_ok());
        assert!(check_threshold(1.0).is_ok());
        assert!(check_threshold(0.0).is_err());
        assert!(check_threshold(1.01).is_err());
        assert!(check_threshold(f64::NAN).is_err());
    }
}
