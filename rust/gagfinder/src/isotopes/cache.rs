use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{
    IsotopeCalculator,
    IsotopeEnvelope,
    build_envelope,
    check_threshold,
};
use crate::chemistry::ElementalFormula;
use crate::errors::{
    ConfigError,
    IsotopeError,
};

/// Fragment charge states for a precursor: 1 through |z|, with the precursor's sign.
///
/// ```
/// use gagfinder::isotopes::fragment_charges;
///
/// assert_eq!(fragment_charges(-3), vec![-1, -2, -3]);
/// assert_eq!(fragment_charges(2), vec![1, 2]);
/// ```
pub fn fragment_charges(precursor_charge: i32) -> Vec<i32> {
    let sign = precursor_charge.signum();
    (1..=precursor_charge.abs()).map(|c| c * sign).collect()
}

/// Envelopes memoised by (formula, charge).
pub struct EnvelopeCache<C: IsotopeCalculator> {
    calculator: C,
    threshold: f64,
    envelopes: HashMap<(ElementalFormula, i32), Arc<IsotopeEnvelope>>,
}

impl<C: IsotopeCalculator> EnvelopeCache<C> {
    pub fn new(calculator: C, threshold: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            calculator,
            threshold: check_threshold(threshold)?,
            envelopes: HashMap::new(),
        })
    }

    pub fn get(&self, formula: &ElementalFormula, charge: i32) -> Option<Arc<IsotopeEnvelope>> {
        self.envelopes.get(&(*formula, charge)).cloned()
    }

    pub fn get_or_compute(
        &mut self,
        formula: &ElementalFormula,
        charge: i32,
    ) -> Result<Arc<IsotopeEnvelope>, IsotopeError> {
        if let Some(env) = self.get(formula, charge) {
            return Ok(env);
        }
        let env = Arc::new(build_envelope(
            &self.calculator,
            formula,
            charge,
            self.threshold,
        )?);
        self.envelopes.insert((*formula, charge), env.clone());
        Ok(env)
    }

    /// Computes every missing (formula, charge) envelope in parallel.
    pub fn populate<'a>(
        &mut self,
        formulas: impl IntoIterator<Item = &'a ElementalFormula>,
        charges: &[i32],
    ) -> Result<(), IsotopeError> {
        let missing: Vec<(ElementalFormula, i32)> = formulas
            .into_iter()
            .flat_map(|f| charges.iter().map(move |&z| (*f, z)))
            .filter(|key| !self.envelopes.contains_key(key))
            .collect();
        debug!("Building {} isotope envelopes", missing.len());

        let calculator = &self.calculator;
        let threshold = self.threshold;
        let built = missing
            .into_par_iter()
            .map(|(formula, charge)| {
                build_envelope(calculator, &formula, charge, threshold)
                    .map(|env| ((formula, charge), Arc::new(env)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.envelopes.extend(built);
        Ok(())
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }
}
