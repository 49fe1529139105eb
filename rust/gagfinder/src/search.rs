//! End to end: precursor resolution, enumeration, envelopes, scoring and ranking.

use gagquery::{
    MzTolerance,
    PeakLookup,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Instant;
use tracing::info;

use crate::catalog::FragmentCatalog;
use crate::chemistry::{
    ElementalFormula,
    MetalAdduct,
};
use crate::errors::{
    ConfigError,
    Result,
};
use crate::fragments::{
    ChemicalGroups,
    EnumerationSettings,
    FragmentEnumerator,
};
use crate::isotopes::{
    DEFAULT_TRUNCATION_THRESHOLD,
    EnvelopeCache,
    IsotopeCalculator,
    NaturalAbundanceCalculator,
    check_threshold,
    fragment_charges,
};
use crate::models::{
    CrossRingTable,
    EndAssignment,
    GagClass,
    Precursor,
    PrecursorQuery,
};
use crate::ranking::{
    ResultRow,
    Selection,
    rank,
};
use crate::scoring::{
    MatchSettings,
    Scorer,
    ScoringItem,
    ScoringMetrics,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub class: GagClass,
    pub mz: f64,
    pub charge: i32,
    pub derivatization: Option<ElementalFormula>,
    pub reagent: Option<ElementalFormula>,
    pub adduct: Option<MetalAdduct>,
    pub max_sulfate_losses: u32,
    pub truncation_threshold: f64,
    pub tolerance: MzTolerance,
    /// Shift expected fragment m/z by the measured precursor error.
    pub correct_precursor_error: bool,
    pub require_second_peak: bool,
    pub selection: Selection,
}

impl SearchParameters {
    pub fn new(class: GagClass, mz: f64, charge: i32) -> Self {
        Self {
            class,
            mz,
            charge,
            derivatization: None,
            reagent: None,
            adduct: None,
            max_sulfate_losses: 0,
            truncation_threshold: DEFAULT_TRUNCATION_THRESHOLD,
            tolerance: MzTolerance::default(),
            correct_precursor_error: true,
            require_second_peak: false,
            selection: Selection::default(),
        }
    }

    pub fn precursor_query(&self) -> PrecursorQuery {
        PrecursorQuery {
            class: self.class,
            mz: self.mz,
            charge: self.charge,
            derivatization: self.derivatization,
            adduct: self.adduct,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.precursor_query().validate()?;
        for (field, group) in [
            ("derivatization", self.derivatization),
            ("reagent", self.reagent),
        ] {
            if let Some(formula) = group {
                if !(formula.is_valid() && formula.is_chons()) {
                    return Err(ConfigError::NonChonsFormula {
                        field,
                        formula: formula.to_string(),
                    });
                }
            }
        }
        check_threshold(self.truncation_threshold)?;
        let (low, high) = match self.tolerance {
            MzTolerance::Absolute(x) | MzTolerance::Ppm(x) => x,
        };
        for t in [low, high] {
            if !(t.is_finite() && t > 0.0) {
                return Err(ConfigError::InvalidTolerance(t));
            }
        }
        self.selection.validate()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub precursor: Precursor,
    pub ends: EndAssignment,
    pub precursor_error_ppm: f64,
    pub num_labels: usize,
    pub num_formulas: usize,
    pub num_envelopes: usize,
    #[serde(skip)]
    pub metrics: ScoringMetrics,
    pub rows: Vec<ResultRow>,
}

/// Runs a search with natural-abundance isotope patterns.
pub fn run_search<S: PeakLookup + Sync>(
    params: &SearchParameters,
    catalog: &dyn FragmentCatalog,
    spectrum: &S,
) -> Result<SearchOutcome> {
    run_search_with(params, catalog, spectrum, NaturalAbundanceCalculator)
}

#[cfg_attr(
    feature = "instrumentation",
    tracing::instrument(skip_all, level = "trace")
)]
pub fn run_search_with<S: PeakLookup + Sync, C: IsotopeCalculator>(
    params: &SearchParameters,
    catalog: &dyn FragmentCatalog,
    spectrum: &S,
    calculator: C,
) -> Result<SearchOutcome> {
    params.validate()?;
    let start = Instant::now();

    let query = params.precursor_query();
    let lookup_mass = query.lookup_mass();
    let precursor = catalog.nearest_precursor(params.class, lookup_mass)?;
    let precursor_error_ppm = query.ppm_error(&precursor);
    info!(
        "Precursor {} ({}) at {:.4} Da for lookup mass {:.4}, error {:.2} ppm",
        precursor.composition,
        precursor.formula,
        precursor.mono_mass,
        lookup_mass,
        precursor_error_ppm
    );

    let templates = catalog.fragment_templates(&precursor)?;
    let settings = EnumerationSettings {
        groups: ChemicalGroups {
            derivatization: params.derivatization,
            reagent: params.reagent,
        },
        adduct: params.adduct,
        max_sulfate_losses: params.max_sulfate_losses,
    };
    let table = CrossRingTable::standard();
    let enumerator = FragmentEnumerator::new(&precursor, &settings, &table);
    let ends = *enumerator.ends();
    let candidates = enumerator.enumerate(&templates)?;

    let charges = fragment_charges(params.charge);
    let mut cache = EnvelopeCache::new(calculator, params.truncation_threshold)?;
    cache.populate(candidates.formulas(), &charges)?;
    let mut items = Vec::with_capacity(candidates.len() * charges.len());
    for formula in candidates.formulas() {
        for &charge in charges.iter() {
            items.push(ScoringItem {
                formula: *formula,
                envelope: cache.get_or_compute(formula, charge)?,
            });
        }
    }
    info!(
        "Built {} envelopes for charges {:?}",
        cache.len(),
        charges
    );

    let match_settings = MatchSettings {
        tolerance: params.tolerance,
        precursor_error_ppm: if params.correct_precursor_error {
            precursor_error_ppm
        } else {
            0.0
        },
        require_second_peak: params.require_second_peak,
    };
    let scorer = Scorer::new(spectrum, match_settings);
    let (scored, metrics) = scorer.score_all(&items);

    let selected = params.selection.apply(rank(scored));
    let rows: Vec<ResultRow> = selected
        .iter()
        .map(|c| ResultRow::new(c, candidates.labels(&c.formula)))
        .collect();
    info!(
        "Reporting {} of {} scored envelopes, search took {:?}",
        rows.len(),
        metrics.num_scored,
        start.elapsed()
    );

    Ok(SearchOutcome {
        precursor,
        ends,
        precursor_error_ppm,
        num_labels: candidates.num_labels(),
        num_formulas: candidates.len(),
        num_envelopes: cache.len(),
        metrics,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Metal;

    #[test]
    fn test_parameter_validation() {
        let ok = SearchParameters::new(GagClass::HS, 400.0, -2);
        assert!(ok.validate().is_ok());

        let mut p = ok.clone();
        p.charge = 0;
        assert_eq!(p.validate(), Err(ConfigError::ZeroCharge));

        let mut p = ok.clone();
        p.truncation_threshold = 1.5;
        assert_eq!(p.validate(), Err(ConfigError::InvalidThreshold(1.5)));

        let mut p = ok.clone();
        p.tolerance = MzTolerance::Ppm((20.0, -1.0));
        assert_eq!(p.validate(), Err(ConfigError::InvalidTolerance(-1.0)));

        let mut p = ok.clone();
        p.adduct = Some(MetalAdduct {
            metal: Metal::Ca,
            count: 0,
        });
        assert_eq!(p.validate(), Err(ConfigError::EmptyAdduct));

        let mut p = ok.clone();
        p.derivatization = Some("C2H4".parse().unwrap());
        p.reagent = Some("C3H8".parse().unwrap());
        assert!(p.validate().is_ok());
        p.derivatization = Some("C2H4Na".parse().unwrap());
        assert!(matches!(
            p.validate(),
            Err(ConfigError::NonChonsFormula {
                field: "derivatization",
                ..
            })
        ));
        p.derivatization = None;
        p.reagent = Some("C3H8K".parse().unwrap());
        assert!(matches!(
            p.validate(),
            Err(ConfigError::NonChonsFormula {
                field: "reagent",
                ..
            })
        ));

        let mut p = ok;
        p.selection = Selection::TopPercent(-3.0);
        assert!(p.validate().is_err());
    }
}
