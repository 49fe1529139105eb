use gagquery::{
    MzTolerance,
    PeakLookup,
};
use indicatif::{
    ParallelProgressIterator,
    ProgressStyle,
};
use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use std::sync::Arc;
use std::time::{
    Duration,
    Instant,
};
use tracing::{
    debug,
    info,
};

use super::gscore::g_score;
use crate::chemistry::ElementalFormula;
use crate::isotopes::IsotopeEnvelope;

/// Stand-in intensity for an isotope peak with nothing observed near it.
pub const FLOOR_INTENSITY: f64 = 1e-100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub tolerance: MzTolerance,
    /// Precursor calibration error applied to every expected m/z.
    pub precursor_error_ppm: f64,
    /// Discard candidates whose second isotope peak is not observed.
    pub require_second_peak: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            tolerance: MzTolerance::default(),
            precursor_error_ppm: 0.0,
            require_second_peak: false,
        }
    }
}

/// Why an envelope produced no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfRange,
    NoAnchorPeak,
    MissingSecondPeak,
}

/// One (formula, charge) envelope to score.
#[derive(Debug, Clone)]
pub struct ScoringItem {
    pub formula: ElementalFormula,
    pub envelope: Arc<IsotopeEnvelope>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub formula: ElementalFormula,
    pub charge: i32,
    pub g_score: f64,
    /// Observed intensity of the anchoring peak.
    pub mono_intensity: f64,
    /// Observed m/z of the anchoring peak.
    pub mono_mz: f64,
    pub ppm_error: f64,
}

#[derive(Debug, Clone, Default, Copy)]
pub struct ScoringMetrics {
    pub num_candidates: usize,
    pub num_scored: usize,
    pub num_out_of_range: usize,
    pub num_unanchored: usize,
    pub num_missing_second_peak: usize,
    pub time_scoring: Duration,
}

pub struct Scorer<'a, S: PeakLookup + Sync> {
    spectrum: &'a S,
    settings: MatchSettings,
}

impl<'a, S: PeakLookup + Sync> Scorer<'a, S> {
    pub fn new(spectrum: &'a S, settings: MatchSettings) -> Self {
        Self { spectrum, settings }
    }

    #[inline]
    fn corrected(&self, mz: f64) -> f64 {
        mz * (1.0 + self.settings.precursor_error_ppm / 1e6)
    }

    /// Aligns one envelope to the spectrum and scores it.
    pub fn score(
        &self,
        formula: ElementalFormula,
        envelope: &IsotopeEnvelope,
    ) -> Result<ScoredCandidate, Rejection> {
        let extent = self.spectrum.mz_extent();
        let peaks = envelope.peaks();
        let mono = peaks.first().ok_or(Rejection::NoAnchorPeak)?;

        let anchor = self.corrected(mono.mz);
        if !extent.contains(anchor) {
            return Err(Rejection::OutOfRange);
        }
        let observed = self
            .spectrum
            .most_intense_within(self.settings.tolerance.mz_range(anchor))
            .ok_or(Rejection::NoAnchorPeak)?;
        let diff = anchor - observed.mz;

        let mut matched = Vec::with_capacity(peaks.len());
        matched.push(observed.intensity);
        for (i, peak) in peaks.iter().enumerate().skip(1) {
            let target = self.corrected(peak.mz) - diff;
            if !extent.contains(target) {
                return Err(Rejection::OutOfRange);
            }
            let hit = self
                .spectrum
                .closest_within(target, self.settings.tolerance.mz_range(target));
            match hit {
                Some(p) => matched.push(p.intensity),
                None if i == 1 && self.settings.require_second_peak => {
                    return Err(Rejection::MissingSecondPeak);
                }
                None => matched.push(FLOOR_INTENSITY),
            }
        }

        let theoretical: Vec<f64> = envelope.intensities().collect();
        Ok(ScoredCandidate {
            formula,
            charge: envelope.charge,
            g_score: g_score(&matched, &theoretical),
            mono_intensity: observed.intensity,
            mono_mz: observed.mz,
            ppm_error: 1e6 * (observed.mz - anchor) / anchor,
        })
    }

    /// Scores every item in parallel. Results keep the input order.
    pub fn score_all(&self, items: &[ScoringItem]) -> (Vec<ScoredCandidate>, ScoringMetrics) {
        let start = Instant::now();
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());

        let outcomes: Vec<Result<ScoredCandidate, Rejection>> = items
            .par_iter()
            .progress_with_style(style)
            .map(|item| self.score(item.formula, &item.envelope))
            .collect();

        let mut metrics = ScoringMetrics {
            num_candidates: items.len(),
            ..Default::default()
        };
        let mut scored = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(candidate) => scored.push(candidate),
                Err(Rejection::OutOfRange) => metrics.num_out_of_range += 1,
                Err(Rejection::NoAnchorPeak) => metrics.num_unanchored += 1,
                Err(Rejection::MissingSecondPeak) => metrics.num_missing_second_peak += 1,
            }
        }
        metrics.num_scored = scored.len();
        metrics.time_scoring = start.elapsed();
        debug!("{:?}", metrics);
        info!(
            "Scored {} of {} envelopes in {:?}",
            metrics.num_scored, metrics.num_candidates, metrics.time_scoring
        );
        (scored, metrics)
    }
}
