//! Ordering scored candidates and picking the ones to report.

use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::ConfigError;
use crate::scoring::ScoredCandidate;

/// How many of the ranked candidates to keep.
///
/// ```
/// use gagfinder::ranking::Selection;
///
/// let sel: Selection = serde_json::from_str(r#"{"top_percent": 25.0}"#).unwrap();
/// assert_eq!(sel.count(10), 2);
/// let sel: Selection = serde_json::from_str(r#"{"top_n": 50}"#).unwrap();
/// assert_eq!(sel.count(10), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    TopN(usize),
    TopPercent(f64),
}

impl Default for Selection {
    fn default() -> Self {
        Selection::TopN(100)
    }
}

impl Selection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Selection::TopN(_) => Ok(()),
            Selection::TopPercent(p) if p.is_finite() && (0.0..=100.0).contains(&p) => Ok(()),
            Selection::TopPercent(p) => Err(ConfigError::InvalidPercentile(p)),
        }
    }

    /// Number of candidates kept out of `total`.
    pub fn count(&self, total: usize) -> usize {
        match *self {
            Selection::TopN(n) => n.min(total),
            Selection::TopPercent(p) => {
                let n = (p / 100.0 * total as f64).floor();
                (n.max(0.0) as usize).min(total)
            }
        }
    }

    pub fn apply(&self, mut ranked: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        ranked.truncate(self.count(ranked.len()));
        ranked
    }
}

/// Sorts by ascending G-score; equal scores keep their input order.
pub fn rank(mut candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    candidates.sort_by(|a, b| a.g_score.total_cmp(&b.g_score));
    candidates
}

/// One reported fragment ion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub mz: f64,
    pub intensity: f64,
    pub charge: i32,
    /// Every label whose formula produced this envelope.
    pub labels: Vec<String>,
    pub g_score: f64,
    pub ppm_error: f64,
}

impl ResultRow {
    pub fn new(candidate: &ScoredCandidate, labels: Vec<String>) -> Self {
        Self {
            mz: candidate.mono_mz,
            intensity: candidate.mono_intensity,
            charge: candidate.charge,
            labels,
            g_score: candidate.g_score,
            ppm_error: candidate.ppm_error,
        }
    }

    pub fn joined_labels(&self) -> String {
        self.labels.join("; ")
    }
}
