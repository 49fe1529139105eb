//! Envelope-to-spectrum alignment and the G-score.

pub mod gscore;
pub mod scorer;

pub use gscore::g_score;
pub use scorer::{
    FLOOR_INTENSITY,
    MatchSettings,
    Rejection,
    ScoredCandidate,
    Scorer,
    ScoringItem,
    ScoringMetrics,
};
