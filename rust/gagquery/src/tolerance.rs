use serde::{
    Deserialize,
    Serialize,
};

use crate::utils::TupleRange;

/// Mass tolerance used when looking up peaks.
///
/// Ranges are written as positive offsets: a tolerance of `(1, 1)` around 10
/// means `[9, 11]`.
///
/// ```
/// use gagquery::MzTolerance;
///
/// let tol = MzTolerance::default(); // 20 ppm
/// let range = tol.mz_range(500.0);
/// assert!((range.start() - 499.99).abs() < 1e-6);
/// assert!((range.end() - 500.01).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum MzTolerance {
    #[serde(rename = "da")]
    Absolute((f64, f64)),
    #[serde(rename = "ppm")]
    Ppm((f64, f64)),
}

impl Default for MzTolerance {
    fn default() -> Self {
        MzTolerance::Ppm((20.0, 20.0))
    }
}

impl MzTolerance {
    pub fn symmetric_ppm(ppm: f64) -> Self {
        MzTolerance::Ppm((ppm, ppm))
    }

    /// Window `[mz - low, mz + high]` around `mz`.
    ///
    /// Negative tolerances are treated by magnitude so the range is always ordered.
    pub fn mz_range(&self, mz: f64) -> TupleRange<f64> {
        let (low, high) = match *self {
            MzTolerance::Absolute((low, high)) => (low.abs(), high.abs()),
            MzTolerance::Ppm((low, high)) => {
                (mz.abs() * low.abs() / 1e6, mz.abs() * high.abs() / 1e6)
            }
        };
        // Only a NaN input can fail the ordering check; collapse it to a point.
        TupleRange::try_new(mz - low, mz + high).unwrap_or(TupleRange(mz, mz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ppm_deserialization() {
        let tol: MzTolerance = serde_json::from_str(r#"{"ppm": [10.0, 10.0]}"#).unwrap();
        assert_eq!(tol, MzTolerance::symmetric_ppm(10.0));
        let range = tol.mz_range(1000.0);
        assert!((range.end() - 1000.01).abs() < 1e-9);
    }

    #[test]
    fn test_absolute_range() {
        let tol: MzTolerance = serde_json::from_str(r#"{"da": [0.02, 0.01]}"#).unwrap();
        let range = tol.mz_range(300.0);
        assert!((range.start() - 299.98).abs() < 1e-9);
        assert!((range.end() - 300.01).abs() < 1e-9);
    }
}
