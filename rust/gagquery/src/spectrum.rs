use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::SpectrumError;
use crate::utils::{
    TupleRange,
    binary_search_range_by_key,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

/// Anything that can answer "which peaks are inside this m/z window".
///
/// The scoring code only ever talks to a spectrum through this trait.
pub trait PeakLookup {
    /// All peaks inside the closed m/z range, ascending by m/z.
    fn peaks_within(&self, range: TupleRange<f64>) -> &[Peak];

    /// Smallest and largest observed m/z.
    fn mz_extent(&self) -> TupleRange<f64>;

    fn most_intense_within(&self, range: TupleRange<f64>) -> Option<Peak> {
        // Ties keep the lowest m/z peak.
        self.peaks_within(range)
            .iter()
            .fold(None, |best: Option<Peak>, p| match best {
                Some(b) if b.intensity >= p.intensity => Some(b),
                _ => Some(*p),
            })
    }

    fn closest_within(&self, target: f64, range: TupleRange<f64>) -> Option<Peak> {
        self.peaks_within(range)
            .iter()
            .fold(None, |best: Option<Peak>, p| match best {
                Some(b) if (b.mz - target).abs() <= (p.mz - target).abs() => Some(b),
                _ => Some(*p),
            })
    }
}

/// A centroided spectrum with peaks sorted by m/z.
///
/// ```
/// use gagquery::{
///     Peak,
///     PeakLookup,
///     Spectrum,
///     TupleRange,
/// };
///
/// let spec = Spectrum::try_new(vec![
///     Peak { mz: 301.0, intensity: 5.0 },
///     Peak { mz: 300.0, intensity: 10.0 },
/// ])
/// .unwrap();
/// assert_eq!(spec.mz_extent().start(), 300.0);
/// let hit = spec
///     .most_intense_within(TupleRange::try_new(299.0, 302.0).unwrap())
///     .unwrap();
/// assert_eq!(hit.mz, 300.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    peaks: Vec<Peak>,
}

impl Spectrum {
    /// Builds a spectrum, dropping peaks with non-positive intensity.
    ///
    /// Fails on non-finite values and when nothing is left after filtering.
    pub fn try_new(mut peaks: Vec<Peak>) -> Result<Self, SpectrumError> {
        if let Some((index, p)) = peaks
            .iter()
            .enumerate()
            .find(|(_, p)| !p.mz.is_finite() || !p.intensity.is_finite())
        {
            return Err(SpectrumError::NonFinitePeak {
                index,
                mz: p.mz,
                intensity: p.intensity,
            });
        }
        peaks.retain(|p| p.intensity > 0.0);
        if peaks.is_empty() {
            return Err(SpectrumError::Empty);
        }
        peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
        Ok(Self { peaks })
    }

    pub fn from_arrays(mz: &[f64], intensity: &[f64]) -> Result<Self, SpectrumError> {
        let peaks = mz
            .iter()
            .zip(intensity.iter())
            .map(|(&mz, &intensity)| Peak { mz, intensity })
            .collect();
        Self::try_new(peaks)
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn total_intensity(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }
}

impl PeakLookup for Spectrum {
    fn peaks_within(&self, range: TupleRange<f64>) -> &[Peak] {
        let idx = binary_search_range_by_key(&self.peaks, range, |p| p.mz);
        &self.peaks[idx]
    }

    fn mz_extent(&self) -> TupleRange<f64> {
        // Non-empty and sorted, checked on construction.
        let first = self.peaks[0].mz;
        let last = self.peaks[self.peaks.len() - 1].mz;
        TupleRange(first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Spectrum {
        Spectrum::from_arrays(
            &[100.0, 100.001, 100.002, 200.0, 150.0],
            &[1.0, 3.0, 2.0, 4.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_sorted_and_filtered() {
        let spec = sample();
        assert_eq!(spec.len(), 4);
        let mzs: Vec<f64> = spec.peaks().iter().map(|p| p.mz).collect();
        assert_eq!(mzs, vec![100.0, 100.001, 100.002, 200.0]);
        assert_eq!(spec.mz_extent(), TupleRange::try_new(100.0, 200.0).unwrap());
    }

    #[test]
    fn test_most_intense_and_closest() {
        let spec = sample();
        let window = TupleRange::try_new(99.9, 100.1).unwrap();
        assert_eq!(spec.most_intense_within(window).unwrap().mz, 100.001);
        assert_eq!(spec.closest_within(100.0021, window).unwrap().mz, 100.002);
        let nothing = TupleRange::try_new(120.0, 121.0).unwrap();
        assert!(spec.most_intense_within(nothing).is_none());
        assert!(spec.closest_within(120.5, nothing).is_none());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Spectrum::from_arrays(&[1.0], &[0.0]),
            Err(SpectrumError::Empty)
        ));
        assert!(matches!(
            Spectrum::from_arrays(&[f64::NAN], &[1.0]),
            Err(SpectrumError::NonFinitePeak { index: 0, .. })
        ));
    }
}
