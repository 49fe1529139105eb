use std::path::Path;
use tracing::{
    debug,
    info,
};

use crate::errors::SpectrumError;
use crate::spectrum::Peak;
use crate::tolerance::MzTolerance;

/// Reads a two column centroided peak list (`m/z`, `intensity`).
///
/// Files ending in `.csv` are comma separated, anything else is treated as
/// tab separated. A non-numeric first row is taken as a header; lines starting
/// with `#` are ignored. Extra columns are ignored.
pub fn read_peak_list(path: impl AsRef<Path>) -> Result<Vec<Peak>, SpectrumError> {
    let path = path.as_ref();
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
        _ => b'\t',
    };
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| SpectrumError::PeakListReading {
            path: path.to_path_buf(),
            source,
        })?;

    let mut peaks = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SpectrumError::PeakListReading {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);
        let parsed = match (record.get(0), record.get(1)) {
            (Some(mz), Some(intensity)) => mz
                .parse::<f64>()
                .ok()
                .zip(intensity.parse::<f64>().ok()),
            _ => None,
        };
        match parsed {
            Some((mz, intensity)) => peaks.push(Peak { mz, intensity }),
            None if i == 0 => debug!("Skipping header line in {}", path.display()),
            None => {
                return Err(SpectrumError::MalformedPeakList {
                    path: path.to_path_buf(),
                    line,
                    msg: format!("expected two numeric columns, got {:?}", record),
                });
            }
        }
    }
    info!("Read {} peaks from {}", peaks.len(), path.display());
    Ok(peaks)
}

/// Averages several scans into one peak list.
///
/// Every scan is scaled to unit total intensity, peaks closer than the
/// tolerance are merged (intensity weighted m/z) and the result is divided
/// by the number of scans.
pub fn sum_scans(scans: &[Vec<Peak>], tolerance: &MzTolerance) -> Vec<Peak> {
    let mut all: Vec<Peak> = scans
        .iter()
        .flat_map(|scan| {
            let total: f64 = scan.iter().map(|p| p.intensity).sum();
            scan.iter().filter(move |_| total > 0.0).map(move |p| Peak {
                mz: p.mz,
                intensity: p.intensity / total,
            })
        })
        .collect();
    all.sort_by(|a, b| a.mz.total_cmp(&b.mz));

    let n_scans = scans.len().max(1) as f64;
    let mut merged: Vec<Peak> = Vec::with_capacity(all.len());
    // Running (sum of intensity * mz) for the current group.
    let mut weighted = 0.0;
    for peak in all {
        match merged.last_mut() {
            Some(last) if tolerance.mz_range(last.mz).contains(peak.mz) => {
                weighted += peak.mz * peak.intensity;
                last.intensity += peak.intensity;
                if last.intensity > 0.0 {
                    last.mz = weighted / last.intensity;
                }
            }
            _ => {
                weighted = peak.mz * peak.intensity;
                merged.push(peak);
            }
        }
    }
    for p in merged.iter_mut() {
        p.intensity /= n_scans;
    }
    debug!("Summed {} scans into {} peaks", scans.len(), merged.len());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_tsv_with_header() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "m/z\tintensity").unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file, "300.5\t12.0").unwrap();
        writeln!(file, "301.5\t6.0\textra").unwrap();
        let peaks = read_peak_list(file.path()).unwrap();
        assert_eq!(
            peaks,
            vec![
                Peak {
                    mz: 300.5,
                    intensity: 12.0
                },
                Peak {
                    mz: 301.5,
                    intensity: 6.0
                },
            ]
        );
    }

    #[test]
    fn test_read_csv_and_reject_garbage() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "100.0,1.0").unwrap();
        writeln!(file, "oops,2.0").unwrap();
        let err = read_peak_list(file.path()).unwrap_err();
        assert!(matches!(err, SpectrumError::MalformedPeakList { line: 2, .. }));
    }

    #[test]
    fn test_sum_scans_normalizes_and_merges() {
        let scans = vec![
            vec![
                Peak {
                    mz: 500.0,
                    intensity: 10.0,
                },
                Peak {
                    mz: 600.0,
                    intensity: 10.0,
                },
            ],
            vec![Peak {
                mz: 500.001,
                intensity: 100.0,
            }],
        ];
        let summed = sum_scans(&scans, &MzTolerance::symmetric_ppm(10.0));
        assert_eq!(summed.len(), 2);
        // (0.5 + 1.0) / 2 scans
        assert!((summed[0].intensity - 0.75).abs() < 1e-12);
        assert!(summed[0].mz > 500.0 && summed[0].mz < 500.001);
        assert!((summed[1].intensity - 0.25).abs() < 1e-12);
    }
}
