use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectrumError {
    #[error("Spectrum contains no peaks with positive intensity")]
    Empty,

    #[error("Non-finite value in peak {index}: m/z={mz}, intensity={intensity}")]
    NonFinitePeak {
        index: usize,
        mz: f64,
        intensity: f64,
    },

    #[error("Unable to read peak list at {path}: {source}")]
    PeakListReading {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed peak list {path}, line {line}: {msg}")]
    MalformedPeakList {
        path: PathBuf,
        line: u64,
        msg: String,
    },
}
