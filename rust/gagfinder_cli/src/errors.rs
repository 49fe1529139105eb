use gagfinder::GagFinderError;
use gagfinder::errors::CatalogError;
use gagquery::SpectrumError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error writing results: {0}")]
    Csv(#[from] csv::Error),

    #[error("Error reading the spectrum: {0}")]
    Spectrum(#[from] SpectrumError),

    #[error("Error reading the fragment database: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Search(#[from] GagFinderError),

    #[error("Error interpreting the config: {0}")]
    Config(String),
}
