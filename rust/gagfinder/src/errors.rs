use gagquery::SpectrumError;
use thiserror::Error;

use crate::models::GagClass;

#[derive(Error, Debug, PartialEq)]
pub enum FormulaError {
    #[error("Empty {kind} string")]
    Empty { kind: &'static str },

    #[error("Malformed {kind} '{input}': unexpected character at position {position}")]
    Malformed {
        kind: &'static str,
        input: String,
        position: usize,
    },

    #[error("Unknown symbol '{symbol}' in {kind} '{input}'")]
    UnknownSymbol {
        kind: &'static str,
        symbol: String,
        input: String,
    },

    #[error("Count for '{symbol}' in {kind} '{input}' is too large")]
    CountOverflow {
        kind: &'static str,
        symbol: String,
        input: String,
    },

    #[error("Unknown metal '{0}', expected one of Na, K, Li, Ca, Mg")]
    UnknownMetal(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON catalog parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No {class} precursor in the catalog (target mass {mass:.4})")]
    PrecursorNotFound { class: GagClass, mass: f64 },

    #[error("Invalid catalog entry '{value}': {source}")]
    InvalidEntry {
        value: String,
        #[source]
        source: FormulaError,
    },

    #[error("Invalid cross-ring annotation '{0}'")]
    InvalidCrossRing(String),

    #[error("Unknown GAG class id {0}")]
    UnknownClassId(i64),
}

#[derive(Error, Debug, PartialEq)]
pub enum IsotopeError {
    #[error("Cannot build an isotope pattern for invalid formula {0}")]
    InvalidFormula(String),

    #[error("Charge must be non-zero")]
    ZeroCharge,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Precursor charge must be non-zero")]
    ZeroCharge,

    #[error("Precursor m/z must be positive and finite, got {0}")]
    InvalidPrecursorMz(f64),

    #[error("Metal adduct count must be at least 1")]
    EmptyAdduct,

    #[error("Truncation threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("Percentile must be within [0, 100], got {0}")]
    InvalidPercentile(f64),

    #[error("{field} formula must be a non-empty CHONS formula, got {formula}")]
    NonChonsFormula {
        field: &'static str,
        formula: String,
    },

    #[error("Invalid {field} formula: {source}")]
    InvalidFormula {
        field: &'static str,
        #[source]
        source: FormulaError,
    },
}

#[derive(Error, Debug)]
pub enum GagFinderError {
    #[error(transparent)]
    Formula(#[from] FormulaError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Isotope(#[from] IsotopeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
}

pub type Result<T> = std::result::Result<T, GagFinderError>;
