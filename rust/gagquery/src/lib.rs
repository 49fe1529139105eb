pub mod errors;
pub mod readers;
pub mod spectrum;
pub mod tolerance;
pub mod utils;

pub use errors::SpectrumError;
pub use readers::{
    read_peak_list,
    sum_scans,
};
pub use spectrum::{
    Peak,
    PeakLookup,
    Spectrum,
};
pub use tolerance::MzTolerance;
pub use utils::TupleRange;
