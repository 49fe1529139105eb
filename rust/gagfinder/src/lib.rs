pub mod catalog;
pub mod chemistry;
pub mod errors;
pub mod fragments;
pub mod isotopes;
pub mod models;
pub mod ranking;
pub mod scoring;
pub mod search;

pub use catalog::{
    FragmentCatalog,
    JsonCatalog,
    SqliteCatalog,
};
pub use chemistry::{
    Composition,
    ElementalFormula,
    Metal,
    MetalAdduct,
};
pub use errors::{
    GagFinderError,
    Result,
};
pub use models::GagClass;
pub use ranking::{
    ResultRow,
    Selection,
};
pub use search::{
    SearchOutcome,
    SearchParameters,
    run_search,
};
