//! Sources of precursor compositions and their precomputed cleavage products.

pub mod json;
pub mod sqlite;

pub use json::JsonCatalog;
pub use sqlite::SqliteCatalog;

use crate::errors::CatalogError;
use crate::models::{
    FragmentTemplate,
    GagClass,
    Precursor,
};

pub trait FragmentCatalog {
    /// Catalog precursor of `class` whose neutral mass is closest to `mass`.
    fn nearest_precursor(&self, class: GagClass, mass: f64) -> Result<Precursor, CatalogError>;

    /// Every base cleavage product recorded for `precursor`.
    fn fragment_templates(&self, precursor: &Precursor)
    -> Result<Vec<FragmentTemplate>, CatalogError>;
}
