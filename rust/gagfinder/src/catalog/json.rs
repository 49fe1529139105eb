use serde::{
    Deserialize,
    Serialize,
};
use std::path::Path;
use tracing::info;

use super::FragmentCatalog;
use crate::chemistry::{
    Composition,
    ElementalFormula,
};
use crate::errors::CatalogError;
use crate::models::{
    FragmentTemplate,
    GagClass,
    Precursor,
};

/// Small hand-curated catalogs, stored as JSON.
///
/// ```json
/// {
///   "precursors": [
///     {
///       "id": 1,
///       "class": "HS",
///       "formula": "C12H21O11N",
///       "composition": "UN",
///       "mono_mass": 355.1114605,
///       "fragments": [{ "label": "U", "formula": "C6H10O7" }]
///     }
///   ]
/// }
/// ```
///
/// `mono_mass` may be omitted, in which case it is computed from the formula.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonCatalog {
    pub precursors: Vec<JsonPrecursorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPrecursorEntry {
    pub id: i64,
    pub class: GagClass,
    pub formula: ElementalFormula,
    pub composition: Composition,
    #[serde(default)]
    pub mono_mass: Option<f64>,
    #[serde(default)]
    pub fragments: Vec<FragmentTemplate>,
}

impl JsonPrecursorEntry {
    fn mono_mass(&self) -> f64 {
        self.mono_mass
            .unwrap_or_else(|| self.formula.monoisotopic_mass())
    }

    fn to_precursor(&self) -> Precursor {
        Precursor {
            id: self.id,
            class: self.class,
            formula: self.formula,
            composition: self.composition,
            mono_mass: self.mono_mass(),
        }
    }
}

impl JsonCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog: JsonCatalog = serde_json::from_str(&content)?;
        info!(
            "Loaded {} precursors from {}",
            catalog.precursors.len(),
            path.display()
        );
        Ok(catalog)
    }
}

impl FragmentCatalog for JsonCatalog {
    fn nearest_precursor(&self, class: GagClass, mass: f64) -> Result<Precursor, CatalogError> {
        // First entry wins on equal distance, as with a stable ORDER BY.
        self.precursors
            .iter()
            .filter(|p| p.class == class)
            .fold(None, |best: Option<&JsonPrecursorEntry>, p| match best {
                Some(b) if (b.mono_mass() - mass).abs() <= (p.mono_mass() - mass).abs() => {
                    Some(b)
                }
                _ => Some(p),
            })
            .map(|p| p.to_precursor())
            .ok_or(CatalogError::PrecursorNotFound { class, mass })
    }

    fn fragment_templates(
        &self,
        precursor: &Precursor,
    ) -> Result<Vec<FragmentTemplate>, CatalogError> {
        Ok(self
            .precursors
            .iter()
            .find(|p| p.id == precursor.id && p.class == precursor.class)
            .map(|p| p.fragments.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "precursors": [
            {
                "id": 1,
                "class": "HS",
                "formula": "C12H21O11N",
                "composition": "UN",
                "fragments": [
                    { "label": "U", "formula": "C6H10O7" },
                    { "label": "N+URE0,2", "formula": "C8H15O6N" }
                ]
            },
            {
                "id": 2,
                "class": "HS",
                "formula": "C12H21O14NS",
                "composition": "UNS",
                "mono_mass": 435.0682754
            }
        ]
    }"#;

    #[test]
    fn test_lookup() {
        let catalog: JsonCatalog = serde_json::from_str(CATALOG).unwrap();
        let p = catalog.nearest_precursor(GagClass::HS, 360.0).unwrap();
        assert_eq!(p.id, 1);
        assert!((p.mono_mass - 355.1114605).abs() < 1e-6);
        let frags = catalog.fragment_templates(&p).unwrap();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[1].label, "N+URE0,2");

        let p = catalog.nearest_precursor(GagClass::HS, 430.0).unwrap();
        assert_eq!(p.id, 2);
        assert!(catalog.fragment_templates(&p).unwrap().is_empty());
        assert!(catalog.nearest_precursor(GagClass::CS, 430.0).is_err());
    }

    #[test]
    fn test_bad_formula_is_rejected() {
        let bad = CATALOG.replace("C6H10O7", "C6H10Q7");
        assert!(serde_json::from_str::<JsonCatalog>(&bad).is_err());
    }
}
