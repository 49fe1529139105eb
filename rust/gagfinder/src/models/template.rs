use serde::{
    Deserialize,
    Serialize,
};

use super::cross_ring::CrossRingSite;
use crate::chemistry::{
    Composition,
    ElementalFormula,
};
use crate::errors::CatalogError;

/// One base cleavage product of a precursor, as stored in the catalog.
///
/// Cross-ring products carry a `+<site>` suffix on their composition label,
/// e.g. `U2N2S3+NRE0,2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentTemplate {
    pub label: String,
    pub formula: ElementalFormula,
}

/// Structured view of a template label.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTemplate {
    pub composition: Composition,
    pub cross_ring: Option<CrossRingSite>,
}

impl ParsedTemplate {
    pub fn is_cross_ring(&self) -> bool {
        self.cross_ring.is_some()
    }
}

impl FragmentTemplate {
    pub fn parse(&self) -> Result<ParsedTemplate, CatalogError> {
        let (comp, site) = match self.label.rsplit_once('+') {
            Some((comp, site)) => (comp, Some(site.parse::<CrossRingSite>()?)),
            None => (self.label.as_str(), None),
        };
        let composition = comp
            .parse::<Composition>()
            .map_err(|source| CatalogError::InvalidEntry {
                value: self.label.clone(),
                source,
            })?;
        Ok(ParsedTemplate {
            composition,
            cross_ring: site,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Residue;
    use crate::models::cross_ring::ResidueEnd;

    fn template(label: &str) -> FragmentTemplate {
        FragmentTemplate {
            label: label.to_string(),
            formula: "C6H10O7".parse().unwrap(),
        }
    }

    #[test]
    fn test_glycosidic_label() {
        let parsed = template("U2N2S3").parse().unwrap();
        assert!(!parsed.is_cross_ring());
        assert_eq!(parsed.composition.s, 3);
    }

    #[test]
    fn test_cross_ring_label() {
        let parsed = template("UN2AS+NRE0,2").parse().unwrap();
        let site = parsed.cross_ring.unwrap();
        assert_eq!(site.residue, Residue::N);
        assert_eq!(site.end, ResidueEnd::Reducing);
        assert_eq!(parsed.composition.n, 2);
    }

    #[test]
    fn test_malformed_labels() {
        assert!(template("U2Q").parse().is_err());
        assert!(template("U2+ZZZ").parse().is_err());
    }
}
