use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{
    debug,
    info,
    warn,
};

use super::feasibility::reducing_end_options;
use super::modifications::{
    ChemicalGroups,
    FragmentVariant,
    Modifications,
    VariantKind,
};
use crate::chemistry::{
    ElementalFormula,
    MetalAdduct,
};
use crate::errors::CatalogError;
use crate::models::{
    CrossRingTable,
    EndAssignment,
    FragmentTemplate,
    ParsedTemplate,
    Precursor,
};

/// Operator supplied chemistry shared by every candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumerationSettings {
    pub groups: ChemicalGroups,
    /// Metals carried by the precursor.
    pub adduct: Option<MetalAdduct>,
    pub max_sulfate_losses: u32,
}

/// Candidate variants grouped by elemental formula, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    groups: IndexMap<ElementalFormula, Vec<FragmentVariant>>,
    seen_labels: HashSet<String>,
}

impl CandidateSet {
    /// Adds a variant unless a variant with the same label was added before.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, variant: FragmentVariant) -> bool {
        if !self.seen_labels.insert(variant.label()) {
            return false;
        }
        self.groups.entry(variant.formula).or_default().push(variant);
        true
    }

    pub fn formulas(&self) -> impl Iterator<Item = &ElementalFormula> {
        self.groups.keys()
    }

    pub fn variants(&self, formula: &ElementalFormula) -> &[FragmentVariant] {
        self.groups.get(formula).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Every label that maps to `formula`, in insertion order.
    pub fn labels(&self, formula: &ElementalFormula) -> Vec<String> {
        self.variants(formula).iter().map(|v| v.label()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementalFormula, &[FragmentVariant])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of unique formulas.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn num_labels(&self) -> usize {
        self.seen_labels.len()
    }
}

/// Generates every admissible variant of a precursor and its catalog fragments.
pub struct FragmentEnumerator<'a> {
    precursor: &'a Precursor,
    ends: EndAssignment,
    settings: &'a EnumerationSettings,
    cross_ring: &'a CrossRingTable,
}

impl<'a> FragmentEnumerator<'a> {
    pub fn new(
        precursor: &'a Precursor,
        settings: &'a EnumerationSettings,
        cross_ring: &'a CrossRingTable,
    ) -> Self {
        let ends = EndAssignment::resolve(&precursor.composition, precursor.class);
        debug!(
            "End assignment for {}: NR={} RE={}",
            precursor.composition, ends.non_reducing, ends.reducing
        );
        Self {
            precursor,
            ends,
            settings,
            cross_ring,
        }
    }

    pub fn ends(&self) -> &EndAssignment {
        &self.ends
    }

    /// Derivatization presence choices; a single "present" choice when none is configured.
    fn derivatization_choices(&self) -> &'static [bool] {
        match self.settings.groups.derivatization {
            Some(_) => &[false, true],
            None => &[true],
        }
    }

    fn reagent_choices(&self) -> &'static [bool] {
        match self.settings.groups.reagent {
            Some(_) => &[false, true],
            None => &[false],
        }
    }

    /// Intact precursor with water, hydrogen, CO2 and SO3 losses,
    /// derivatization and reagent toggled.
    pub fn precursor_variants(&self) -> Vec<FragmentVariant> {
        let base = match self.settings.adduct {
            Some(a) => self.precursor.formula.with_metal(a.metal, a.count as i32),
            None => self.precursor.formula,
        };
        let comp = &self.precursor.composition;
        let max_co2 = (comp.u + comp.d).max(0) as u32;
        let max_so3 = self.settings.max_sulfate_losses.min(base.s.max(0) as u32);

        let mut out = Vec::new();
        for water_loss in 0..=2 {
            for &reducing_end in self.derivatization_choices() {
                for h_loss in 0..=2 {
                    for co2_loss in 0..=max_co2 {
                        for so3_loss in 0..=max_so3 {
                            for &reagent in self.reagent_choices() {
                                let modifications = Modifications {
                                    water_loss,
                                    hydrogen_delta: -h_loss,
                                    co2_loss,
                                    so3_loss,
                                    adduct: None,
                                    reagent,
                                    reducing_end,
                                };
                                let formula = modifications.apply(base, &self.settings.groups);
                                if !formula.is_valid() {
                                    continue;
                                }
                                out.push(FragmentVariant {
                                    kind: VariantKind::Precursor,
                                    modifications,
                                    formula,
                                });
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// Metal counts a fragment can carry so the rest of the chain can still hold
    /// the remaining metals.
    fn adduct_counts(&self, parsed: &ParsedTemplate) -> std::ops::RangeInclusive<u32> {
        let Some(adduct) = self.settings.adduct else {
            return 0..=0;
        };
        let carboxyls = match &parsed.cross_ring {
            Some(site) => match self.cross_ring.carboxyls(self.precursor.class, site) {
                Some(carboxyls) => carboxyls,
                None => {
                    warn!(
                        "No {} cross-ring entry for {}, assuming no carboxyl",
                        self.precursor.class, site
                    );
                    0
                }
            },
            None => 0,
        };
        let n = adduct.count as i32;
        let upper = parsed.composition.acidic_sites() + carboxyls;
        let lower = n - self.precursor.composition.acidic_sites() + upper;
        (lower.max(0) as u32)..=(n.min(upper).max(0) as u32)
    }

    /// All variants of one catalog template.
    pub fn template_variants(
        &self,
        template: &FragmentTemplate,
    ) -> Result<Vec<FragmentVariant>, CatalogError> {
        let parsed = template.parse()?;
        // Without a derivatization the flag only changes the label.
        let re_options = reducing_end_options(
            &parsed,
            &self.ends,
            self.precursor.composition.chain_length(),
        );
        let max_water = if parsed.is_cross_ring() { 1 } else { 2 };
        let adducts = self.adduct_counts(&parsed);
        let max_so3 = self
            .settings
            .max_sulfate_losses
            .min(template.formula.s.max(0) as u32);

        let mut out = Vec::new();
        for water_loss in 0..=max_water {
            for &reducing_end in re_options {
                for hydrogen_delta in -2..=0 {
                    for n_metal in adducts.clone() {
                        for so3_loss in 0..=max_so3 {
                            let adduct = self
                                .settings
                                .adduct
                                .filter(|_| n_metal > 0)
                                .map(|a| MetalAdduct {
                                    metal: a.metal,
                                    count: n_metal,
                                });
                            let modifications = Modifications {
                                water_loss,
                                hydrogen_delta,
                                co2_loss: 0,
                                so3_loss,
                                adduct,
                                reagent: false,
                                reducing_end,
                            };
                            let formula =
                                modifications.apply(template.formula, &self.settings.groups);
                            if !formula.is_valid() {
                                continue;
                            }
                            let mut composition = parsed.composition;
                            composition.s -= so3_loss as i32;
                            out.push(FragmentVariant {
                                kind: VariantKind::Fragment {
                                    composition,
                                    cross_ring: parsed.cross_ring.clone(),
                                },
                                modifications,
                                formula,
                            });
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    /// Precursor variants followed by every template's variants.
    pub fn enumerate(&self, templates: &[FragmentTemplate]) -> Result<CandidateSet, CatalogError> {
        let mut candidates = CandidateSet::default();
        for variant in self.precursor_variants() {
            candidates.insert(variant);
        }
        let mut skipped = 0;
        for template in templates {
            for variant in self.template_variants(template)? {
                if !candidates.insert(variant) {
                    skipped += 1;
                }
            }
        }
        info!(
            "Enumerated {} labels over {} unique formulas from {} templates ({} repeated labels skipped)",
            candidates.num_labels(),
            candidates.len(),
            templates.len(),
            skipped
        );
        Ok(candidates)
    }
}
