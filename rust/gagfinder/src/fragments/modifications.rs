use serde::Serialize;
use std::fmt::{
    Display,
    Write,
};

use crate::chemistry::{
    Composition,
    ElementalFormula,
    MetalAdduct,
};
use crate::models::CrossRingSite;

/// Side reactions applied to a base formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Modifications {
    pub water_loss: u32,
    /// Net hydrogens added (negative for losses).
    pub hydrogen_delta: i32,
    pub co2_loss: u32,
    pub so3_loss: u32,
    /// Metals swapped in for protons on top of the base formula.
    pub adduct: Option<MetalAdduct>,
    pub reagent: bool,
    /// Carries the reducing-end derivatization group.
    pub reducing_end: bool,
}

/// Optional groups whose presence is toggled by [`Modifications`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChemicalGroups {
    pub derivatization: Option<ElementalFormula>,
    pub reagent: Option<ElementalFormula>,
}

impl Modifications {
    pub fn apply(&self, base: ElementalFormula, groups: &ChemicalGroups) -> ElementalFormula {
        let mut out = base - ElementalFormula::WATER * self.water_loss as i32
            - ElementalFormula::CO2 * self.co2_loss as i32
            - ElementalFormula::SO3 * self.so3_loss as i32
            + ElementalFormula::HYDROGEN * self.hydrogen_delta;
        if self.reducing_end {
            if let Some(deriv) = groups.derivatization {
                out = out + deriv;
            }
        }
        if self.reagent {
            if let Some(reagent) = groups.reagent {
                out = out + reagent;
            }
        }
        if let Some(adduct) = self.adduct {
            out = out.with_metal(adduct.metal, adduct.count as i32);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum VariantKind {
    /// The intact precursor.
    Precursor,
    /// A catalog product; `composition` already reflects sulfate losses.
    Fragment {
        composition: Composition,
        cross_ring: Option<CrossRingSite>,
    },
}

/// One candidate ion: what it came from, what happened to it, and its formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentVariant {
    pub kind: VariantKind,
    pub modifications: Modifications,
    pub formula: ElementalFormula,
}

impl FragmentVariant {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

fn push_count(out: &mut String, sign: char, n: u32, what: &str) {
    match n {
        0 => {}
        1 => {
            let _ = write!(out, "{}{}", sign, what);
        }
        n => {
            let _ = write!(out, "{}{}{}", sign, n, what);
        }
    }
}

impl Display for FragmentVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.modifications;
        let mut out = String::new();
        let h_sign = if m.hydrogen_delta < 0 { '-' } else { '+' };
        match &self.kind {
            VariantKind::Precursor => {
                out.push('M');
                if !m.reducing_end {
                    out.push_str("-RE");
                }
                push_count(&mut out, '-', m.water_loss, "H2O");
                push_count(&mut out, h_sign, m.hydrogen_delta.unsigned_abs(), "H");
                push_count(&mut out, '-', m.co2_loss, "CO2");
                push_count(&mut out, '-', m.so3_loss, "SO3");
                if m.reagent {
                    out.push_str("+A");
                }
            }
            VariantKind::Fragment {
                composition,
                cross_ring,
            } => {
                out.push_str(&composition.to_string());
                if let Some(site) = cross_ring {
                    let _ = write!(out, "+{}", site);
                }
                if m.reducing_end {
                    out.push_str("+RE");
                }
                push_count(&mut out, '-', m.water_loss, "H2O");
                push_count(&mut out, h_sign, m.hydrogen_delta.unsigned_abs(), "H");
                push_count(&mut out, '-', m.co2_loss, "CO2");
                if let Some(adduct) = m.adduct {
                    push_count(&mut out, '+', adduct.count, adduct.metal.symbol());
                }
            }
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Metal;

    #[test]
    fn test_precursor_labels() {
        let variant = FragmentVariant {
            kind: VariantKind::Precursor,
            modifications: Modifications {
                water_loss: 2,
                hydrogen_delta: -1,
                co2_loss: 3,
                so3_loss: 1,
                reagent: true,
                reducing_end: false,
                adduct: None,
            },
            formula: ElementalFormula::default(),
        };
        assert_eq!(variant.label(), "M-RE-2H2O-H-3CO2-SO3+A");

        let plain = FragmentVariant {
            modifications: Modifications {
                reducing_end: true,
                ..Default::default()
            },
            ..variant
        };
        assert_eq!(plain.label(), "M");
    }

    #[test]
    fn test_fragment_labels() {
        let variant = FragmentVariant {
            kind: VariantKind::Fragment {
                composition: "U2NS".parse().unwrap(),
                cross_ring: Some("NRE0,2".parse().unwrap()),
            },
            modifications: Modifications {
                water_loss: 1,
                hydrogen_delta: -2,
                reducing_end: true,
                adduct: Some(MetalAdduct {
                    metal: Metal::Na,
                    count: 2,
                }),
                ..Default::default()
            },
            formula: ElementalFormula::default(),
        };
        assert_eq!(variant.label(), "U2NS+NRE0,2+RE-H2O-2H+2Na");
    }

    #[test]
    fn test_apply_modifications() {
        let base: ElementalFormula = "C12H21O14NS".parse().unwrap();
        let groups = ChemicalGroups {
            derivatization: Some("C2H4".parse().unwrap()),
            reagent: None,
        };
        let mods = Modifications {
            water_loss: 1,
            hydrogen_delta: -1,
            so3_loss: 1,
            reducing_end: true,
            reagent: true,
            adduct: Some(MetalAdduct {
                metal: Metal::K,
                count: 1,
            }),
            ..Default::default()
        };
        assert_eq!(mods.apply(base, &groups).to_string(), "C14H21O10NK");
    }
}
