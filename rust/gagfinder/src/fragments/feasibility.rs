//! Whether a catalog fragment may contain the reducing terminus.

use crate::chemistry::Residue;
use crate::models::{
    EndAssignment,
    EndResidue,
    ParsedTemplate,
    ResidueEnd,
};

const EXCLUDED: &[bool] = &[false];
const REQUIRED: &[bool] = &[true];
const EITHER: &[bool] = &[false, true];

/// Allowed values of the "includes reducing end" flag for a fragment.
///
/// `precursor_length` is the number of complete rings in the precursor.
pub fn reducing_end_options(
    fragment: &ParsedTemplate,
    ends: &EndAssignment,
    precursor_length: i32,
) -> &'static [bool] {
    let comp = &fragment.composition;
    let site = fragment.cross_ring.as_ref();
    let n_frag = comp.chain_length();

    if comp.d == 1 || site.is_some_and(|s| s.end == ResidueEnd::NonReducing) {
        return EXCLUDED;
    }

    let reducing = match ends.reducing {
        EndResidue::Unknown => {
            return match site {
                Some(_) if n_frag == precursor_length - 1 => REQUIRED,
                _ => EITHER,
            };
        }
        EndResidue::Known(r) => r,
    };

    // The fragment may reach the terminus without being forced to.
    let by_length = |slack: i32| {
        if n_frag < precursor_length - slack {
            EITHER
        } else {
            REQUIRED
        }
    };

    if n_frag % 2 == 0 {
        match site {
            Some(s) if s.residue == reducing && s.end == ResidueEnd::Reducing => by_length(2),
            Some(s)
                if reducing == Residue::U
                    && s.residue == Residue::D
                    && s.end == ResidueEnd::Reducing =>
            {
                if n_frag == precursor_length - 1 {
                    REQUIRED
                } else {
                    EITHER
                }
            }
            None => EITHER,
            Some(_) => EXCLUDED,
        }
    } else {
        // An odd fragment ending at the terminus holds the majority residue.
        let bigger = n_frag / 2 + 1;
        if comp.residue_count(reducing) != bigger {
            return EXCLUDED;
        }
        match site {
            Some(_) => by_length(2),
            None => by_length(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Composition;
    use crate::models::{
        EndAssignment,
        GagClass,
    };

    fn parsed(label: &str) -> ParsedTemplate {
        let (comp, site) = match label.split_once('+') {
            Some((c, s)) => (c, Some(s.parse().unwrap())),
            None => (label, None),
        };
        ParsedTemplate {
            composition: comp.parse().unwrap(),
            cross_ring: site,
        }
    }

    fn ends(comp: &str, class: GagClass) -> (EndAssignment, i32) {
        let c: Composition = comp.parse().unwrap();
        (EndAssignment::resolve(&c, class), c.chain_length())
    }

    #[test]
    fn test_non_reducing_markers() {
        let (e, n) = ends("U3N3", GagClass::HS);
        assert_eq!(reducing_end_options(&parsed("DUN2"), &e, n), EXCLUDED);
        assert_eq!(reducing_end_options(&parsed("UN+UNR0,2"), &e, n), EXCLUDED);
    }

    #[test]
    fn test_unknown_reducing_end() {
        let (e, n) = ends("U2N2", GagClass::HS);
        assert_eq!(reducing_end_options(&parsed("UN"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("UN2+URE0,2"), &e, n), REQUIRED);
        assert_eq!(reducing_end_options(&parsed("UN+URE0,2"), &e, n), EITHER);
    }

    #[test]
    fn test_even_fragments_with_known_end() {
        // Hexosamine at both ends of a heptasaccharide
        let (e, n) = ends("U3N4", GagClass::HS);
        assert_eq!(n, 7);
        assert_eq!(reducing_end_options(&parsed("UN"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("UN+NRE0,2"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("U2N2+NRE0,2"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("U3N3+NRE0,2"), &e, n), REQUIRED);
        assert_eq!(reducing_end_options(&parsed("UN+URE0,2"), &e, n), EXCLUDED);
    }

    #[test]
    fn test_uronic_reducing_end_with_unsaturated_cut() {
        let (e, n) = ends("DU2N2", GagClass::CS);
        assert_eq!(e.reducing, EndResidue::Known(Residue::U));
        assert_eq!(reducing_end_options(&parsed("UN+DRE0,2"), &e, n), EITHER);
        assert_eq!(
            reducing_end_options(&parsed("U2N2+DRE0,2"), &e, n),
            REQUIRED
        );
    }

    #[test]
    fn test_odd_fragments_with_known_end() {
        let (e, n) = ends("U3N4", GagClass::HS);
        assert_eq!(reducing_end_options(&parsed("UN2"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("U2N"), &e, n), EXCLUDED);
        assert_eq!(reducing_end_options(&parsed("U2N3"), &e, n), EITHER);
        assert_eq!(reducing_end_options(&parsed("U3N3"), &e, n), EITHER);
        // Five full rings plus a cross-ring piece must hold the terminus
        assert_eq!(reducing_end_options(&parsed("U2N3+URE0,2"), &e, n), REQUIRED);
        assert_eq!(reducing_end_options(&parsed("UN2+URE0,2"), &e, n), EITHER);
    }
}
