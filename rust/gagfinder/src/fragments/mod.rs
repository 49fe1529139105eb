pub mod enumerator;
pub mod feasibility;
pub mod modifications;

pub use enumerator::{
    CandidateSet,
    EnumerationSettings,
    FragmentEnumerator,
};
pub use feasibility::reducing_end_options;
pub use modifications::{
    ChemicalGroups,
    FragmentVariant,
    Modifications,
    VariantKind,
};
