pub mod class;
pub mod cross_ring;
pub mod ends;
pub mod precursor;
pub mod template;

pub use class::GagClass;
pub use cross_ring::{
    CrossRingSite,
    CrossRingTable,
    ResidueEnd,
};
pub use ends::{
    EndAssignment,
    EndResidue,
};
pub use precursor::{
    Precursor,
    PrecursorQuery,
};
pub use template::{
    FragmentTemplate,
    ParsedTemplate,
};
