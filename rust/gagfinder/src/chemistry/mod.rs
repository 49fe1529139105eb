pub mod codec;
pub mod composition;
pub mod elements;
pub mod formula;

pub use codec::{
    SymbolCounts,
    decode,
    encode,
};
pub use composition::{
    Composition,
    Residue,
};
pub use elements::{
    Element,
    HYDROGEN_MASS,
    Metal,
    MetalAdduct,
    PROTON_MASS,
};
pub use formula::ElementalFormula;
