use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::CatalogError;

/// Glycosaminoglycan family of the precursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GagClass {
    /// Heparan sulfate.
    HS,
    /// Chondroitin sulfate.
    CS,
    /// Keratan sulfate.
    KS,
}

impl GagClass {
    /// Class id used by the fragment database.
    pub fn db_id(&self) -> i64 {
        match self {
            GagClass::CS => 1,
            GagClass::HS => 3,
            GagClass::KS => 4,
        }
    }

    pub fn from_db_id(id: i64) -> Result<Self, CatalogError> {
        match id {
            1 => Ok(GagClass::CS),
            3 => Ok(GagClass::HS),
            4 => Ok(GagClass::KS),
            other => Err(CatalogError::UnknownClassId(other)),
        }
    }
}

impl Display for GagClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GagClass::HS => "HS",
            GagClass::CS => "CS",
            GagClass::KS => "KS",
        };
        f.write_str(s)
    }
}

impl FromStr for GagClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HS" => Ok(GagClass::HS),
            "CS" => Ok(GagClass::CS),
            "KS" => Ok(GagClass::KS),
            other => Err(format!("Unknown GAG class '{}', expected HS, CS or KS", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_ids_round_trip() {
        for class in [GagClass::HS, GagClass::CS, GagClass::KS] {
            assert_eq!(GagClass::from_db_id(class.db_id()).unwrap(), class);
            assert_eq!(class.to_string().parse::<GagClass>().unwrap(), class);
        }
        assert!(GagClass::from_db_id(2).is_err());
    }
}
