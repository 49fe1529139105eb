use rusqlite::{
    Connection,
    OpenFlags,
    OptionalExtension,
    params,
};
use std::path::Path;
use tracing::{
    debug,
    info,
};

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

const NEAREST_PRECURSOR_QUERY: &str = "
    SELECT cpm.id, f.value, p.value, f.monoMass
    FROM Precursors p, ClassPrecursorMap cpm, Formulae f
    WHERE p.id = cpm.pId
    AND f.id = p.fmId
    AND cpm.cId = ?1
    ORDER BY ABS(f.monoMass - ?2) ASC
    LIMIT 1";

const CHILD_FRAGMENTS_QUERY: &str = "
    SELECT fr.value, fm.value
    FROM ChildFragments cf, Formulae fm, Fragments fr
    WHERE cf.frId = fr.id
    AND fr.fmId = fm.id
    AND cf.cpId = ?1
    ORDER BY cf.rowid";

/// Fragment database with the `Formulae`, `Precursors`, `ClassPrecursorMap`,
/// `Fragments` and `ChildFragments` tables.
///
/// Precursor ids returned by this catalog are `ClassPrecursorMap` ids.
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!("Opening fragment database at {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

fn parse_entry<T: std::str::FromStr<Err = crate::errors::FormulaError>>(
    value: &str,
) -> Result<T, CatalogError> {
    value.parse::<T>().map_err(|source| CatalogError::InvalidEntry {
        value: value.to_string(),
        source,
    })
}

impl FragmentCatalog for SqliteCatalog {
    fn nearest_precursor(&self, class: GagClass, mass: f64) -> Result<Precursor, CatalogError> {
        let row = self
            .conn
            .query_row(NEAREST_PRECURSOR_QUERY, params![class.db_id(), mass], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })
            .optional()?;
        let (id, formula, composition, mono_mass) =
            row.ok_or(CatalogError::PrecursorNotFound { class, mass })?;
        let precursor = Precursor {
            id,
            class,
            formula: parse_entry::<ElementalFormula>(&formula)?,
            composition: parse_entry::<Composition>(&composition)?,
            mono_mass,
        };
        debug!("Nearest precursor: {:?}", precursor);
        Ok(precursor)
    }

    fn fragment_templates(
        &self,
        precursor: &Precursor,
    ) -> Result<Vec<FragmentTemplate>, CatalogError> {
        let mut stmt = self.conn.prepare(CHILD_FRAGMENTS_QUERY)?;
        let rows = stmt.query_map(params![precursor.id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (label, formula) = row?;
            out.push(FragmentTemplate {
                formula: parse_entry::<ElementalFormula>(&formula)?,
                label,
            });
        }
        info!(
            "Loaded {} fragment templates for precursor {}",
            out.len(),
            precursor.composition
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> SqliteCatalog {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE Formulae (id INTEGER PRIMARY KEY, value TEXT, monoMass REAL);
            CREATE TABLE Precursors (id INTEGER PRIMARY KEY, value TEXT, fmId INTEGER);
            CREATE TABLE ClassPrecursorMap (id INTEGER PRIMARY KEY, cId INTEGER, pId INTEGER);
            CREATE TABLE Fragments (id INTEGER PRIMARY KEY, value TEXT, fmId INTEGER);
            CREATE TABLE ChildFragments (id INTEGER PRIMARY KEY, cpId INTEGER, frId INTEGER);

            INSERT INTO Formulae VALUES (1, 'C12H21O11N', 355.1114605);
            INSERT INTO Formulae VALUES (2, 'C12H21O14NS', 435.0682754);
            INSERT INTO Formulae VALUES (3, 'C6H10O7', 194.0426826);
            INSERT INTO Formulae VALUES (4, 'C6H11O5N', 177.0637);
            INSERT INTO Precursors VALUES (1, 'UN', 1);
            INSERT INTO Precursors VALUES (2, 'UNS', 2);
            INSERT INTO ClassPrecursorMap VALUES (10, 3, 1);
            INSERT INTO ClassPrecursorMap VALUES (11, 3, 2);
            INSERT INTO ClassPrecursorMap VALUES (12, 1, 1);
            INSERT INTO Fragments VALUES (1, 'U', 3);
            INSERT INTO Fragments VALUES (2, 'N', 4);
            INSERT INTO ChildFragments VALUES (1, 10, 1);
            INSERT INTO ChildFragments VALUES (2, 10, 2);
            INSERT INTO ChildFragments VALUES (3, 12, 1);
            ",
        )
        .unwrap();
        SqliteCatalog::from_connection(conn)
    }

    #[test]
    fn test_nearest_precursor_respects_class() {
        let catalog = fixture();
        let hs = catalog.nearest_precursor(GagClass::HS, 430.0).unwrap();
        assert_eq!(hs.id, 11);
        assert_eq!(hs.composition.to_string(), "UNS");

        let cs = catalog.nearest_precursor(GagClass::CS, 430.0).unwrap();
        assert_eq!(cs.id, 12);
        assert_eq!(cs.formula.to_string(), "C12H21O11N");

        assert!(matches!(
            catalog.nearest_precursor(GagClass::KS, 430.0),
            Err(CatalogError::PrecursorNotFound { .. })
        ));
    }

    #[test]
    fn test_templates_for_precursor() {
        let catalog = fixture();
        let precursor = catalog.nearest_precursor(GagClass::HS, 355.0).unwrap();
        let templates = catalog.fragment_templates(&precursor).unwrap();
        let labels: Vec<&str> = templates.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["U", "N"]);
        assert_eq!(templates[1].formula.to_string(), "C6H11O5N");
    }
}
