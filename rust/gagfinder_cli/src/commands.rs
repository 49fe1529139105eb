use tracing::{
    info,
    instrument,
};

use crate::cli::{
    SearchArgs,
    WriteTemplateArgs,
};
use crate::config::{
    Config,
    MatchingConfig,
};
use crate::errors::CliError;
use crate::output::write_results_file;
use crate::processing::{
    load_spectrum,
    open_catalog,
    process_search,
    result_path,
};

const CONFIG_TEMPLATE: &str = r#"{
    "input": {
        "spectra": ["scan_0001.tsv", "scan_0002.tsv"],
        "catalog": { "type": "sqlite", "path": "GAGfragDB.db" }
    },
    "precursor": {
        "class": "HS",
        "mz": 576.1284,
        "charge": -3
    },
    "chemistry": {
        "derivatization": null,
        "reagent": null,
        "adduct": { "metal": "Na", "count": 1 },
        "max_sulfate_losses": 1
    },
    "matching": {
        "tolerance": { "ppm": [20.0, 20.0] },
        "truncation_threshold": 0.95,
        "correct_precursor_error": true,
        "require_second_peak": false
    },
    "selection": { "top_n": 100 },
    "output": { "directory": "gagfinder_results" }
}
"#;

/// Main function for the 'search' subcommand.
#[instrument(skip(args))]
pub fn main_search(args: SearchArgs) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    config.apply_overrides(&args)?;
    info!("Parsed configuration: {:#?}", config);

    let params = config.search_parameters()?;
    let input = config.input.clone().unwrap_or_default();
    let catalog_config = input.catalog.ok_or_else(|| {
        CliError::Config(
            "No fragment database provided, please provide one in either the config file or with the --database flag"
                .to_string(),
        )
    })?;
    let output_dir = config
        .output
        .as_ref()
        .map(|o| o.directory.clone())
        .ok_or_else(|| {
            CliError::Config(
                "No output directory provided, please provide one in either the config file or with the --output-dir flag"
                    .to_string(),
            )
        })?;

    let MatchingConfig {
        tolerance,
        scan_merge_tolerance,
        ..
    } = config.matching;
    let spectrum = load_spectrum(&input.spectra, &scan_merge_tolerance.unwrap_or(tolerance))?;
    let catalog = open_catalog(&catalog_config)?;
    let outcome = process_search(&params, catalog.as_ref(), &spectrum)?;

    std::fs::create_dir_all(&output_dir)?;
    let out_path = result_path(&output_dir, &input.spectra[0]);
    write_results_file(&out_path, &outcome.rows)?;
    let params_path = output_dir.join("search_parameters.json");
    std::fs::write(&params_path, serde_json::to_string_pretty(&params)?)?;
    println!(
        "Wrote {} ions to {}",
        outcome.rows.len(),
        out_path.display()
    );
    Ok(())
}

pub fn main_write_template(args: WriteTemplateArgs) -> Result<(), CliError> {
    let target_dir = args.output_path;
    std::fs::create_dir_all(&target_dir)?;

    let config_path = target_dir.join("gagfinder_config_template.json");
    std::fs::write(&config_path, CONFIG_TEMPLATE)?;
    println!("Wrote config template to: {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use gagfinder::{
        GagClass,
        Selection,
    };
    use gagquery::MzTolerance;

    #[test]
    fn test_config_template_parses() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        let input = config.input.clone().unwrap();
        assert_eq!(input.spectra.len(), 2);
        assert!(matches!(input.catalog, Some(CatalogConfig::Sqlite { .. })));
        assert_eq!(config.selection, Some(Selection::TopN(100)));
        assert!(matches!(config.matching.tolerance, MzTolerance::Ppm(_)));

        let params = config.search_parameters().unwrap();
        assert_eq!(params.class, GagClass::HS);
        assert_eq!(params.charge, -3);
        assert_eq!(params.adduct.unwrap().count, 1);
    }

    #[test]
    fn test_write_template() {
        let dir = tempfile::tempdir().unwrap();
        main_write_template(WriteTemplateArgs {
            output_path: dir.path().join("templates"),
        })
        .unwrap();
        let written = dir.path().join("templates/gagfinder_config_template.json");
        let config = Config::from_path(&written).unwrap();
        assert!(config.precursor.is_some());
    }

    #[test]
    fn test_search_writes_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(
            &catalog_path,
            r#"{"precursors": [{
                "id": 1, "class": "HS", "formula": "C12H21O11N", "composition": "UN",
                "fragments": [{ "label": "U", "formula": "C6H10O7" }]
            }]}"#,
        )
        .unwrap();
        let spectrum_path = dir.path().join("scan.tsv");
        // Isotope peaks of the intact disaccharide at charge -1
        std::fs::write(
            &spectrum_path,
            "m/z\tintensity\n354.1042\t1000\n355.1075\t140\n356.1080\t30\n",
        )
        .unwrap();
        let out_dir = dir.path().join("out");

        let args = SearchArgs {
            spectrum: vec![spectrum_path],
            database: Some(catalog_path),
            output_dir: Some(out_dir.clone()),
            class: Some(GagClass::HS),
            mz: Some(176.5485),
            charge: Some(-2),
            top_n: Some(5),
            ..Default::default()
        };
        main_search(args).unwrap();

        let text = std::fs::read_to_string(out_dir.join("scan.gagfinder.tsv")).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("m/z\tIntensity\tCharge\tFragments\tG-score\tError (ppm)")
        );
        let first: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(first[2], "-1");
        assert_eq!(first[3], "M");
        assert!(out_dir.join("search_parameters.json").exists());
    }
}
