use gagfinder::catalog::{
    FragmentCatalog,
    JsonCatalog,
    SqliteCatalog,
};
use gagfinder::{
    SearchOutcome,
    SearchParameters,
    run_search,
};
use gagquery::{
    MzTolerance,
    Spectrum,
    read_peak_list,
    sum_scans,
};
use std::path::{
    Path,
    PathBuf,
};
use std::time::Instant;
use tracing::info;

use crate::config::CatalogConfig;
use crate::errors::CliError;

/// Reads one peak list, or averages several into a single spectrum.
pub fn load_spectrum(paths: &[PathBuf], merge_tolerance: &MzTolerance) -> Result<Spectrum, CliError> {
    let spectrum = match paths {
        [] => {
            return Err(CliError::Config(
                "No spectrum provided, please provide one in either the config file or with the --spectrum flag"
                    .to_string(),
            ));
        }
        [single] => Spectrum::try_new(read_peak_list(single)?)?,
        many => {
            let scans = many
                .iter()
                .map(read_peak_list)
                .collect::<Result<Vec<_>, _>>()?;
            Spectrum::try_new(sum_scans(&scans, merge_tolerance))?
        }
    };
    info!(
        "Loaded spectrum with {} peaks from {} file(s)",
        spectrum.len(),
        paths.len()
    );
    Ok(spectrum)
}

pub fn open_catalog(config: &CatalogConfig) -> Result<Box<dyn FragmentCatalog>, CliError> {
    let catalog: Box<dyn FragmentCatalog> = match config {
        CatalogConfig::Sqlite { path } => Box::new(SqliteCatalog::open(path)?),
        CatalogConfig::Json { path } => Box::new(JsonCatalog::from_path(path)?),
    };
    Ok(catalog)
}

/// `<output dir>/<spectrum stem>.gagfinder.tsv`, never the peak list itself.
pub fn result_path(output_dir: &Path, spectrum: &Path) -> PathBuf {
    let stem = spectrum
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "results".to_string());
    output_dir.join(format!("{}.gagfinder.tsv", stem))
}

pub fn process_search(
    params: &SearchParameters,
    catalog: &dyn FragmentCatalog,
    spectrum: &Spectrum,
) -> Result<SearchOutcome, CliError> {
    let st = Instant::now();
    let outcome = run_search(params, catalog, spectrum)?;
    info!(
        "Search over {} labels ({} formulas, {} envelopes) took {:?}",
        outcome.num_labels,
        outcome.num_formulas,
        outcome.num_envelopes,
        st.elapsed()
    );
    println!(
        "Tested {} out of {} envelopes",
        outcome.metrics.num_scored, outcome.metrics.num_candidates
    );
    Ok(outcome)
}
