use gagfinder::chemistry::MetalAdduct;
use gagfinder::isotopes::DEFAULT_TRUNCATION_THRESHOLD;
use gagfinder::{
    ElementalFormula,
    GagClass,
    SearchParameters,
    Selection,
};
use gagquery::MzTolerance;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};

use crate::cli::SearchArgs;
use crate::errors::CliError;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub input: Option<InputConfig>,
    pub precursor: Option<PrecursorConfig>,
    #[serde(default)]
    pub chemistry: ChemistryConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    pub selection: Option<Selection>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InputConfig {
    /// Centroided peak lists, summed when there is more than one.
    #[serde(default)]
    pub spectra: Vec<PathBuf>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum CatalogConfig {
    #[serde(rename = "sqlite")]
    Sqlite { path: PathBuf },
    #[serde(rename = "json")]
    Json { path: PathBuf },
}

impl CatalogConfig {
    /// Picks the catalog kind from the file extension.
    pub fn from_path(path: PathBuf) -> Self {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            CatalogConfig::Json { path }
        } else {
            CatalogConfig::Sqlite { path }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrecursorConfig {
    pub class: GagClass,
    pub mz: f64,
    pub charge: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChemistryConfig {
    pub derivatization: Option<ElementalFormula>,
    pub reagent: Option<ElementalFormula>,
    pub adduct: Option<MetalAdduct>,
    pub max_sulfate_losses: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MatchingConfig {
    pub tolerance: MzTolerance,
    pub truncation_threshold: f64,
    pub correct_precursor_error: bool,
    pub require_second_peak: bool,
    /// Peak merging window when summing scans; defaults to `tolerance`.
    pub scan_merge_tolerance: Option<MzTolerance>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance: MzTolerance::default(),
            truncation_threshold: DEFAULT_TRUNCATION_THRESHOLD,
            correct_precursor_error: true,
            require_second_peak: false,
            scan_merge_tolerance: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Command line values take precedence over the file.
    pub fn apply_overrides(&mut self, args: &SearchArgs) -> Result<(), CliError> {
        if !args.spectrum.is_empty() || args.database.is_some() {
            let input = self.input.get_or_insert_with(InputConfig::default);
            if !args.spectrum.is_empty() {
                input.spectra = args.spectrum.clone();
            }
            if let Some(db) = &args.database {
                input.catalog = Some(CatalogConfig::from_path(db.clone()));
            }
        }

        if let Some(p) = self.precursor.as_mut() {
            if let Some(class) = args.class {
                p.class = class;
            }
            if let Some(mz) = args.mz {
                p.mz = mz;
            }
            if let Some(charge) = args.charge {
                p.charge = charge;
            }
        } else {
            match (args.class, args.mz, args.charge) {
                (Some(class), Some(mz), Some(charge)) => {
                    self.precursor = Some(PrecursorConfig { class, mz, charge });
                }
                (None, None, None) => {}
                _ => {
                    return Err(CliError::Config(
                        "--class, --mz and --charge must be given together when the config has no precursor"
                            .to_string(),
                    ));
                }
            }
        }

        if let Some(d) = args.derivatization {
            self.chemistry.derivatization = Some(d);
        }
        if let Some(r) = args.reagent {
            self.chemistry.reagent = Some(r);
        }
        if let Some(metal) = args.metal {
            self.chemistry.adduct = Some(MetalAdduct {
                metal,
                count: args.metal_count.unwrap_or(1),
            });
        }
        if let Some(n) = args.sulfate_losses {
            self.chemistry.max_sulfate_losses = n;
        }
        if let Some(ppm) = args.precision {
            self.matching.tolerance = MzTolerance::symmetric_ppm(ppm);
        }
        if args.require_second_peak {
            self.matching.require_second_peak = true;
        }
        match (args.top_n, args.top_percent) {
            (Some(n), None) => self.selection = Some(Selection::TopN(n)),
            (None, Some(p)) => self.selection = Some(Selection::TopPercent(p)),
            (None, None) => {}
            (Some(_), Some(_)) => {
                return Err(CliError::Config(
                    "Only one of --top-n and --top-percent can be given".to_string(),
                ));
            }
        }
        if let Some(dir) = &args.output_dir {
            self.output = Some(OutputConfig {
                directory: dir.clone(),
            });
        }
        Ok(())
    }

    pub fn search_parameters(&self) -> Result<SearchParameters, CliError> {
        let precursor = self.precursor.as_ref().ok_or_else(|| {
            CliError::Config(
                "No precursor provided, please provide one in either the config file or with --class, --mz and --charge"
                    .to_string(),
            )
        })?;
        let selection = self.selection.ok_or_else(|| {
            CliError::Config(
                "No selection provided, please set either top_n or top_percent".to_string(),
            )
        })?;
        let params = SearchParameters {
            class: precursor.class,
            mz: precursor.mz,
            charge: precursor.charge,
            derivatization: self.chemistry.derivatization,
            reagent: self.chemistry.reagent,
            adduct: self.chemistry.adduct,
            max_sulfate_losses: self.chemistry.max_sulfate_losses,
            truncation_threshold: self.matching.truncation_threshold,
            tolerance: self.matching.tolerance,
            correct_precursor_error: self.matching.correct_precursor_error,
            require_second_peak: self.matching.require_second_peak,
            selection,
        };
        params.validate().map_err(gagfinder::GagFinderError::from)?;
        Ok(params)
    }
}
