use clap::{
    Parser,
    Subcommand,
};
use gagfinder::{
    ElementalFormula,
    GagClass,
    Metal,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify GAG fragment ions in a tandem mass spectrum.
    Search(SearchArgs),
    /// Write a template configuration file.
    WriteTemplate(WriteTemplateArgs),
}

/// Every option here over-writes the matching config file entry.
#[derive(Parser, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Path to the JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Centroided peak list(s); several scans are summed into one spectrum
    #[arg(short, long, num_args = 1..)]
    pub spectrum: Vec<PathBuf>,

    /// Path to the fragment database (.db for SQLite, .json for a JSON catalog)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Path to the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// GAG class of the precursor (HS, CS or KS)
    #[arg(short = 'g', long)]
    pub class: Option<GagClass>,

    /// Precursor m/z
    #[arg(short, long)]
    pub mz: Option<f64>,

    /// Precursor charge, negative in negative mode
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    pub charge: Option<i32>,

    /// Reducing-end derivatization formula, e.g. C2H4
    #[arg(short = 'r', long)]
    pub derivatization: Option<ElementalFormula>,

    /// Reagent formula added to the precursor
    #[arg(short = 'a', long)]
    pub reagent: Option<ElementalFormula>,

    /// Metal adduct (Na, K, Li, Ca or Mg)
    #[arg(long)]
    pub metal: Option<Metal>,

    /// Number of bound metals, requires --metal
    #[arg(long, requires = "metal")]
    pub metal_count: Option<u32>,

    /// Maximum number of SO3 losses
    #[arg(short = 'l', long)]
    pub sulfate_losses: Option<u32>,

    /// Peak matching tolerance in ppm
    #[arg(short, long)]
    pub precision: Option<f64>,

    /// Report the N best scoring ions
    #[arg(short = 'n', long, conflicts_with = "top_percent")]
    pub top_n: Option<usize>,

    /// Report the best scoring percentage of ions
    #[arg(short = 't', long)]
    pub top_percent: Option<f64>,

    /// Discard ions whose second isotope peak is missing
    #[arg(long)]
    pub require_second_peak: bool,
}

#[derive(Parser, Debug)]
pub struct WriteTemplateArgs {
    /// The path to the output directory.
    #[arg(short, long)]
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_args() {
        let args = Args::try_parse_from([
            "gagfinder",
            "search",
            "-s",
            "scan1.tsv",
            "scan2.tsv",
            "-g",
            "hs",
            "--mz",
            "576.13",
            "-z",
            "-3",
            "--metal",
            "Na",
            "-n",
            "20",
        ])
        .unwrap();
        let Some(Commands::Search(search)) = args.command else {
            panic!("expected the search subcommand");
        };
        assert_eq!(search.spectrum.len(), 2);
        assert_eq!(search.class, Some(GagClass::HS));
        assert_eq!(search.charge, Some(-3));
        assert_eq!(search.metal, Some(Metal::Na));
        assert_eq!(search.metal_count, None);
        assert_eq!(search.top_n, Some(20));
    }

    #[test]
    fn test_selection_flags_conflict() {
        let res = Args::try_parse_from(["gagfinder", "search", "-n", "10", "-t", "5"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_bad_metal_is_rejected() {
        let res = Args::try_parse_from(["gagfinder", "search", "--metal", "Fe"]);
        assert!(res.is_err());
    }
}
