use gagfinder::ResultRow;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::errors::CliError;

const HEADER: [&str; 6] = [
    "m/z",
    "Intensity",
    "Charge",
    "Fragments",
    "G-score",
    "Error (ppm)",
];

/// Writes ranked rows as tab separated text, one ion per line.
pub fn write_rows<W: Write>(writer: W, rows: &[ResultRow]) -> Result<(), CliError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record([
            row.mz.to_string(),
            row.intensity.to_string(),
            row.charge.to_string(),
            row.joined_labels(),
            row.g_score.to_string(),
            row.ppm_error.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results_file(path: &Path, rows: &[ResultRow]) -> Result<(), CliError> {
    let file = std::fs::File::create(path)?;
    write_rows(std::io::BufWriter::new(file), rows)?;
    info!("Wrote {} results to {}", rows.len(), path.display());
    Ok(())
}
