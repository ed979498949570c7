//! End-to-end climatology run
//!
//! Locate files, extract one observation per in-season file, average per year,
//! write the table, then rank the target year and write the summary.

use crate::config::{ClimatologyConfig, PartialSeasonPolicy};
use crate::errors::Result;
use crate::extract::extract_observation;
use crate::locator::find_dataset_files;
use crate::report::{
    summary_sentence, write_climatology_csv, write_summary, CLIMATOLOGY_FILE, SUMMARY_FILE,
};
use crate::statistics::{aggregate_by_year, probability_below, ClimatologyTable, Observation};
use log::{info, warn};
use rayon::prelude::*;
use std::path::PathBuf;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ClimatologyReport {
    pub table: ClimatologyTable,
    pub probability: f64,
    pub climatology_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Extract observations from every file, in file order.
///
/// # Errors
///
/// Returns the first extraction error encountered.
pub fn collect_observations(
    files: &[PathBuf],
    config: &ClimatologyConfig,
) -> Result<Vec<Observation>> {
    let extracted = files
        .par_iter()
        .map(|path| extract_observation(path, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(extracted.into_iter().flatten().collect())
}

/// Run the whole computation for a validated configuration.
///
/// The climatology table is written before the target year is looked up, so a
/// missing target year leaves `climatology.csv` in place and `summary.txt` untouched.
///
/// # Errors
///
/// Any failure aborts the run; see [`crate::errors::ClimCompError`].
pub fn run(config: &ClimatologyConfig) -> Result<ClimatologyReport> {
    let files = find_dataset_files(&config.data_dir, config.source.file_extension())?;
    info!(
        "Found {} {} files under {}",
        files.len(),
        config.source,
        config.data_dir.display()
    );

    let observations = collect_observations(&files, config)?;
    info!(
        "Kept {} in-season files, skipped {}",
        observations.len(),
        files.len() - observations.len()
    );

    let mut table = aggregate_by_year(&observations);
    let partial = table.partial_years(&config.season);
    if !partial.is_empty() {
        warn!(
            "{} year(s) do not cover months {}-{}: {:?}",
            partial.len(),
            config.season.min_month,
            config.season.max_month,
            partial
        );
        if config.partial_seasons == PartialSeasonPolicy::Exclude {
            table = table.retain_complete(&config.season);
            info!("Excluded partial-season years from the climatology");
        }
    }

    let climatology_path = config.output_dir.join(CLIMATOLOGY_FILE);
    write_climatology_csv(&table, &climatology_path)?;
    info!(
        "Wrote {} yearly averages to {}",
        table.len(),
        climatology_path.display()
    );

    let probability = probability_below(&table, config.target_year)?;
    let sentence = summary_sentence(&config.variable, config.target_year, probability);

    let summary_path = config.output_dir.join(SUMMARY_FILE);
    write_summary(&sentence, &summary_path)?;
    info!("{sentence}");
    info!("Wrote summary to {}", summary_path.display());

    Ok(ClimatologyReport {
        table,
        probability,
        climatology_path,
        summary_path,
    })
}
