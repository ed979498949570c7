//! Defines command-line interface options using `clap` for the ClimComp application.

use crate::config::{ClimatologyConfig, PartialSeasonPolicy};
use crate::errors::Result;
use clap::Parser;
use std::path::PathBuf;

/// Seasonal climatology and probability rank of one year from gridded datasets
#[derive(Parser, Debug)]
#[command(
    name = "climcomp",
    version,
    about = "Compare one year's seasonal mean against a multi-year climatology"
)]
pub struct Args {
    /// Directory whose subdirectories hold the dataset files
    pub path: PathBuf,

    /// Dataset source convention (only FLDAS is available)
    pub dataset_source: String,

    /// Name of the variable of interest as declared in the files
    pub variable: String,

    /// Minimum longitude of the bounding box
    #[arg(allow_negative_numbers = true)]
    pub min_lon: f64,

    /// Maximum longitude of the bounding box
    #[arg(allow_negative_numbers = true)]
    pub max_lon: f64,

    /// Minimum latitude of the bounding box
    #[arg(allow_negative_numbers = true)]
    pub min_lat: f64,

    /// Maximum latitude of the bounding box
    #[arg(allow_negative_numbers = true)]
    pub max_lat: f64,

    /// First month of the season (1-12)
    pub min_month: u32,

    /// Last month of the season (1-12)
    pub max_month: u32,

    /// Year to rank against the climatology
    #[arg(allow_negative_numbers = true)]
    pub year: i32,

    /// Directory for climatology.csv and summary.txt
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// How to treat years missing some season months
    #[arg(long, value_enum, default_value_t = PartialSeasonPolicy::Include)]
    pub partial_seasons: PartialSeasonPolicy,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for parallel extraction. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

impl Args {
    /// Validate the raw arguments into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns the usage error raised by [`ClimatologyConfig::new`].
    pub fn to_config(&self) -> Result<ClimatologyConfig> {
        Ok(ClimatologyConfig::new(
            self.path.clone(),
            &self.dataset_source,
            self.variable.clone(),
            (self.min_lon, self.max_lon),
            (self.min_lat, self.max_lat),
            (self.min_month, self.max_month),
            self.year,
        )?
        .with_output_dir(self.output_dir.clone())
        .with_partial_seasons(self.partial_seasons))
    }
}
