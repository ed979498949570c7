//! Validated run parameters
//!
//! Raw command-line values are turned into a [`ClimatologyConfig`] before any file
//! is touched. All caller-parameter ordering checks live here so the pipeline can be
//! driven from tests without going through process arguments.

use crate::errors::{ClimCompError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Rectangular region in degrees. `min < max` holds on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Build a bounding box, checking longitude ordering before latitude ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ClimCompError::InvalidBounds`] when `max <= min` on either axis.
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Result<Self> {
        // Written as negations so NaN bounds are rejected too
        if !(min_lon < max_lon) {
            return Err(ClimCompError::InvalidBounds {
                message: "Maximum longitude smaller than minimum longitude".to_string(),
            });
        }
        if !(min_lat < max_lat) {
            return Err(ClimCompError::InvalidBounds {
                message: "Maximum latitude smaller than minimum latitude".to_string(),
            });
        }

        Ok(Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        })
    }
}

/// Inclusive, contiguous range of calendar months. No wraparound across December.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindow {
    pub min_month: u32,
    pub max_month: u32,
}

impl SeasonWindow {
    /// # Errors
    ///
    /// Returns [`ClimCompError::InvalidBounds`] when `max_month <= min_month` or either
    /// month lies outside 1..=12.
    pub fn new(min_month: u32, max_month: u32) -> Result<Self> {
        if max_month <= min_month {
            return Err(ClimCompError::InvalidBounds {
                message: "Maximum month smaller than minimum month".to_string(),
            });
        }
        for (label, month) in [("Minimum", min_month), ("Maximum", max_month)] {
            if !(1..=12).contains(&month) {
                return Err(ClimCompError::InvalidBounds {
                    message: format!("{label} month {month} is outside 1..=12"),
                });
            }
        }

        Ok(Self {
            min_month,
            max_month,
        })
    }

    /// Whether `month` falls inside the window.
    #[must_use]
    pub fn contains(&self, month: u32) -> bool {
        (self.min_month..=self.max_month).contains(&month)
    }

    /// Number of calendar months in the window.
    #[must_use]
    pub fn month_count(&self) -> usize {
        (self.max_month - self.min_month + 1) as usize
    }
}

/// Gridded data conventions the tool knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    /// FLDAS monthly files: `<root>/<subdir>/*.nc`, coordinates `time`, `X`, `Y`
    Fldas,
}

impl DatasetSource {
    /// Extension of the dataset files, without the dot
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Fldas => "nc",
        }
    }

    #[must_use]
    pub const fn time_coordinate(self) -> &'static str {
        match self {
            Self::Fldas => "time",
        }
    }

    #[must_use]
    pub const fn lon_coordinate(self) -> &'static str {
        match self {
            Self::Fldas => "X",
        }
    }

    #[must_use]
    pub const fn lat_coordinate(self) -> &'static str {
        match self {
            Self::Fldas => "Y",
        }
    }
}

impl FromStr for DatasetSource {
    type Err = ClimCompError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "FLDAS" => Ok(Self::Fldas),
            other => Err(ClimCompError::UnknownDatasetSource {
                source: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fldas => write!(f, "FLDAS"),
        }
    }
}

/// What to do with years whose observations do not cover every month of the season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PartialSeasonPolicy {
    /// Keep them in the climatology (a warning is still logged)
    #[default]
    Include,
    /// Drop them from the climatology
    Exclude,
}

/// Fully validated parameters for one climatology run
#[derive(Debug, Clone)]
pub struct ClimatologyConfig {
    pub data_dir: PathBuf,
    pub source: DatasetSource,
    pub variable: String,
    pub bbox: BoundingBox,
    pub season: SeasonWindow,
    pub target_year: i32,
    pub output_dir: PathBuf,
    pub partial_seasons: PartialSeasonPolicy,
}

impl ClimatologyConfig {
    /// Validate raw parameters.
    ///
    /// Bounds are checked first (longitude, latitude, month), then the dataset source.
    /// No file system access happens here.
    ///
    /// # Errors
    ///
    /// Returns a usage error naming the first invariant that does not hold.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data_dir: impl Into<PathBuf>,
        source: &str,
        variable: impl Into<String>,
        lon: (f64, f64),
        lat: (f64, f64),
        months: (u32, u32),
        target_year: i32,
    ) -> Result<Self> {
        let bbox = BoundingBox::new(lon.0, lon.1, lat.0, lat.1)?;
        let season = SeasonWindow::new(months.0, months.1)?;
        let source = source.parse::<DatasetSource>()?;

        Ok(Self {
            data_dir: data_dir.into(),
            source,
            variable: variable.into(),
            bbox,
            season,
            target_year,
            output_dir: PathBuf::from("."),
            partial_seasons: PartialSeasonPolicy::default(),
        })
    }

    /// Directory the two output artifacts are written to
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_partial_seasons(mut self, policy: PartialSeasonPolicy) -> Self {
        self.partial_seasons = policy;
        self
    }
}
