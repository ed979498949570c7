//! ClimComp: seasonal climatology from gridded NetCDF datasets
//!
//! Computes a multi-year seasonal average over a bounding box from a directory of
//! monthly gridded files, then estimates how one target year ranks against it.
//!
//! ## Pipeline
//!
//! 1. [`config`]: validate bounds, season and dataset source before any I/O
//! 2. [`locator`]: find the dataset files one directory level below the root
//! 3. [`extract`]: reduce each in-season file to the mean over the bounding box
//! 4. [`statistics`]: average per year and compute the probability rank
//! 5. [`report`]: write `climatology.csv` and `summary.txt`
//!
//! [`pipeline::run`] drives the whole sequence.
//!
//! ## Usage
//! ```rust,no_run
//! use clim_comp::prelude::*;
//!
//! let config = ClimatologyConfig::new(
//!     "/data/FLDAS",
//!     "FLDAS",
//!     "Rainf_f_tavg",
//!     (33.0, 48.0),
//!     (3.0, 15.0),
//!     (3, 5),
//!     2011,
//! )
//! .unwrap();
//!
//! let report = clim_comp::pipeline::run(&config).unwrap();
//! println!("P = {}", report.probability);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod locator;
pub mod logging;
pub mod netcdf_io;
pub mod parallel;
pub mod pipeline;
pub mod report;
pub mod statistics;
pub mod time;

pub use errors::{ClimCompError, Result};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::config::{
        BoundingBox, ClimatologyConfig, DatasetSource, PartialSeasonPolicy, SeasonWindow,
    };
    pub use crate::errors::{ClimCompError, Result};
    pub use crate::parallel::ParallelConfig;
    pub use crate::pipeline::{run, ClimatologyReport};
    pub use crate::statistics::{ClimatologyTable, Observation, YearlyAverage};
}
