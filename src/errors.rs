//! Centralized error handling for ClimComp
//!
//! Every failure is terminal for a run. The variants follow the three classes the
//! tool distinguishes: usage errors (bad parameters), data-availability errors
//! (nothing to compute on) and resource errors (I/O, NetCDF, malformed time data).

use std::fmt;
use std::path::PathBuf;

/// Main error type for ClimComp operations
#[derive(Debug)]
pub enum ClimCompError {
    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// CSV serialization errors
    CsvError(csv::Error),

    /// Caller-supplied bounds violate an ordering or range invariant
    InvalidBounds { message: String },

    /// Dataset source identifier is not recognized
    UnknownDatasetSource { source: String },

    /// No dataset files were found below the data directory
    NoDatasets { path: PathBuf },

    /// Variable not found in a dataset file
    VariableNotFound { var: String, file: PathBuf },

    /// Coordinate variable not found in a dataset file
    CoordinateNotFound { name: String, file: PathBuf },

    /// Bounding box does not overlap a file's coordinate extent
    OutOfRange { message: String, file: PathBuf },

    /// Bounding box selects no grid cells along an axis
    EmptySelection { axis: String, file: PathBuf },

    /// Every selected cell is masked or non-finite
    NoValidData { var: String, file: PathBuf },

    /// Time coordinate could not be decoded
    TimeDecode { message: String },

    /// Requested target year is absent from the climatology table
    YearNotFound { year: i32 },

    /// Climatology table has no rows
    EmptyClimatology,

    /// Thread pool configuration error
    ThreadPoolError(String),
}

impl fmt::Display for ClimCompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClimCompError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            ClimCompError::IoError(e) => write!(f, "I/O error: {}", e),
            ClimCompError::CsvError(e) => write!(f, "CSV error: {}", e),
            ClimCompError::InvalidBounds { message } => write!(f, "{}", message),
            ClimCompError::UnknownDatasetSource { source } => {
                write!(f, "Method to analyze dataset '{}' is not available", source)
            }
            ClimCompError::NoDatasets { path } => {
                write!(f, "No available datasets under '{}'", path.display())
            }
            ClimCompError::VariableNotFound { var, file } => {
                write!(f, "Variable '{}' not in dataset '{}'", var, file.display())
            }
            ClimCompError::CoordinateNotFound { name, file } => {
                write!(f, "Coordinate '{}' not in dataset '{}'", name, file.display())
            }
            ClimCompError::OutOfRange { message, file } => {
                write!(f, "{} for dataset '{}'", message, file.display())
            }
            ClimCompError::EmptySelection { axis, file } => write!(
                f,
                "Bounding box selects no {} grid cells in dataset '{}'",
                axis,
                file.display()
            ),
            ClimCompError::NoValidData { var, file } => write!(
                f,
                "No valid '{}' values inside the bounding box of dataset '{}'",
                var,
                file.display()
            ),
            ClimCompError::TimeDecode { message } => write!(f, "Time decoding error: {}", message),
            ClimCompError::YearNotFound { year } => {
                write!(f, "Year {} not found in the climatology", year)
            }
            ClimCompError::EmptyClimatology => write!(f, "Climatology table is empty"),
            ClimCompError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl std::error::Error for ClimCompError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClimCompError::NetCDFError(e) => Some(e),
            ClimCompError::IoError(e) => Some(e),
            ClimCompError::CsvError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<netcdf::Error> for ClimCompError {
    fn from(error: netcdf::Error) -> Self {
        ClimCompError::NetCDFError(error)
    }
}

impl From<std::io::Error> for ClimCompError {
    fn from(error: std::io::Error) -> Self {
        ClimCompError::IoError(error)
    }
}

impl From<csv::Error> for ClimCompError {
    fn from(error: csv::Error) -> Self {
        ClimCompError::CsvError(error)
    }
}

/// Result type alias for ClimComp operations
pub type Result<T> = std::result::Result<T, ClimCompError>;
