//! NetCDF reading for gridded datasets
//!
//! [`GriddedFile`] owns an open NetCDF handle for the duration of one extraction.
//! The handle is closed when the value is dropped, so every early return releases it.

use crate::errors::{ClimCompError, Result};
use crate::time::{check_calendar, CfTimeUnits};
use chrono::NaiveDateTime;
use ndarray::ArrayD;
use netcdf::{AttributeValue, File, Variable};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// An open gridded dataset file
pub struct GriddedFile {
    file: File,
    path: PathBuf,
}

impl GriddedFile {
    /// Open a NetCDF file for reading
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened as NetCDF.
    pub fn open(path: &Path) -> Result<Self> {
        let file = netcdf::open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path the file was opened from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file declares a variable with this name
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    /// Decode the first entry of the time coordinate.
    ///
    /// Returns the instant together with the number of time steps in the file.
    ///
    /// # Errors
    ///
    /// Fails if the coordinate is missing or empty, or its units cannot be decoded.
    pub fn first_timestamp(&self, name: &str) -> Result<(NaiveDateTime, usize)> {
        let var = self.coordinate_variable(name)?;

        let steps = var.dimensions().first().map_or(0, netcdf::Dimension::len);
        if steps == 0 {
            return Err(ClimCompError::TimeDecode {
                message: format!(
                    "time coordinate '{}' in '{}' is empty",
                    name,
                    self.path.display()
                ),
            });
        }

        check_calendar(attribute_str(&var, "calendar").as_deref())?;
        let units: CfTimeUnits = attribute_str(&var, "units")
            .ok_or_else(|| ClimCompError::TimeDecode {
                message: format!(
                    "time coordinate '{}' in '{}' has no units",
                    name,
                    self.path.display()
                ),
            })?
            .parse()?;

        let raw = var.get_value::<f64, _>(0)?;
        Ok((units.decode(raw)?, steps))
    }

    /// Read a one-dimensional coordinate variable as `f64`
    ///
    /// # Errors
    ///
    /// Returns [`ClimCompError::CoordinateNotFound`] if the coordinate is absent.
    pub fn coordinate(&self, name: &str) -> Result<Vec<f64>> {
        let var = self.coordinate_variable(name)?;
        Ok(var.get_values::<f64, _>(..)?)
    }

    /// Read the `[time, lat, lon]` block of a variable covered by the two index ranges.
    ///
    /// All time steps are kept. `_FillValue` and `missing_value` cells become NaN and
    /// `scale_factor`/`add_offset` are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ClimCompError::VariableNotFound`] if the variable is absent, or a NetCDF
    /// error if the variable is not three-dimensional.
    pub fn variable_box(
        &self,
        var_name: &str,
        lat: Range<usize>,
        lon: Range<usize>,
    ) -> Result<ArrayD<f64>> {
        let var = self
            .file
            .variable(var_name)
            .ok_or_else(|| ClimCompError::VariableNotFound {
                var: var_name.to_string(),
                file: self.path.clone(),
            })?;

        let raw = var.get::<f64, _>((.., lat, lon))?;

        let fill_values: Vec<f64> = ["_FillValue", "missing_value"]
            .iter()
            .filter_map(|attr| attribute_f64(&var, attr))
            .collect();
        let scale = attribute_f64(&var, "scale_factor").unwrap_or(1.0);
        let offset = attribute_f64(&var, "add_offset").unwrap_or(0.0);

        Ok(raw.mapv(|x| {
            if fill_values.contains(&x) {
                f64::NAN
            } else {
                x * scale + offset
            }
        }))
    }

    fn coordinate_variable(&self, name: &str) -> Result<Variable<'_>> {
        self.file
            .variable(name)
            .ok_or_else(|| ClimCompError::CoordinateNotFound {
                name: name.to_string(),
                file: self.path.clone(),
            })
    }
}

fn attribute_str(var: &Variable, name: &str) -> Option<String> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn attribute_f64(var: &Variable, name: &str) -> Option<f64> {
    match var.attribute(name)?.value().ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        _ => None,
    }
}
