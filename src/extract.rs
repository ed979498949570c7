//! Per-file extraction
//!
//! Each dataset file yields at most one [`Observation`]: the mean of the requested
//! variable over the bounding box, dated by the file's first timestamp.
//!
//! Files are expected to hold a single time slice. When a file holds more, the
//! mean is taken jointly over all of its slices and the first timestamp still
//! dates the result.

use crate::config::{BoundingBox, ClimatologyConfig};
use crate::errors::{ClimCompError, Result};
use crate::netcdf_io::GriddedFile;
use crate::statistics::{finite_mean, Observation};
use crate::time::year_month;
use log::{debug, warn};
use std::ops::Range;
use std::path::Path;

/// Index range selected along one coordinate axis.
///
/// The range starts at the first index whose coordinate is strictly greater than
/// `min` and stops before the last index whose coordinate is strictly lower than
/// `max`, so the last qualifying cell at the upper edge is left out.
///
/// Returns `None` when the range would be empty.
///
/// # Examples
///
/// ```
/// use clim_comp::extract::bounding_indices;
///
/// let lon = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(bounding_indices(&lon, 1.5, 4.5), Some(1..3));
/// ```
// TODO: the upper edge drops the last qualifying cell; confirm with data users
// whether `..=last` was intended before changing published climatologies.
#[must_use]
pub fn bounding_indices(coords: &[f64], min: f64, max: f64) -> Option<Range<usize>> {
    let start = coords.iter().position(|&c| c > min)?;
    let last = coords.iter().rposition(|&c| c < max)?;
    (start < last).then_some(start..last)
}

/// Check that the bounding box overlaps the file's coordinate extent.
///
/// # Errors
///
/// Returns [`ClimCompError::OutOfRange`] naming the first bound that misses the grid,
/// checked in the order minimum latitude, maximum latitude, minimum longitude,
/// maximum longitude.
///
/// A coordinate array containing NaN has a NaN extent, so every comparison against it
/// fails and the first bound on that axis is reported out of range. Empty arrays fail
/// the same way.
pub fn check_overlap(bbox: &BoundingBox, lon: &[f64], lat: &[f64], file: &Path) -> Result<()> {
    let (lon_min, lon_max) = extent(lon);
    let (lat_min, lat_max) = extent(lat);

    // Negated so that NaN extents count as misses
    let failure = if !(bbox.min_lat < lat_max) {
        Some("Minimum latitude out of range")
    } else if !(bbox.max_lat > lat_min) {
        Some("Maximum latitude out of range")
    } else if !(bbox.min_lon < lon_max) {
        Some("Minimum longitude out of range")
    } else if !(bbox.max_lon > lon_min) {
        Some("Maximum longitude out of range")
    } else {
        None
    };

    match failure {
        Some(message) => Err(ClimCompError::OutOfRange {
            message: message.to_string(),
            file: file.to_path_buf(),
        }),
        None => Ok(()),
    }
}

fn extent(values: &[f64]) -> (f64, f64) {
    if values.iter().any(|v| v.is_nan()) {
        return (f64::NAN, f64::NAN);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Turn one dataset file into zero or one observation.
///
/// Returns `Ok(None)` when the file's month lies outside the season; in that case
/// only the time coordinate is read. The file handle is released on every path.
///
/// # Errors
///
/// Fails on any of: unreadable file or time coordinate, missing coordinates,
/// bounding box outside the grid, empty selection, missing variable, or a box with
/// no valid cells.
pub fn extract_observation(path: &Path, config: &ClimatologyConfig) -> Result<Option<Observation>> {
    let source = config.source;
    let file = GriddedFile::open(path)?;

    let (instant, steps) = file.first_timestamp(source.time_coordinate())?;
    let (year, month) = year_month(&instant);

    if !config.season.contains(month) {
        debug!("Skipping {} ({year}-{month:02} outside season)", path.display());
        return Ok(None);
    }
    if steps > 1 {
        warn!(
            "{} holds {steps} time steps; averaging all of them under {year}-{month:02}",
            path.display()
        );
    }

    let lon = file.coordinate(source.lon_coordinate())?;
    let lat = file.coordinate(source.lat_coordinate())?;
    check_overlap(&config.bbox, &lon, &lat, path)?;

    let lon_range = bounding_indices(&lon, config.bbox.min_lon, config.bbox.max_lon).ok_or_else(
        || ClimCompError::EmptySelection {
            axis: "longitude".to_string(),
            file: path.to_path_buf(),
        },
    )?;
    let lat_range = bounding_indices(&lat, config.bbox.min_lat, config.bbox.max_lat).ok_or_else(
        || ClimCompError::EmptySelection {
            axis: "latitude".to_string(),
            file: path.to_path_buf(),
        },
    )?;

    if !file.has_variable(&config.variable) {
        return Err(ClimCompError::VariableNotFound {
            var: config.variable.clone(),
            file: path.to_path_buf(),
        });
    }

    debug!(
        "{}: {year}-{month:02}, lat[{}..{}], lon[{}..{}]",
        file.path().display(),
        lat_range.start,
        lat_range.end,
        lon_range.start,
        lon_range.end
    );

    let block = file.variable_box(&config.variable, lat_range, lon_range)?;
    let value = finite_mean(&block).ok_or_else(|| ClimCompError::NoValidData {
        var: config.variable.clone(),
        file: path.to_path_buf(),
    })?;

    Ok(Some(Observation { year, month, value }))
}
