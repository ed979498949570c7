//! Year-wise aggregation and probability rank
//!
//! Observations are pooled per calendar year regardless of which season months
//! contributed. The resulting [`ClimatologyTable`] is ordered by year.

use super::operations::MaskedMean;
use crate::config::SeasonWindow;
use crate::errors::{ClimCompError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Spatial mean of the variable for one file/time slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

/// Mean of every observation sharing a year
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAverage {
    pub year: i32,
    pub value: f64,
    /// Distinct calendar months that contributed to `value`
    pub months: BTreeSet<u32>,
}

impl YearlyAverage {
    /// Whether every month of `season` contributed to this year
    #[must_use]
    pub fn covers(&self, season: &SeasonWindow) -> bool {
        (season.min_month..=season.max_month).all(|m| self.months.contains(&m))
    }
}

/// One row per distinct year, sorted by year
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimatologyTable {
    rows: Vec<YearlyAverage>,
}

impl ClimatologyTable {
    #[must_use]
    pub fn rows(&self) -> &[YearlyAverage] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `year`, if present
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&YearlyAverage> {
        self.rows
            .binary_search_by_key(&year, |row| row.year)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Years that do not cover every month of `season`
    #[must_use]
    pub fn partial_years(&self, season: &SeasonWindow) -> Vec<i32> {
        self.rows
            .iter()
            .filter(|row| !row.covers(season))
            .map(|row| row.year)
            .collect()
    }

    /// Drop the years that do not cover every month of `season`
    #[must_use]
    pub fn retain_complete(mut self, season: &SeasonWindow) -> Self {
        self.rows.retain(|row| row.covers(season));
        self
    }
}

/// Group observations by year and average each group.
#[must_use]
pub fn aggregate_by_year(observations: &[Observation]) -> ClimatologyTable {
    let mut groups: BTreeMap<i32, (MaskedMean, BTreeSet<u32>)> = BTreeMap::new();

    for obs in observations {
        let (acc, months) = groups.entry(obs.year).or_default();
        acc.push(obs.value);
        months.insert(obs.month);
    }

    let rows = groups
        .into_iter()
        .filter_map(|(year, (acc, months))| {
            acc.mean().map(|value| YearlyAverage {
                year,
                value,
                months,
            })
        })
        .collect();

    ClimatologyTable { rows }
}

/// Fraction of years whose value is strictly lower than the value of `year`.
///
/// # Errors
///
/// Returns [`ClimCompError::EmptyClimatology`] for an empty table and
/// [`ClimCompError::YearNotFound`] when `year` has no row.
#[allow(clippy::cast_precision_loss)]
pub fn probability_below(table: &ClimatologyTable, year: i32) -> Result<f64> {
    if table.is_empty() {
        return Err(ClimCompError::EmptyClimatology);
    }

    let target = table
        .get(year)
        .ok_or(ClimCompError::YearNotFound { year })?
        .value;

    let below = table.rows.iter().filter(|row| row.value < target).count();

    Ok(below as f64 / table.len() as f64)
}
