//! CF time coordinate decoding
//!
//! Time coordinates store offsets relative to a reference instant described by the
//! `units` attribute, e.g. `days since 1982-01-01 00:00:00`. Only the standard
//! (proleptic) Gregorian calendar is supported.

use crate::errors::{ClimCompError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// Length of one step of a CF time offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeStep {
    const fn seconds(self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }
}

impl FromStr for TimeStep {
    type Err = ClimCompError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "days" | "day" | "d" => Ok(Self::Days),
            "hours" | "hour" | "hr" | "hrs" | "h" => Ok(Self::Hours),
            "minutes" | "minute" | "min" | "mins" => Ok(Self::Minutes),
            "seconds" | "second" | "sec" | "secs" | "s" => Ok(Self::Seconds),
            other => Err(ClimCompError::TimeDecode {
                message: format!("unsupported time unit '{other}'"),
            }),
        }
    }
}

/// Parsed `<step> since <reference>` units attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfTimeUnits {
    pub step: TimeStep,
    pub reference: NaiveDateTime,
}

impl CfTimeUnits {
    /// Convert a raw coordinate value into a calendar instant.
    ///
    /// # Errors
    ///
    /// Returns [`ClimCompError::TimeDecode`] for non-finite values or results outside
    /// the representable date range.
    pub fn decode(&self, value: f64) -> Result<NaiveDateTime> {
        let millis = value * self.step.seconds() * 1000.0;
        if !millis.is_finite() {
            return Err(ClimCompError::TimeDecode {
                message: format!("time value {value} is not finite"),
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let millis = millis.round() as i64;

        Duration::try_milliseconds(millis)
            .and_then(|offset| self.reference.checked_add_signed(offset))
            .ok_or_else(|| ClimCompError::TimeDecode {
                message: format!("time value {value} overflows the calendar"),
            })
    }
}

impl FromStr for CfTimeUnits {
    type Err = ClimCompError;

    fn from_str(s: &str) -> Result<Self> {
        let (step, reference) = s
            .split_once(" since ")
            .ok_or_else(|| ClimCompError::TimeDecode {
                message: format!("units '{s}' are not of the form '<unit> since <date>'"),
            })?;

        Ok(Self {
            step: step.trim().parse()?,
            reference: parse_reference(reference)?,
        })
    }
}

fn parse_reference(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_suffix("UTC")
        .or_else(|| trimmed.strip_suffix('Z'))
        .unwrap_or(trimmed)
        .trim()
        .replacen('T', " ", 1);

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ClimCompError::TimeDecode {
            message: format!("cannot parse reference date '{}'", raw.trim()),
        })
}

/// Reject calendars other than the standard Gregorian ones.
///
/// # Errors
///
/// Returns [`ClimCompError::TimeDecode`] naming the unsupported calendar.
pub fn check_calendar(calendar: Option<&str>) -> Result<()> {
    match calendar.map(str::to_ascii_lowercase).as_deref() {
        None | Some("standard" | "gregorian" | "proleptic_gregorian") => Ok(()),
        Some(other) => Err(ClimCompError::TimeDecode {
            message: format!("calendar '{other}' is not supported"),
        }),
    }
}

/// Calendar year and month (1-12) of an instant
#[must_use]
pub fn year_month(instant: &NaiveDateTime) -> (i32, u32) {
    (instant.year(), instant.month())
}
