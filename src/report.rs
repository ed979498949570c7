//! Output artifacts
//!
//! Both files are rewritten from scratch on every run.

use crate::errors::Result;
use crate::statistics::ClimatologyTable;
use csv::Writer;
use std::fs;
use std::path::Path;

/// File name of the per-year table
pub const CLIMATOLOGY_FILE: &str = "climatology.csv";

/// File name of the one-line probability summary
pub const SUMMARY_FILE: &str = "summary.txt";

/// Shortest round-trip rendering of a float, keeping `.0` on integral values.
///
/// Values below `1e-4` or from `1e16` up switch to scientific notation, whose exponent
/// carries a sign and at least two digits (`2.3e-05`, `1e+16`).
#[must_use]
pub fn format_float(value: f64) -> String {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
            }
            Err(_) => repr,
        },
        None => repr,
    }
}

/// Write the table as `,Years,Data` followed by one `<index>,<year>,<value>` row per year.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_climatology_csv(table: &ClimatologyTable, output_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(output_path)?;

    writer.write_record(["", "Years", "Data"])?;
    for (index, row) in table.rows().iter().enumerate() {
        writer.write_record(&[
            index.to_string(),
            row.year.to_string(),
            format_float(row.value),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// The sentence stored in the summary file.
#[must_use]
pub fn summary_sentence(variable: &str, year: i32, probability: f64) -> String {
    format!(
        "The probability of having a year with more {variable} than the {year} year is {}%.",
        format_float(probability * 100.0)
    )
}

/// Write the summary sentence, without a trailing newline.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_summary(sentence: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, sentence)?;
    Ok(())
}
