//! Unit tests for the file-independent parts of ClimComp
//!
//! Validation, index selection, aggregation, ranking, time decoding and output
//! formatting are exercised here without touching NetCDF files.

use chrono::NaiveDate;
use clap::Parser;
use clim_comp::{
    cli::Args,
    config::{BoundingBox, ClimatologyConfig, DatasetSource, PartialSeasonPolicy, SeasonWindow},
    errors::ClimCompError,
    extract::{bounding_indices, check_overlap},
    parallel::ParallelConfig,
    report::{format_float, summary_sentence},
    statistics::{aggregate_by_year, finite_mean, probability_below, MaskedMean, Observation},
    time::{check_calendar, year_month, CfTimeUnits, TimeStep},
};
use ndarray::{ArrayD, IxDyn};
use std::path::{Path, PathBuf};

fn obs(year: i32, month: u32, value: f64) -> Observation {
    Observation { year, month, value }
}

fn config_with(lon: (f64, f64), lat: (f64, f64), months: (u32, u32)) -> Result<ClimatologyConfig, ClimCompError> {
    ClimatologyConfig::new(
        "/definitely/not/a/real/directory",
        "FLDAS",
        "Rainf_f_tavg",
        lon,
        lat,
        months,
        2000,
    )
}

fn bounds_message(result: Result<ClimatologyConfig, ClimCompError>) -> String {
    match result {
        Err(ClimCompError::InvalidBounds { message }) => message,
        other => panic!("Expected InvalidBounds, got {other:?}"),
    }
}

#[test]
fn test_error_display() {
    let var_err = ClimCompError::VariableNotFound {
        var: "Rainf_f_tavg".to_string(),
        file: PathBuf::from("a/b.nc"),
    };
    assert_eq!(
        format!("{var_err}"),
        "Variable 'Rainf_f_tavg' not in dataset 'a/b.nc'"
    );

    let year_err = ClimCompError::YearNotFound { year: 1999 };
    assert_eq!(format!("{year_err}"), "Year 1999 not found in the climatology");

    let source_err = ClimCompError::UnknownDatasetSource {
        source: "MERRA".to_string(),
    };
    assert!(format!("{source_err}").contains("not available"));

    let range_err = ClimCompError::OutOfRange {
        message: "Minimum latitude out of range".to_string(),
        file: PathBuf::from("x.nc"),
    };
    assert!(format!("{range_err}").starts_with("Minimum latitude out of range"));
}

#[test]
fn test_valid_config() {
    let config = config_with((33.0, 48.0), (3.0, 15.0), (3, 5)).expect("valid parameters");
    assert_eq!(config.source, DatasetSource::Fldas);
    assert_eq!(config.bbox.min_lon, 33.0);
    assert_eq!(config.season.month_count(), 3);
    assert_eq!(config.output_dir, PathBuf::from("."));
}

#[test]
fn test_bounds_validated_before_any_io() {
    // The data directory does not exist; validation must fail on bounds, not I/O
    assert_eq!(
        bounds_message(config_with((10.0, 10.0), (3.0, 15.0), (3, 5))),
        "Maximum longitude smaller than minimum longitude"
    );
    assert_eq!(
        bounds_message(config_with((10.0, 20.0), (15.0, 3.0), (3, 5))),
        "Maximum latitude smaller than minimum latitude"
    );
    assert_eq!(
        bounds_message(config_with((10.0, 20.0), (3.0, 15.0), (5, 5))),
        "Maximum month smaller than minimum month"
    );
}

#[test]
fn test_bounds_checked_in_order() {
    // Longitude is reported first even when every bound is wrong
    assert_eq!(
        bounds_message(config_with((20.0, 10.0), (15.0, 3.0), (9, 2))),
        "Maximum longitude smaller than minimum longitude"
    );
}

#[test]
fn test_month_range() {
    let message = bounds_message(config_with((10.0, 20.0), (3.0, 15.0), (0, 5)));
    assert!(message.contains("outside 1..=12"));

    let message = bounds_message(config_with((10.0, 20.0), (3.0, 15.0), (6, 13)));
    assert!(message.starts_with("Maximum month 13"));
}

#[test]
fn test_nan_bounds_rejected() {
    assert!(BoundingBox::new(f64::NAN, 10.0, 0.0, 1.0).is_err());
    assert!(BoundingBox::new(0.0, 10.0, 0.0, f64::NAN).is_err());
}

#[test]
fn test_unknown_dataset_source() {
    let result = ClimatologyConfig::new(
        "/data",
        "CHIRPS",
        "precip",
        (0.0, 1.0),
        (0.0, 1.0),
        (1, 2),
        2000,
    );
    match result {
        Err(ClimCompError::UnknownDatasetSource { source }) => assert_eq!(source, "CHIRPS"),
        other => panic!("Expected UnknownDatasetSource, got {other:?}"),
    }
}

#[test]
fn test_fldas_convention() {
    let source: DatasetSource = "FLDAS".parse().expect("FLDAS is known");
    assert_eq!(source.file_extension(), "nc");
    assert_eq!(source.time_coordinate(), "time");
    assert_eq!(source.lon_coordinate(), "X");
    assert_eq!(source.lat_coordinate(), "Y");
    assert_eq!(source.to_string(), "FLDAS");
    assert!("fldas".parse::<DatasetSource>().is_err());
}

#[test]
fn test_season_membership() {
    let season = SeasonWindow::new(3, 5).expect("valid season");
    assert!(!season.contains(2));
    assert!(season.contains(3));
    assert!(season.contains(4));
    assert!(season.contains(5));
    assert!(!season.contains(6));
}

#[test]
fn test_bounding_indices_edge_policy() {
    let lon = [1.0, 2.0, 3.0, 4.0, 5.0];

    // First index > 1.5 is 1; last index < 4.5 is 3 and is itself excluded
    let range = bounding_indices(&lon, 1.5, 4.5).expect("non-empty selection");
    assert_eq!(range, 1..3);
    assert_eq!(range.map(|i| lon[i]).collect::<Vec<_>>(), vec![2.0, 3.0]);
}

#[test]
fn test_bounding_indices_on_grid_points() {
    let lon = [1.0, 2.0, 3.0, 4.0, 5.0];

    // Bounds equal to grid points are excluded on both sides by the strict comparisons
    assert_eq!(bounding_indices(&lon, 1.0, 5.0), Some(1..3));
    // Whole grid inside the box still loses its last cell
    assert_eq!(bounding_indices(&lon, 0.0, 6.0), Some(0..4));
}

#[test]
fn test_bounding_indices_empty() {
    let lon = [1.0, 2.0, 3.0, 4.0, 5.0];

    // A single qualifying cell collapses to an empty range
    assert_eq!(bounding_indices(&lon, 2.5, 3.5), None);
    assert_eq!(bounding_indices(&lon, 5.0, 9.0), None);
    assert_eq!(bounding_indices(&[], 0.0, 1.0), None);
}

#[test]
fn test_check_overlap() {
    let lon = [30.0, 31.0, 32.0, 33.0];
    let lat = [0.0, 1.0, 2.0];
    let file = Path::new("grid.nc");

    let inside = BoundingBox::new(30.5, 32.5, 0.5, 1.5).expect("valid box");
    assert!(check_overlap(&inside, &lon, &lat, file).is_ok());

    let cases = [
        (BoundingBox::new(30.5, 32.5, 2.0, 5.0), "Minimum latitude out of range"),
        (BoundingBox::new(30.5, 32.5, -5.0, 0.0), "Maximum latitude out of range"),
        (BoundingBox::new(33.0, 40.0, 0.5, 1.5), "Minimum longitude out of range"),
        (BoundingBox::new(20.0, 30.0, 0.5, 1.5), "Maximum longitude out of range"),
    ];

    for (bbox, expected) in cases {
        let bbox = bbox.expect("valid box");
        match check_overlap(&bbox, &lon, &lat, file) {
            Err(ClimCompError::OutOfRange { message, file }) => {
                assert_eq!(message, expected);
                assert_eq!(file, PathBuf::from("grid.nc"));
            }
            other => panic!("Expected OutOfRange for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_check_overlap_nan_coordinates() {
    let file = Path::new("grid.nc");
    let bbox = BoundingBox::new(30.5, 32.5, 0.5, 1.5).expect("valid box");
    let lon = [30.0, 31.0, 32.0, 33.0];
    let lat = [0.0, 1.0, 2.0];

    let nan_lat = [0.0, f64::NAN, 2.0];
    match check_overlap(&bbox, &lon, &nan_lat, file) {
        Err(ClimCompError::OutOfRange { message, .. }) => {
            assert_eq!(message, "Minimum latitude out of range");
        }
        other => panic!("Expected OutOfRange for NaN latitude, got {other:?}"),
    }

    let nan_lon = [30.0, 31.0, f64::NAN, 33.0];
    match check_overlap(&bbox, &nan_lon, &lat, file) {
        Err(ClimCompError::OutOfRange { message, .. }) => {
            assert_eq!(message, "Minimum longitude out of range");
        }
        other => panic!("Expected OutOfRange for NaN longitude, got {other:?}"),
    }

    // Infinite coordinates still order correctly
    let open_lon = [f64::NEG_INFINITY, 31.0, 32.0, f64::INFINITY];
    assert!(check_overlap(&bbox, &open_lon, &lat, file).is_ok());

    assert!(matches!(
        check_overlap(&bbox, &[], &lat, file),
        Err(ClimCompError::OutOfRange { .. })
    ));
}

#[test]
fn test_aggregation_pools_months() {
    let table = aggregate_by_year(&[obs(2010, 6, 10.0), obs(2010, 7, 20.0), obs(2011, 6, 5.0)]);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(2010).map(|r| r.value), Some(15.0));
    assert_eq!(table.get(2011).map(|r| r.value), Some(5.0));
    assert!(table.get(2012).is_none());
}

#[test]
fn test_aggregation_sorted_by_year() {
    let table = aggregate_by_year(&[obs(2003, 6, 1.0), obs(2001, 6, 2.0), obs(2002, 6, 3.0)]);
    let years: Vec<i32> = table.rows().iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2001, 2002, 2003]);
}

#[test]
fn test_partial_seasons() {
    let season = SeasonWindow::new(6, 7).expect("valid season");
    let table = aggregate_by_year(&[obs(2010, 6, 10.0), obs(2010, 7, 20.0), obs(2011, 6, 5.0)]);

    assert_eq!(table.partial_years(&season), vec![2011]);

    let complete = table.retain_complete(&season);
    assert_eq!(complete.len(), 1);
    assert_eq!(complete.rows()[0].year, 2010);
}

#[test]
fn test_probability_rank() {
    let table = aggregate_by_year(&[obs(2000, 6, 1.0), obs(2001, 6, 2.0), obs(2002, 6, 3.0)]);

    let p = probability_below(&table, 2002).expect("2002 is present");
    assert!((p - 2.0 / 3.0).abs() < 1e-12);

    assert_eq!(probability_below(&table, 2000).expect("2000 is present"), 0.0);
}

#[test]
fn test_probability_ties_not_counted() {
    let table = aggregate_by_year(&[obs(2000, 6, 2.0), obs(2001, 6, 2.0), obs(2002, 6, 1.0)]);
    let p = probability_below(&table, 2000).expect("2000 is present");
    assert!((p - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_probability_errors() {
    let table = aggregate_by_year(&[obs(2000, 6, 1.0)]);
    assert!(matches!(
        probability_below(&table, 1999),
        Err(ClimCompError::YearNotFound { year: 1999 })
    ));

    let empty = aggregate_by_year(&[]);
    assert!(matches!(
        probability_below(&empty, 2000),
        Err(ClimCompError::EmptyClimatology)
    ));
}

#[test]
fn test_masked_mean() {
    let acc: MaskedMean = [1.0, f64::NAN, 3.0, f64::INFINITY].into_iter().collect();
    assert_eq!(acc.count(), 2);
    assert_eq!(acc.mean(), Some(2.0));

    assert_eq!(MaskedMean::default().mean(), None);

    let block = ArrayD::from_shape_vec(IxDyn(&[1, 2, 2]), vec![1.0, 2.0, f64::NAN, 6.0])
        .expect("shape matches");
    assert_eq!(finite_mean(&block), Some(3.0));

    let masked = ArrayD::from_elem(IxDyn(&[1, 2, 2]), f64::NAN);
    assert_eq!(finite_mean(&masked), None);
}

#[test]
fn test_cf_time_units() {
    let units: CfTimeUnits = "days since 1982-01-01 00:00:00".parse().expect("valid units");
    assert_eq!(units.step, TimeStep::Days);

    let instant = units.decode(31.0).expect("decodable");
    assert_eq!(year_month(&instant), (1982, 2));

    let hours: CfTimeUnits = "hours since 2000-01-01T00:00:00Z".parse().expect("valid units");
    let instant = hours.decode(24.0 * 60.0).expect("decodable");
    assert_eq!(
        instant,
        NaiveDate::from_ymd_opt(2000, 3, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date")
    );

    let date_only: CfTimeUnits = "seconds since 1970-01-01".parse().expect("valid units");
    assert_eq!(year_month(&date_only.decode(0.0).expect("decodable")), (1970, 1));
}

#[test]
fn test_cf_time_units_errors() {
    assert!("days after 1982-01-01".parse::<CfTimeUnits>().is_err());
    assert!("fortnights since 1982-01-01".parse::<CfTimeUnits>().is_err());
    assert!("days since yesterday".parse::<CfTimeUnits>().is_err());

    let units: CfTimeUnits = "days since 1982-01-01".parse().expect("valid units");
    assert!(units.decode(f64::NAN).is_err());
}

#[test]
fn test_calendars() {
    assert!(check_calendar(None).is_ok());
    assert!(check_calendar(Some("standard")).is_ok());
    assert!(check_calendar(Some("Gregorian")).is_ok());
    assert!(check_calendar(Some("proleptic_gregorian")).is_ok());
    assert!(check_calendar(Some("noleap")).is_err());
    assert!(check_calendar(Some("360_day")).is_err());
}

#[test]
fn test_float_formatting() {
    assert_eq!(format_float(15.0), "15.0");
    assert_eq!(format_float(0.0), "0.0");
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_float(-0.75), "-0.75");
    assert_eq!(format_float(0.0001), "0.0001");
    assert_eq!(format_float(1e15), "1000000000000000.0");
}

#[test]
fn test_float_formatting_exponents() {
    assert_eq!(format_float(2.3e-5), "2.3e-05");
    assert_eq!(format_float(1e-5), "1e-05");
    assert_eq!(format_float(-4.2e-7), "-4.2e-07");
    assert_eq!(format_float(1e16), "1e+16");
    assert_eq!(format_float(1.5e300), "1.5e+300");
    assert_eq!(format_float(5e-324), "5e-324");
}

#[test]
fn test_summary_sentence() {
    assert_eq!(
        summary_sentence("Rainf_f_tavg", 2000, 0.0),
        "The probability of having a year with more Rainf_f_tavg than the 2000 year is 0.0%."
    );
    assert_eq!(
        summary_sentence("Evap_tavg", 2011, 0.25),
        "The probability of having a year with more Evap_tavg than the 2011 year is 25.0%."
    );
}

#[test]
fn test_parallel_config() {
    assert!(ParallelConfig::default().num_threads.is_none());
    assert_eq!(ParallelConfig::with_threads(4).num_threads, Some(4));

    // Zero threads is rejected before the global pool is touched
    assert!(matches!(
        ParallelConfig::with_threads(0).setup_global_pool(),
        Err(ClimCompError::ThreadPoolError(_))
    ));
}

fn parse_args(rest: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("climcomp").chain(rest.iter().copied()))
}

#[test]
fn test_cli_positional_order() {
    let args = parse_args(&[
        "/data/FLDAS", "FLDAS", "Rainf_f_tavg", "33.0", "48.0", "3.0", "15.0", "3", "5", "2011",
    ])
    .expect("valid arguments");

    assert_eq!(args.path, PathBuf::from("/data/FLDAS"));
    assert_eq!(args.dataset_source, "FLDAS");
    assert_eq!(args.variable, "Rainf_f_tavg");
    assert_eq!(args.min_lon, 33.0);
    assert_eq!(args.max_lon, 48.0);
    assert_eq!(args.min_lat, 3.0);
    assert_eq!(args.max_lat, 15.0);
    assert_eq!(args.min_month, 3);
    assert_eq!(args.max_month, 5);
    assert_eq!(args.year, 2011);

    let config = args.to_config().expect("valid config");
    assert_eq!(config.source, DatasetSource::Fldas);
    assert_eq!(config.bbox.min_lon, 33.0);
    assert_eq!(config.bbox.max_lat, 15.0);
    assert_eq!(config.target_year, 2011);
    assert_eq!(config.output_dir, PathBuf::from("."));
    assert_eq!(config.partial_seasons, PartialSeasonPolicy::Include);
}

#[test]
fn test_cli_negative_bounds() {
    let args = parse_args(&[
        "/data", "FLDAS", "Rainf_f_tavg", "-80.0", "-60.0", "-10.0", "5.0", "6", "8", "1998",
    ])
    .expect("negative coordinates parse as values");

    assert_eq!(args.min_lon, -80.0);
    assert_eq!(args.max_lon, -60.0);
    assert_eq!(args.min_lat, -10.0);
    assert_eq!(args.max_lat, 5.0);

    let config = args.to_config().expect("valid config");
    assert_eq!(config.bbox.min_lon, -80.0);
    assert_eq!(config.bbox.min_lat, -10.0);
}

#[test]
fn test_cli_rejects_malformed_values() {
    let month_name = parse_args(&[
        "/data", "FLDAS", "Rainf_f_tavg", "33.0", "48.0", "3.0", "15.0", "March", "5", "2011",
    ]);
    assert!(month_name.is_err());

    let text_lon = parse_args(&[
        "/data", "FLDAS", "Rainf_f_tavg", "east", "48.0", "3.0", "15.0", "3", "5", "2011",
    ]);
    assert!(text_lon.is_err());

    let missing_year = parse_args(&["/data", "FLDAS", "Rainf_f_tavg", "33.0", "48.0", "3.0", "15.0", "3", "5"]);
    assert!(missing_year.is_err());
}

#[test]
fn test_cli_options_reach_config() {
    let args = parse_args(&[
        "--partial-seasons",
        "exclude",
        "--output-dir",
        "out",
        "-t",
        "2",
        "/data",
        "FLDAS",
        "Rainf_f_tavg",
        "33.0",
        "48.0",
        "3.0",
        "15.0",
        "3",
        "5",
        "2011",
    ])
    .expect("valid arguments");

    assert_eq!(args.threads, Some(2));
    let config = args.to_config().expect("valid config");
    assert_eq!(config.partial_seasons, PartialSeasonPolicy::Exclude);
    assert_eq!(config.output_dir, PathBuf::from("out"));
}

#[test]
fn test_cli_validation_happens_in_config() {
    // Parsing accepts reversed bounds; building the config rejects them
    let args = parse_args(&[
        "/data", "FLDAS", "Rainf_f_tavg", "48.0", "33.0", "3.0", "15.0", "3", "5", "2011",
    ])
    .expect("clap does not order bounds");

    assert!(matches!(args.to_config(), Err(ClimCompError::InvalidBounds { .. })));
}
