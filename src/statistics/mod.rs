//! Statistical reductions used by the climatology pipeline
//!
//! # Organization
//!
//! - [`operations`]: masked spatial mean of an extracted grid block
//! - [`climatology`]: per-year aggregation and the target-year probability rank

pub mod climatology;
pub mod operations;

pub use climatology::{
    aggregate_by_year, probability_below, ClimatologyTable, Observation, YearlyAverage,
};
pub use operations::{finite_mean, MaskedMean};
