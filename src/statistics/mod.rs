//! Zonal statistics
//!
//! This module computes the mean of a measurement grid per zone of an integer
//! zone grid and broadcasts it back onto the grid.
//!
//! # Organization
//!
//! - [`zonal`]: the aggregator, its configuration and convenience functions
//! - [`accumulator`]: per-zone running sums, sequential and row-sharded parallel
//! - [`rounding`]: decimal rounding with half-to-even ties

pub mod accumulator;
pub mod rounding;
pub mod zonal;

pub use accumulator::{ZoneAccumulator, ZoneTable};
pub use rounding::round_half_even;
pub use zonal::{
    check_same_shape, compute_zonal_mean, zonal_summary, AggregatorConfig, ProcessingMode,
    ZonalAggregator, ZonalReduction, ZoneMean,
};
