//! zonal-grid: zonal statistics over 2-D raster grids
//!
//! Given a grid of integer zone identifiers and a co-registered grid of
//! measurements, zonal-grid partitions the cells by zone, computes the mean
//! measurement per zone and returns a grid of the same shape in which every cell
//! holds its zone's mean rounded to one decimal place.
//!
//! ## Key Features
//!
//! - **Typed grids**: element types are fixed at compile time; only integer grids
//!   can act as zone grids
//! - **Single-pass aggregation**: one accumulation pass and one broadcast pass
//! - **Parallel Processing**: row-sharded accumulation using Rayon
//! - **Text and NetCDF I/O**: whitespace-delimited grid loading, NetCDF output
//! - **Temperature-humidity index**: a ready-made measurement grid producer
//!
//! ## Module Organization
//!
//! - [`grid`]: grid container and element types
//! - [`zones`]: zone grid validation and distinct zone extraction
//! - [`statistics`]: zonal mean aggregation
//! - [`loader`]: text and NetCDF grid loading
//! - [`netcdf_io`]: NetCDF output
//! - [`thi`]: temperature-humidity index and sensor summaries
//! - [`parallel`]: parallel processing configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use zonal_grid::prelude::*;
//!
//! let zones = Grid::from_rows(vec![vec![0, 0], vec![1, 1]]).unwrap();
//! let values = Grid::from_rows(vec![vec![1.0, 3.0], vec![4.0, 5.0]]).unwrap();
//!
//! let means = compute_zonal_mean(&zones, &values).unwrap();
//! assert_eq!(means.to_rows(), vec![vec![2.0, 2.0], vec![4.5, 4.5]]);
//! ```

pub mod errors;
pub mod grid;
pub mod loader;
pub mod netcdf_io;
pub mod parallel;
pub mod statistics;
pub mod thi;
pub mod zones;

pub use errors::{Result, ZonalError};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Result, ZonalError};
    pub use crate::grid::{AnyGrid, ElementKind, ElementType, Grid, GridElement, ZoneId};
    pub use crate::loader::{load_grid, load_typed, parse_grid};
    pub use crate::netcdf_io::{write_grid_to_netcdf, NetCDFWriter};
    pub use crate::parallel::ParallelConfig;
    pub use crate::statistics::{
        compute_zonal_mean, zonal_summary, AggregatorConfig, ProcessingMode, ZonalAggregator,
        ZonalReduction, ZoneMean,
    };
    pub use crate::thi::ThiConfig;
    pub use crate::zones::{extract_zone_set, ZoneSet};
}
