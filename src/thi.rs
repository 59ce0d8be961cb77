//! Temperature-humidity index (THI) and sensor grid checks
//!
//! Elementwise, stateless helpers that turn co-registered temperature and
//! humidity grids into a THI grid, classify heat stress and summarise sensor
//! data. The THI grid is a typical measurement grid for zonal aggregation.

use crate::errors::{Result, ZonalError};
use crate::grid::{Grid, GridElement};
use crate::statistics::round_half_even;
use ndarray::{ArrayD, Zip};

/// THI above which a cell is under serious heat stress
pub const DEFAULT_STRESS_THRESHOLD: f64 = 78.0;

/// Configuration for stress classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThiConfig {
    pub stress_threshold: f64,
}

impl Default for ThiConfig {
    fn default() -> Self {
        Self {
            stress_threshold: DEFAULT_STRESS_THRESHOLD,
        }
    }
}

/// Min, max, mean and population standard deviation of a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl GridSummary {
    fn nan() -> Self {
        Self {
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std: f64::NAN,
        }
    }
}

/// THI of a single cell, rounded to the nearest integer (ties to even)
pub fn thi_value(temperature: f64, humidity: f64) -> f64 {
    let thi = 0.8 * temperature + (humidity / 100.0) * (temperature - 14.3) + 46.4;
    round_half_even(thi, 0)
}

/// Computes the THI of every cell.
///
/// NaN in either input yields NaN in that cell.
///
/// # Errors
///
/// [`ZonalError::SensorShapeMismatch`] if the grids differ in shape.
pub fn temperature_humidity_index<T: GridElement, H: GridElement>(
    temperature: &Grid<T>,
    humidity: &Grid<H>,
) -> Result<Grid<f64>> {
    if !temperature.same_shape(humidity) {
        return Err(ZonalError::SensorShapeMismatch {
            temperature: temperature.shape().to_vec(),
            humidity: humidity.shape().to_vec(),
        });
    }

    let thi = Zip::from(temperature.view())
        .and(humidity.view())
        .map_collect(|&t, &h| thi_value(t.as_f64(), h.as_f64()));

    Ok(Grid::from_array(thi))
}

/// Marks cells whose THI exceeds the configured threshold. NaN cells are not stressed.
pub fn stress_mask(thi: &Grid<f64>, config: &ThiConfig) -> ArrayD<bool> {
    thi.view().mapv(|v| v > config.stress_threshold)
}

/// True when the grid contains no NaN (an empty grid is valid)
pub fn has_no_nulls<T: GridElement>(grid: &Grid<T>) -> bool {
    !grid.has_nan()
}

/// Computes min, max, mean and standard deviation.
///
/// Any NaN makes all four statistics NaN.
///
/// # Errors
///
/// [`ZonalError::EmptyInput`] if the grid has no cells.
pub fn summary<T: GridElement>(grid: &Grid<T>) -> Result<GridSummary> {
    if grid.is_empty() {
        return Err(ZonalError::EmptyInput {
            operation: "minimum",
        });
    }
    if grid.has_nan() {
        return Ok(GridSummary::nan());
    }

    let values: Vec<f64> = grid.iter().map(|v| v.as_f64()).collect();
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;

    Ok(GridSummary {
        min,
        max,
        mean,
        std: variance.sqrt(),
    })
}
