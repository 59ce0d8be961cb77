//! NetCDF output for aggregated grids
//!
//! Writes a 1-D or 2-D `f64` grid as a single NetCDF variable with `x` (and
//! `y`) dimensions, a `long_name` attribute and a timestamped `history`
//! global attribute.

use crate::errors::{Result, ZonalError};
use crate::grid::Grid;
use chrono::Utc;
use std::{fs, path::Path};

/// Dimension names by grid rank
fn dimension_names(ndim: usize) -> Result<&'static [&'static str]> {
    match ndim {
        1 => Ok(&["x"]),
        2 => Ok(&["y", "x"]),
        n => Err(ZonalError::Generic(format!(
            "Only 1-D and 2-D grids can be written to NetCDF, got {n} dimensions"
        ))),
    }
}

/// Writes grids to a NetCDF file
pub struct NetCDFWriter<'a> {
    output_path: &'a Path,
}

impl<'a> NetCDFWriter<'a> {
    pub fn new(output_path: &'a Path) -> Self {
        Self { output_path }
    }

    /// Write `grid` as variable `var_name`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Fails for empty grids, grids with more than two dimensions, and on any
    /// NetCDF or filesystem error.
    pub fn write_grid(&self, grid: &Grid<f64>, var_name: &str, long_name: &str) -> Result<()> {
        let dim_names = dimension_names(grid.ndim())?;
        // A zero-length NetCDF dimension is an unlimited dimension
        if grid.is_empty() {
            return Err(ZonalError::Generic(
                "Cannot write an empty grid to NetCDF".to_string(),
            ));
        }

        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }

        let mut file = netcdf::create(self.output_path)?;

        for (dim_name, &dim_len) in dim_names.iter().zip(grid.shape()) {
            file.add_dimension(dim_name, dim_len)?;
        }

        let mut var = file.add_variable::<f64>(var_name, dim_names)?;
        var.put_attribute("_FillValue", f64::NAN)?;
        var.put_attribute("long_name", long_name)?;
        var.put(grid.view(), ..)?;

        let history = format!("Created by zonal-grid on {}", Utc::now().to_rfc3339());
        file.add_attribute("history", history.as_str())?;

        tracing::info!(
            path = %self.output_path.display(),
            variable = var_name,
            shape = ?grid.shape(),
            "wrote NetCDF grid"
        );

        Ok(())
    }
}

/// Writes `grid` to `output_path` as variable `var_name`.
///
/// # Errors
///
/// See [`NetCDFWriter::write_grid`].
pub fn write_grid_to_netcdf(
    grid: &Grid<f64>,
    var_name: &str,
    long_name: &str,
    output_path: &Path,
) -> Result<()> {
    NetCDFWriter::new(output_path).write_grid(grid, var_name, long_name)
}
