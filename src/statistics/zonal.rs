//! Zonal mean: partition by zone, aggregate, broadcast
//!
//! Every cell of the output grid holds the mean of the measurement values that
//! share its zone, rounded to a fixed number of decimals. The measurement grid
//! is never modified; a new grid is returned.

use super::accumulator::{accumulate, contiguous, par_accumulate, ZoneTable};
use super::rounding::round_half_even;
use crate::errors::{Result, ZonalError};
use crate::grid::{with_grid, AnyGrid, Grid, GridElement, ZoneId};
use crate::zones::extract_zone_set;
use num_traits::NumCast;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// How the accumulation and broadcast passes are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Single thread, row-major summation order (bit-reproducible)
    #[default]
    Sequential,
    /// Row-sharded on the current rayon pool
    Parallel,
}

impl ProcessingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

/// Configuration for [`ZonalAggregator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Digits kept after the decimal point when rounding zone means
    pub decimals: u32,
    pub mode: ProcessingMode,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            decimals: 1,
            mode: ProcessingMode::Sequential,
        }
    }
}

impl AggregatorConfig {
    #[must_use]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Aggregate of one zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneMean {
    pub zone: ZoneId,
    /// Number of cells in the zone
    pub count: usize,
    pub sum: f64,
    /// Unrounded mean
    pub mean: f64,
}

/// Computes per-zone means of a measurement grid
#[derive(Debug, Clone, Default)]
pub struct ZonalAggregator {
    config: AggregatorConfig,
}

impl ZonalAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Per-zone count, sum and mean, in ascending zone order.
    ///
    /// # Errors
    ///
    /// - [`ZonalError::ShapeMismatch`] if the grids differ in shape
    /// - [`ZonalError::TypeMismatch`] if the zone grid is not integer-typed
    pub fn zone_means<Z: GridElement, V: GridElement>(
        &self,
        zones: &Grid<Z>,
        values: &Grid<V>,
    ) -> Result<Vec<ZoneMean>> {
        let table = self.partition(zones, values)?;
        Ok(summarize(&table))
    }

    /// Replace every cell by the rounded mean of its zone.
    ///
    /// The returned grid has the shape and element type of `values`. For
    /// integer measurement grids the rounded mean is truncated toward zero when
    /// cast back to the element type, saturating at the type's bounds. A NaN
    /// anywhere in a zone makes that zone's cells NaN; other zones are
    /// unaffected.
    ///
    /// # Errors
    ///
    /// - [`ZonalError::ShapeMismatch`] if the grids differ in shape
    /// - [`ZonalError::TypeMismatch`] if the zone grid is not integer-typed
    pub fn aggregate<Z: GridElement, V: GridElement>(
        &self,
        zones: &Grid<Z>,
        values: &Grid<V>,
    ) -> Result<Grid<V>> {
        let table = self.partition(zones, values)?;
        self.broadcast(&table, zones, values.shape())
    }

    /// [`aggregate`](Self::aggregate) and [`zone_means`](Self::zone_means)
    /// from a single validation and accumulation pass.
    ///
    /// # Errors
    ///
    /// See [`aggregate`](Self::aggregate).
    pub fn aggregate_with_means<Z: GridElement, V: GridElement>(
        &self,
        zones: &Grid<Z>,
        values: &Grid<V>,
    ) -> Result<(Grid<V>, Vec<ZoneMean>)> {
        let table = self.partition(zones, values)?;
        let grid = self.broadcast(&table, zones, values.shape())?;
        Ok((grid, summarize(&table)))
    }

    /// [`aggregate`](Self::aggregate) for grids whose element types were chosen at runtime.
    /// The result carries the element type of `values`.
    pub fn aggregate_any(&self, zones: &AnyGrid, values: &AnyGrid) -> Result<AnyGrid> {
        with_grid!(zones, z => with_grid!(values, v => self.aggregate(z, v).map(AnyGrid::from)))
    }

    /// [`aggregate_with_means`](Self::aggregate_with_means) for runtime-typed grids
    pub fn aggregate_with_means_any(
        &self,
        zones: &AnyGrid,
        values: &AnyGrid,
    ) -> Result<(AnyGrid, Vec<ZoneMean>)> {
        with_grid!(zones, z => with_grid!(values, v => {
            self.aggregate_with_means(z, v)
                .map(|(grid, means)| (AnyGrid::from(grid), means))
        }))
    }

    /// [`zone_means`](Self::zone_means) for grids whose element types were chosen at runtime
    pub fn zone_means_any(&self, zones: &AnyGrid, values: &AnyGrid) -> Result<Vec<ZoneMean>> {
        with_grid!(zones, z => with_grid!(values, v => self.zone_means(z, v)))
    }

    /// Write each zone's rounded mean into a new grid of `shape`
    fn broadcast<Z: GridElement, V: GridElement>(
        &self,
        table: &ZoneTable,
        zones: &Grid<Z>,
        shape: &[usize],
    ) -> Result<Grid<V>> {
        let mut means: BTreeMap<ZoneId, V> = BTreeMap::new();
        for (&zone, acc) in table {
            let mean = round_half_even(acc.mean(), self.config.decimals);
            if mean.is_nan() {
                tracing::warn!(zone, "zone contains NaN values, its mean is NaN");
            }
            means.insert(zone, cast_mean(mean));
        }

        let unassigned: V = cast_mean(f64::NAN);
        let lookup = |zone: Z| {
            zone.zone_id()
                .and_then(|id| means.get(&id).copied())
                .unwrap_or(unassigned)
        };

        let cells: Vec<V> = match self.config.mode {
            ProcessingMode::Sequential => zones.iter().map(|&z| lookup(z)).collect(),
            ProcessingMode::Parallel => contiguous(zones)?
                .par_iter()
                .map(|&z| lookup(z))
                .collect(),
        };

        Grid::from_shape_vec(shape, cells)
    }

    /// Validate both grids and accumulate a `(sum, count)` per zone.
    /// No accumulation happens unless every check passes.
    fn partition<Z: GridElement, V: GridElement>(
        &self,
        zones: &Grid<Z>,
        values: &Grid<V>,
    ) -> Result<ZoneTable> {
        check_same_shape(zones, values)?;
        let zone_set = extract_zone_set(zones)?;

        tracing::debug!(
            shape = ?values.shape(),
            zones = zone_set.len(),
            mode = self.config.mode.as_str(),
            "computing zonal mean"
        );

        let table = match self.config.mode {
            ProcessingMode::Sequential => accumulate(zones, values),
            ProcessingMode::Parallel => par_accumulate(zones, values)?,
        };

        debug_assert!(table.keys().copied().eq(zone_set.iter()));
        Ok(table)
    }
}

fn summarize(table: &ZoneTable) -> Vec<ZoneMean> {
    table
        .iter()
        .map(|(&zone, acc)| ZoneMean {
            zone,
            count: acc.count,
            sum: acc.sum,
            mean: acc.mean(),
        })
        .collect()
}

/// Convert a rounded mean to the measurement element type.
///
/// Float types keep NaN. Integer types truncate toward zero and saturate at
/// the type's bounds when the `f64` mean lands just outside them; NaN maps
/// to zero.
fn cast_mean<V: GridElement>(mean: f64) -> V {
    if let Some(value) = <V as NumCast>::from(mean) {
        return value;
    }
    if mean.is_nan() {
        V::zero()
    } else if mean > 0.0 {
        V::max_value()
    } else {
        V::min_value()
    }
}

/// Fails with [`ZonalError::ShapeMismatch`] unless both grids have the same shape
pub fn check_same_shape<A: GridElement, B: GridElement>(left: &Grid<A>, right: &Grid<B>) -> Result<()> {
    if left.same_shape(right) {
        Ok(())
    } else {
        Err(ZonalError::shape_mismatch(left.shape(), right.shape()))
    }
}

/// Zonal mean with the default configuration (one decimal, sequential).
///
/// # Errors
///
/// See [`ZonalAggregator::aggregate`].
pub fn compute_zonal_mean<Z: GridElement, V: GridElement>(
    zones: &Grid<Z>,
    values: &Grid<V>,
) -> Result<Grid<V>> {
    ZonalAggregator::default().aggregate(zones, values)
}

/// Per-zone aggregates with the default configuration.
///
/// # Errors
///
/// See [`ZonalAggregator::zone_means`].
pub fn zonal_summary<Z: GridElement, V: GridElement>(
    zones: &Grid<Z>,
    values: &Grid<V>,
) -> Result<Vec<ZoneMean>> {
    ZonalAggregator::default().zone_means(zones, values)
}

/// Trait for measurement grids that can be reduced per zone
pub trait ZonalReduction {
    /// Zonal mean of `self` partitioned by `zones`
    ///
    /// # Errors
    ///
    /// See [`ZonalAggregator::aggregate`].
    fn zonal_mean<Z: GridElement>(&self, zones: &Grid<Z>, config: AggregatorConfig) -> Result<Self>
    where
        Self: Sized;
}

impl<V: GridElement> ZonalReduction for Grid<V> {
    fn zonal_mean<Z: GridElement>(&self, zones: &Grid<Z>, config: AggregatorConfig) -> Result<Self> {
        ZonalAggregator::new(config).aggregate(zones, self)
    }
}
