//! Per-zone running sums
//!
//! The aggregator makes a single pass over the cells, accumulating a
//! `(sum, count)` pair per zone in an ordered map. The parallel variant shards
//! the cells by row ranges, folds one table per shard and merges the tables.
//! Merging is associative and commutative, but the floating-point sum depends on
//! the order of additions, so sequential and parallel results may differ in the
//! last bits.

use crate::errors::{Result, ZonalError};
use crate::grid::{Grid, GridElement, ZoneId};
use crate::parallel::rows_per_shard;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Running sum and count for one zone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneAccumulator {
    pub sum: f64,
    pub count: usize,
}

impl ZoneAccumulator {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &ZoneAccumulator) {
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Arithmetic mean. NaN when any accumulated value was NaN or when empty.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.sum / self.count as f64
        }
    }
}

/// Accumulators keyed by zone, iterated in ascending zone order
pub type ZoneTable = BTreeMap<ZoneId, ZoneAccumulator>;

fn accumulate_cells<'a, Z, V, I>(table: &mut ZoneTable, cells: I)
where
    Z: GridElement,
    V: GridElement,
    I: Iterator<Item = (&'a Z, &'a V)>,
{
    for (&zone, &value) in cells {
        // Zone values were validated by `extract_zone_set` before we get here
        if let Some(zone) = zone.zone_id() {
            table.entry(zone).or_default().push(value.as_f64());
        }
    }
}

/// Merge `other` into `table`
pub fn merge_tables(mut table: ZoneTable, other: ZoneTable) -> ZoneTable {
    for (zone, acc) in other {
        table.entry(zone).or_default().merge(&acc);
    }
    table
}

/// Single-threaded accumulation in row-major order
pub fn accumulate<Z: GridElement, V: GridElement>(zones: &Grid<Z>, values: &Grid<V>) -> ZoneTable {
    let mut table = ZoneTable::new();
    accumulate_cells(&mut table, zones.iter().zip(values.iter()));
    table
}

/// Row-sharded accumulation on the current rayon pool
///
/// # Errors
///
/// Returns an error if either grid is not stored contiguously.
pub fn par_accumulate<Z: GridElement, V: GridElement>(
    zones: &Grid<Z>,
    values: &Grid<V>,
) -> Result<ZoneTable> {
    let zone_cells = contiguous(zones)?;
    let value_cells = contiguous(values)?;

    if zone_cells.is_empty() {
        return Ok(ZoneTable::new());
    }

    let row_len = zones.row_len().max(1);
    let rows = zone_cells.len() / row_len;
    let shard_rows = rows_per_shard(rows);
    let shard_len = shard_rows * row_len;

    tracing::trace!(rows, shard_rows, "sharding accumulation");

    let table = zone_cells
        .par_chunks(shard_len)
        .zip(value_cells.par_chunks(shard_len))
        .fold(ZoneTable::new, |mut table, (z, v)| {
            accumulate_cells(&mut table, z.iter().zip(v.iter()));
            table
        })
        .reduce(ZoneTable::new, merge_tables);

    Ok(table)
}

pub(crate) fn contiguous<T: GridElement>(grid: &Grid<T>) -> Result<&[T]> {
    grid.as_slice().ok_or_else(|| {
        ZonalError::Generic(format!(
            "Grid of shape {:?} is not stored contiguously",
            grid.shape()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_mean() {
        let mut acc = ZoneAccumulator::default();
        assert!(acc.mean().is_nan());
        acc.push(1.0);
        acc.push(3.0);
        assert_eq!(acc.mean(), 2.0);

        acc.push(f64::NAN);
        assert!(acc.mean().is_nan());
    }

    #[test]
    fn test_merge_tables() {
        let mut a = ZoneTable::new();
        a.entry(1).or_default().push(2.0);
        let mut b = ZoneTable::new();
        b.entry(1).or_default().push(4.0);
        b.entry(7).or_default().push(1.0);

        let merged = merge_tables(a, b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&1].count, 2);
        assert_eq!(merged[&1].sum, 6.0);
        assert_eq!(merged[&7].count, 1);
    }

    #[test]
    fn test_parallel_matches_sequential_counts() {
        let zones = Grid::from_shape_vec(&[40, 25], (0..1000).map(|i| (i % 7) as i32).collect())
            .unwrap();
        let values =
            Grid::from_shape_vec(&[40, 25], (0..1000).map(|i| i as f64 * 0.5).collect()).unwrap();

        let seq = accumulate(&zones, &values);
        let par = par_accumulate(&zones, &values).unwrap();

        assert_eq!(seq.len(), 7);
        for (zone, acc) in &seq {
            assert_eq!(par[zone].count, acc.count);
            assert!((par[zone].sum - acc.sum).abs() < 1e-6);
        }
    }
}
