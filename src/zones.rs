//! Zone catalog: integer-type validation and distinct zone extraction
//!
//! A zone grid holds discrete identifiers. Only integer-typed grids qualify;
//! a float grid is rejected with [`ZonalError::TypeMismatch`] instead of being
//! truncated.

use crate::errors::{Result, ZonalError};
use crate::grid::{ensure_integer, Grid, GridElement, ZoneId};
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Distinct zone identifiers of a zone grid, iterated in ascending order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneSet {
    zones: BTreeSet<ZoneId>,
}

impl ZoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, zone: ZoneId) -> bool {
        self.zones.insert(zone)
    }

    pub fn contains(&self, zone: ZoneId) -> bool {
        self.zones.contains(&zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ZoneId> + '_ {
        self.zones.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ZoneId> {
        self.iter().collect()
    }
}

impl FromIterator<ZoneId> for ZoneSet {
    fn from_iter<I: IntoIterator<Item = ZoneId>>(iter: I) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ZoneSet {
    type Item = ZoneId;
    type IntoIter = btree_set::IntoIter<ZoneId>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.into_iter()
    }
}

/// Printed as a set literal: `{2, 3, 4}`
impl fmt::Display for ZoneSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.iter().map(|z| z.to_string()).collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}

/// Extracts the distinct zone identifiers present in `zone_grid`.
///
/// An empty grid yields an empty set.
///
/// # Errors
///
/// - [`ZonalError::TypeMismatch`] if `T` is not an integer type. The message
///   reads `The elements type must be int, not <dtype>`.
/// - [`ZonalError::TypeMismatch`] if a value does not fit a 64-bit signed
///   zone identifier (only possible for `uint64` grids).
pub fn extract_zone_set<T: GridElement>(zone_grid: &Grid<T>) -> Result<ZoneSet> {
    ensure_integer::<T>()?;

    let mut zones = ZoneSet::new();
    for &value in zone_grid.iter() {
        let zone = value.zone_id().ok_or_else(|| ZonalError::TypeMismatch {
            dtype: T::DTYPE,
            message: format!(
                "Zone value {:?} of type {} does not fit a 64-bit zone identifier",
                value,
                T::DTYPE
            ),
        })?;
        zones.insert(zone);
    }

    tracing::debug!(
        shape = ?zone_grid.shape(),
        zones = zones.len(),
        "extracted zone set"
    );

    Ok(zones)
}
