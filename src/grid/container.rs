//! The `Grid` container

use crate::errors::{Result, ZonalError};
use crate::grid::GridElement;
use ndarray::{Array, ArrayD, ArrayViewD, Dimension, IxDyn};

/// A rectangular, shape-fixed grid of numeric cells.
///
/// `Grid<T>` wraps an `ndarray::ArrayD<T>` kept in standard (row-major)
/// layout. The shape never changes after construction; operations that
/// transform a grid return a new one.
///
/// # Example
///
/// ```
/// use zonal_grid::grid::Grid;
///
/// let zones = Grid::from_rows(vec![vec![2, 3], vec![4, 2]]).unwrap();
/// assert_eq!(zones.shape(), &[2, 2]);
/// assert_eq!(zones.get(&[1, 0]), Some(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: GridElement> {
    data: ArrayD<T>,
}

impl<T: GridElement> Grid<T> {
    /// Create a grid from a shape and row-major values
    pub fn from_shape_vec(shape: &[usize], values: Vec<T>) -> Result<Self> {
        let data = ArrayD::from_shape_vec(IxDyn(shape), values)?;
        Ok(Self { data })
    }

    /// Create a 2-D grid from rows of equal length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(ZonalError::RaggedRow {
                line: index + 1,
                expected: n_cols,
                found: row.len(),
            });
        }

        let values: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_shape_vec(&[n_rows, n_cols], values)
    }

    /// Wrap an existing ndarray of any dimensionality
    pub fn from_array<D: Dimension>(array: Array<T, D>) -> Self {
        let data = if array.is_standard_layout() {
            array.into_dyn()
        } else {
            array.as_standard_layout().into_owned().into_dyn()
        };
        Self { data }
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(shape: &[usize], value: T) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }

    // Dimensions

    /// Shape as a slice of axis lengths
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length of the last axis (cells per row), 1 for zero-dimensional grids
    pub fn row_len(&self) -> usize {
        self.shape().last().copied().unwrap_or(1)
    }

    /// Whether both grids have identical shapes
    pub fn same_shape<U: GridElement>(&self, other: &Grid<U>) -> bool {
        self.shape() == other.shape()
    }

    /// dtype name of the element type
    pub fn dtype(&self) -> &'static str {
        T::DTYPE
    }

    // Data access

    /// Value at a multi-dimensional index
    pub fn get(&self, index: &[usize]) -> Option<T> {
        self.data.get(index).copied()
    }

    /// Cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Contiguous row-major cell storage
    pub fn as_slice(&self) -> Option<&[T]> {
        self.data.as_slice()
    }

    pub fn view(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    /// Cells as nested rows, for 1-D grids a single row
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        let row_len = self.row_len();
        if row_len == 0 {
            return vec![Vec::new(); self.shape().first().copied().unwrap_or(0)];
        }
        let values: Vec<T> = self.iter().copied().collect();
        values.chunks(row_len).map(<[T]>::to_vec).collect()
    }

    /// Apply `f` to every cell, producing a grid of the same shape
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        U: GridElement,
        F: Fn(T) -> U,
    {
        Grid {
            data: self.data.mapv(f),
        }
    }

    /// Widen every cell to `f64`
    pub fn to_f64(&self) -> Grid<f64> {
        self.map(<T as GridElement>::as_f64)
    }

    /// Whether any cell is NaN
    pub fn has_nan(&self) -> bool {
        self.iter().any(|v| v.is_nan_value())
    }
}

impl<T: GridElement> From<ArrayD<T>> for Grid<T> {
    fn from(array: ArrayD<T>) -> Self {
        Self::from_array(array)
    }
}
