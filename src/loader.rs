//! Loading grids from delimited text files
//!
//! The text layout is one grid row per line with whitespace-separated values.
//! Blank lines and anything after a `#` are ignored. A source with a single data
//! row, or with a single value per row, produces a 1-D grid; everything else
//! produces a 2-D grid. An empty source produces an empty 1-D grid.

use crate::errors::{Result, ZonalError};
use crate::grid::{AnyGrid, ElementType, Grid, GridElement};
use std::fs;
use std::path::Path;

const COMMENT_MARKER: char = '#';

/// Parses grid text into a grid of `T`.
///
/// # Errors
///
/// - [`ZonalError::ParseError`] if a token is not a valid `T`
/// - [`ZonalError::RaggedRow`] if rows have different numbers of values
pub fn parse_grid<T: GridElement>(text: &str) -> Result<Grid<T>> {
    let mut rows: Vec<Vec<T>> = Vec::new();
    let mut expected_cols: Option<usize> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line
            .split(COMMENT_MARKER)
            .next()
            .unwrap_or_default()
            .trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<T>().map_err(|_| ZonalError::ParseError {
                    line: line_no,
                    token: token.to_string(),
                    dtype: T::DTYPE,
                })
            })
            .collect::<Result<Vec<T>>>()?;

        match expected_cols {
            Some(expected) if expected != row.len() => {
                return Err(ZonalError::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
            None => expected_cols = Some(row.len()),
        }
        rows.push(row);
    }

    let n_rows = rows.len();
    let n_cols = expected_cols.unwrap_or(0);
    let values: Vec<T> = rows.into_iter().flatten().collect();

    let shape: Vec<usize> = if n_rows <= 1 {
        vec![n_cols]
    } else if n_cols == 1 {
        vec![n_rows]
    } else {
        vec![n_rows, n_cols]
    };

    Grid::from_shape_vec(&shape, values)
}

/// Loads a text grid with a statically chosen element type.
///
/// # Errors
///
/// [`ZonalError::IoError`] if the file cannot be read, otherwise see [`parse_grid`].
pub fn load_typed<T: GridElement, P: AsRef<Path>>(path: P) -> Result<Grid<T>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let grid = parse_grid::<T>(&text)?;

    tracing::debug!(
        path = %path.display(),
        dtype = T::DTYPE,
        shape = ?grid.shape(),
        "loaded grid"
    );

    Ok(grid)
}

/// Loads a text grid with an element type chosen at runtime.
///
/// # Errors
///
/// See [`load_typed`].
pub fn load_grid<P: AsRef<Path>>(path: P, element_type: ElementType) -> Result<AnyGrid> {
    let path = path.as_ref();
    Ok(match element_type {
        ElementType::Int8 => load_typed::<i8, _>(path)?.into(),
        ElementType::Int16 => load_typed::<i16, _>(path)?.into(),
        ElementType::Int32 => load_typed::<i32, _>(path)?.into(),
        ElementType::Int64 => load_typed::<i64, _>(path)?.into(),
        ElementType::UInt8 => load_typed::<u8, _>(path)?.into(),
        ElementType::UInt16 => load_typed::<u16, _>(path)?.into(),
        ElementType::UInt32 => load_typed::<u32, _>(path)?.into(),
        ElementType::UInt64 => load_typed::<u64, _>(path)?.into(),
        ElementType::Float32 => load_typed::<f32, _>(path)?.into(),
        ElementType::Float64 => load_typed::<f64, _>(path)?.into(),
    })
}

/// Reads a 1-D or 2-D variable from a NetCDF file as `f64`.
///
/// # Errors
///
/// - [`ZonalError::VariableNotFound`] if the file has no such variable
/// - [`ZonalError::NetCDFError`] if the file cannot be opened or read
pub fn load_netcdf_grid<P: AsRef<Path>>(path: P, var_name: &str) -> Result<Grid<f64>> {
    let file = netcdf::open(path.as_ref())?;
    let var = file
        .variable(var_name)
        .ok_or_else(|| ZonalError::VariableNotFound {
            var: var_name.to_string(),
        })?;

    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let values = var.get_values::<f64, _>(..)?;

    Grid::from_shape_vec(&shape, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_rules() {
        let row: Grid<i32> = parse_grid("0 1 2 3 4 5\n").unwrap();
        assert_eq!(row.shape(), &[6]);

        let column: Grid<i32> = parse_grid("1\n2\n3\n").unwrap();
        assert_eq!(column.shape(), &[3]);

        let matrix: Grid<i32> = parse_grid("0 1 2\n3 4 5\n").unwrap();
        assert_eq!(matrix.shape(), &[2, 3]);
        assert_eq!(matrix.get(&[1, 2]), Some(5));

        let empty: Grid<f64> = parse_grid("").unwrap();
        assert_eq!(empty.shape(), &[0]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# zones\n\n1 2  # first row\n\n3 4\n";
        let grid: Grid<u8> = parse_grid(text).unwrap();
        assert_eq!(grid.shape(), &[2, 2]);
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_parse_errors() {
        match parse_grid::<i64>("1 2\n3 4.5\n") {
            Err(ZonalError::ParseError { line, token, dtype }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "4.5");
                assert_eq!(dtype, "int64");
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }

        match parse_grid::<f64>("1 2 3\n4 5\n") {
            Err(ZonalError::RaggedRow {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("Expected RaggedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_float_tokens() {
        let grid: Grid<f64> = parse_grid("1.5 nan -2e3\n").unwrap();
        assert_eq!(grid.get(&[0]), Some(1.5));
        assert!(grid.get(&[1]).unwrap().is_nan());
        assert_eq!(grid.get(&[2]), Some(-2000.0));
    }
}
