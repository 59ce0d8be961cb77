//! Centralized error handling for zonal-grid
//!
//! Every fallible operation in the crate returns [`ZonalError`]. Validation errors
//! (`TypeMismatch`, `ShapeMismatch`) are raised before any output grid is
//! allocated, so a failed call never leaves partial results behind.

use std::fmt;

/// Main error type for zonal-grid operations
#[derive(Debug)]
pub enum ZonalError {
    /// Zone grid element type is not an integer type
    TypeMismatch { dtype: &'static str, message: String },

    /// Two grids that must be co-registered have different shapes
    ShapeMismatch { left: Vec<usize>, right: Vec<usize> },

    /// Temperature and humidity sensor grids have different shapes
    SensorShapeMismatch {
        temperature: Vec<usize>,
        humidity: Vec<usize>,
    },

    /// A token in a text grid does not parse as the requested element type
    ParseError {
        line: usize,
        token: String,
        dtype: &'static str,
    },

    /// A row in a text grid has a different number of columns than the first row
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Reduction over a grid with no elements
    EmptyInput { operation: &'static str },

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Anything that does not fit the variants above
    Generic(String),
}

impl fmt::Display for ZonalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZonalError::TypeMismatch { message, .. } => write!(f, "{}", message),
            ZonalError::ShapeMismatch { left, right } => write!(
                f,
                "Arrays don't have the same shape: {:?} != {:?}",
                left, right
            ),
            ZonalError::SensorShapeMismatch {
                temperature,
                humidity,
            } => write!(
                f,
                "Shape of data sensors must be the same. Temperature: {} != humidity: {}",
                shape_tuple(temperature),
                shape_tuple(humidity)
            ),
            ZonalError::ParseError { line, token, dtype } => write!(
                f,
                "Parse error on line {}: '{}' is not a valid {} value",
                line, token, dtype
            ),
            ZonalError::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "Parse error on line {}: expected {} columns, found {}",
                line, expected, found
            ),
            ZonalError::EmptyInput { operation } => {
                write!(f, "zero-size array to reduction operation {}", operation)
            }
            ZonalError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            ZonalError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            ZonalError::IoError(e) => write!(f, "I/O error: {}", e),
            ZonalError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            ZonalError::ArrayError(e) => write!(f, "Array error: {}", e),
            ZonalError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ZonalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ZonalError::NetCDFError(e) => Some(e),
            ZonalError::IoError(e) => Some(e),
            ZonalError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl ZonalError {
    /// Build a `ShapeMismatch` from two shape slices
    pub fn shape_mismatch(left: &[usize], right: &[usize]) -> Self {
        ZonalError::ShapeMismatch {
            left: left.to_vec(),
            right: right.to_vec(),
        }
    }
}

/// Shape written as a tuple: `(2, 3)`, `(4,)`, `()`
fn shape_tuple(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({},)", single),
        _ => {
            let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
            format!("({})", dims.join(", "))
        }
    }
}

impl From<netcdf::Error> for ZonalError {
    fn from(error: netcdf::Error) -> Self {
        ZonalError::NetCDFError(error)
    }
}

impl From<std::io::Error> for ZonalError {
    fn from(error: std::io::Error) -> Self {
        ZonalError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for ZonalError {
    fn from(error: ndarray::ShapeError) -> Self {
        ZonalError::ArrayError(error)
    }
}

impl From<String> for ZonalError {
    fn from(error: String) -> Self {
        ZonalError::Generic(error)
    }
}

impl From<&str> for ZonalError {
    fn from(error: &str) -> Self {
        ZonalError::Generic(error.to_string())
    }
}

/// Result type alias for zonal-grid operations
pub type Result<T> = std::result::Result<T, ZonalError>;
