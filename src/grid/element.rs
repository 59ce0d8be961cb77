//! Grid element types
//!
//! Every concrete element type carries its family ([`ElementKind`]) and its
//! dtype name as associated constants, so "is this an integer grid?" is answered
//! by the type parameter rather than by inspecting values.

use crate::errors::{Result, ZonalError};
use num_traits::{Bounded, NumCast, ToPrimitive, Zero};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Identifier of one zone in a zone grid
pub type ZoneId = i64;

/// Numeric family of a grid element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Signed or unsigned integers
    Integer,
    /// IEEE floating point
    Float,
}

/// Trait for types that can be stored in a grid cell.
pub trait GridElement:
    Copy + Debug + PartialEq + PartialOrd + NumCast + Bounded + Zero + FromStr + Send + Sync + 'static
{
    /// Name of the element type as printed in error messages (`int64`, `float64`, ...)
    const DTYPE: &'static str;

    /// Numeric family of the element type
    const KIND: ElementKind;

    /// Runtime tag for this element type
    const ELEMENT_TYPE: ElementType;

    /// Widen the value to `f64` for aggregation
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Interpret the value as a zone identifier. `None` for floats and for
    /// unsigned values above `i64::MAX`.
    fn zone_id(self) -> Option<ZoneId>;

    /// Whether the value is NaN (always false for integers)
    fn is_nan_value(self) -> bool;
}

macro_rules! impl_grid_element_int {
    ($t:ty, $dtype:literal, $tag:ident) => {
        impl GridElement for $t {
            const DTYPE: &'static str = $dtype;
            const KIND: ElementKind = ElementKind::Integer;
            const ELEMENT_TYPE: ElementType = ElementType::$tag;

            fn zone_id(self) -> Option<ZoneId> {
                ToPrimitive::to_i64(&self)
            }

            fn is_nan_value(self) -> bool {
                false
            }
        }
    };
}

macro_rules! impl_grid_element_float {
    ($t:ty, $dtype:literal, $tag:ident) => {
        impl GridElement for $t {
            const DTYPE: &'static str = $dtype;
            const KIND: ElementKind = ElementKind::Float;
            const ELEMENT_TYPE: ElementType = ElementType::$tag;

            fn zone_id(self) -> Option<ZoneId> {
                None
            }

            fn is_nan_value(self) -> bool {
                self.is_nan()
            }
        }
    };
}

impl_grid_element_int!(i8, "int8", Int8);
impl_grid_element_int!(i16, "int16", Int16);
impl_grid_element_int!(i32, "int32", Int32);
impl_grid_element_int!(i64, "int64", Int64);
impl_grid_element_int!(u8, "uint8", UInt8);
impl_grid_element_int!(u16, "uint16", UInt16);
impl_grid_element_int!(u32, "uint32", UInt32);
impl_grid_element_int!(u64, "uint64", UInt64);
impl_grid_element_float!(f32, "float32", Float32);
impl_grid_element_float!(f64, "float64", Float64);

/// Check that `T` belongs to the integer family.
///
/// # Errors
///
/// Returns [`ZonalError::TypeMismatch`] naming the dtype when `T` is a float type.
pub fn ensure_integer<T: GridElement>() -> Result<()> {
    match T::KIND {
        ElementKind::Integer => Ok(()),
        ElementKind::Float => Err(ZonalError::TypeMismatch {
            dtype: T::DTYPE,
            message: format!("The elements type must be int, not {}", T::DTYPE),
        }),
    }
}

/// Element type chosen at runtime (loader and CLI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
    ];

    /// The dtype name of this element type
    #[must_use]
    pub const fn dtype(self) -> &'static str {
        match self {
            Self::Int8 => i8::DTYPE,
            Self::Int16 => i16::DTYPE,
            Self::Int32 => i32::DTYPE,
            Self::Int64 => i64::DTYPE,
            Self::UInt8 => u8::DTYPE,
            Self::UInt16 => u16::DTYPE,
            Self::UInt32 => u32::DTYPE,
            Self::UInt64 => u64::DTYPE,
            Self::Float32 => f32::DTYPE,
            Self::Float64 => f64::DTYPE,
        }
    }

    #[must_use]
    pub const fn kind(self) -> ElementKind {
        match self {
            Self::Float32 | Self::Float64 => ElementKind::Float,
            _ => ElementKind::Integer,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype())
    }
}

impl FromStr for ElementType {
    type Err = ZonalError;

    /// Accepts dtype names plus the `int` / `float` shorthands (64-bit).
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "int" => return Ok(Self::Int64),
            "uint" => return Ok(Self::UInt64),
            "float" => return Ok(Self::Float64),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|t| t.dtype() == name)
            .ok_or_else(|| ZonalError::Generic(format!("Unknown element type '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_gate() {
        assert!(ensure_integer::<i32>().is_ok());
        assert!(ensure_integer::<u8>().is_ok());

        let err = ensure_integer::<f64>().unwrap_err();
        assert_eq!(err.to_string(), "The elements type must be int, not float64");
        let err = ensure_integer::<f32>().unwrap_err();
        assert_eq!(err.to_string(), "The elements type must be int, not float32");
    }

    #[test]
    fn test_element_type_names() {
        for t in ElementType::ALL {
            assert_eq!(t.dtype().parse::<ElementType>().unwrap(), t);
        }
        assert_eq!("int".parse::<ElementType>().unwrap(), ElementType::Int64);
        assert_eq!("Float".parse::<ElementType>().unwrap(), ElementType::Float64);
        assert!("complex128".parse::<ElementType>().is_err());
        assert_eq!(i16::ELEMENT_TYPE, ElementType::Int16);
    }

    #[test]
    fn test_zone_id_conversion() {
        assert_eq!(7u8.zone_id(), Some(7));
        assert_eq!((-3i32).zone_id(), Some(-3));
        assert_eq!(u64::MAX.zone_id(), None);
        assert_eq!(1.0f64.zone_id(), None);
    }
}
