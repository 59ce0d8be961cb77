//! Grids whose element type is only known at runtime

use crate::errors::Result;
use crate::grid::{ElementKind, ElementType, Grid};
use crate::zones::{extract_zone_set, ZoneSet};

/// A grid tagged with its element type.
///
/// Produced by the text loader when the caller picks the element type at
/// runtime. Each variant holds a statically typed [`Grid`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGrid {
    Int8(Grid<i8>),
    Int16(Grid<i16>),
    Int32(Grid<i32>),
    Int64(Grid<i64>),
    UInt8(Grid<u8>),
    UInt16(Grid<u16>),
    UInt32(Grid<u32>),
    UInt64(Grid<u64>),
    Float32(Grid<f32>),
    Float64(Grid<f64>),
}

/// Run `$body` with `$grid` bound to the inner typed grid
macro_rules! with_grid {
    ($any:expr, $grid:ident => $body:expr) => {
        match $any {
            AnyGrid::Int8($grid) => $body,
            AnyGrid::Int16($grid) => $body,
            AnyGrid::Int32($grid) => $body,
            AnyGrid::Int64($grid) => $body,
            AnyGrid::UInt8($grid) => $body,
            AnyGrid::UInt16($grid) => $body,
            AnyGrid::UInt32($grid) => $body,
            AnyGrid::UInt64($grid) => $body,
            AnyGrid::Float32($grid) => $body,
            AnyGrid::Float64($grid) => $body,
        }
    };
}

pub(crate) use with_grid;

impl AnyGrid {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Int8(_) => ElementType::Int8,
            Self::Int16(_) => ElementType::Int16,
            Self::Int32(_) => ElementType::Int32,
            Self::Int64(_) => ElementType::Int64,
            Self::UInt8(_) => ElementType::UInt8,
            Self::UInt16(_) => ElementType::UInt16,
            Self::UInt32(_) => ElementType::UInt32,
            Self::UInt64(_) => ElementType::UInt64,
            Self::Float32(_) => ElementType::Float32,
            Self::Float64(_) => ElementType::Float64,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.element_type().kind()
    }

    pub fn dtype(&self) -> &'static str {
        self.element_type().dtype()
    }

    pub fn shape(&self) -> &[usize] {
        with_grid!(self, g => g.shape())
    }

    pub fn len(&self) -> usize {
        with_grid!(self, g => g.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen every cell to `f64`
    pub fn to_f64(&self) -> Grid<f64> {
        with_grid!(self, g => g.to_f64())
    }

    /// Distinct zone identifiers, failing for float-typed grids
    pub fn zone_set(&self) -> Result<ZoneSet> {
        with_grid!(self, g => extract_zone_set(g))
    }
}

macro_rules! impl_from_grid {
    ($t:ty, $variant:ident) => {
        impl From<Grid<$t>> for AnyGrid {
            fn from(grid: Grid<$t>) -> Self {
                AnyGrid::$variant(grid)
            }
        }
    };
}

impl_from_grid!(i8, Int8);
impl_from_grid!(i16, Int16);
impl_from_grid!(i32, Int32);
impl_from_grid!(i64, Int64);
impl_from_grid!(u8, UInt8);
impl_from_grid!(u16, UInt16);
impl_from_grid!(u32, UInt32);
impl_from_grid!(u64, UInt64);
impl_from_grid!(f32, Float32);
impl_from_grid!(f64, Float64);
