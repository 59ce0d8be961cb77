//! Grid data structures
//!
//! - [`Grid`]: statically typed, shape-fixed container over `ndarray::ArrayD`
//! - [`GridElement`]: the cell types a grid can hold, with their numeric family
//! - [`AnyGrid`]: a grid whose element type was chosen at runtime

mod any;
mod container;
mod element;

pub(crate) use any::with_grid;
pub use any::AnyGrid;
pub use container::Grid;
pub use element::{ensure_integer, ElementKind, ElementType, GridElement, ZoneId};
