//! Array engine types.
//!
//! `Shape` is the clamped 3-axis extent triple, `FlatArray` owns a shape and
//! its row-major storage, and `vector` holds the short-vector primitives bound
//! by the vector opcode catalog.
mod array;
mod descriptor;
mod ops;
pub mod shape;
pub mod vector;

pub use array::{FlatArray, ShapeError};
pub use shape::{clamp_extents, product, Position, Shape, MAX_EXTENT, RANK};
