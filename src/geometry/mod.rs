//! Geometry primitives: integer indices, boxes and periodic transformations.
//!
//! These are the minimal collaborators the refine and overlap machinery
//! consumes; a full patch hierarchy lives outside of this crate.

pub mod index_box;
pub mod transformation;

pub use index_box::{BoxIndices, IndexBox};
pub use transformation::Transformation;

/// A global index in a `D`-dimensional structured index space.
pub type Index<const D: usize> = [i32; D];
