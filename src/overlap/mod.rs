//! Overlap module: describing, resolving and carrying out field transfers
//! between patches of the same level.
//!
//! A transfer goes through three steps:
//! 1. an [`OverlapDescriptor`] (or a pair of [`BoxGeometry`]s) states what may
//!    be read and written;
//! 2. it is resolved into a [`FieldOverlap`], an explicit list of boxes;
//! 3. [`copy()`], [`accumulate`] or [`copy_within`] move the data.

pub mod copy;
pub mod delta;
pub mod descriptor;
pub mod field_overlap;
pub mod geometry;

pub use copy::{accumulate, copy, copy_with_descriptor, copy_within, transfer};
pub use delta::{AddDelta, CopyDelta, Delta};
pub use descriptor::OverlapDescriptor;
pub use field_overlap::FieldOverlap;
pub use geometry::{BoxGeometry, CellGeometry, FieldGeometry, NodeGeometry};
