#![cfg_attr(docsrs, feature(doc_cfg))]
//! # amr-field
//!
//! amr-field holds the field-level numerics of a structured adaptive mesh
//! refinement code: how a quantity sampled on a coarse patch is linearly
//! interpolated onto a finer one, and how field data is moved between
//! patches of the same level across ghost regions and periodic boundaries.
//!
//! ## Features
//! - Per-direction [`Centering`] (primal / dual) with tabulated, shared
//!   one-dimensional [`WeightTable`]s
//! - [`LinearRefineIndexesAndWeights`] and the multilinear
//!   [`FieldLinearRefine`] operator in 1, 2 or 3 dimensions
//! - [`OverlapDescriptor`] / [`BoxGeometry`] resolution into explicit
//!   [`FieldOverlap`]s, then [`copy`](overlap::copy()),
//!   [`accumulate`](overlap::accumulate) or [`copy_within`](overlap::copy_within)
//! - Invariant checks in debug builds or with the `check-invariants` feature
//!
//! ## Index conventions
//!
//! All indices are global to a level and boxes are inclusive. A cell box
//! `l..=u` carries dual samples `l..=u` and primal samples `l..=u+1` along
//! each direction. Field buffers are laid out with the first direction
//! fastest.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod amr_error;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod layout;
pub mod overlap;
pub mod refine;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::amr_error::AmrFieldError;
    pub use crate::data::{Field, Storage, VecStorage};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{Index, IndexBox, Transformation};
    pub use crate::layout::{Centering, LayoutConfig, RefinementRatio};
    pub use crate::overlap::{
        AddDelta, BoxGeometry, CellGeometry, CopyDelta, Delta, FieldGeometry, FieldOverlap,
        NodeGeometry, OverlapDescriptor, accumulate, copy, copy_with_descriptor, copy_within,
        transfer,
    };
    pub use crate::refine::{
        FieldLinearRefine, LinearRefineIndexesAndWeights, WeightTable, WeightTableCache,
    };
}

pub use layout::Centering;
pub use overlap::{BoxGeometry, FieldOverlap, OverlapDescriptor};
pub use refine::{FieldLinearRefine, LinearRefineIndexesAndWeights, WeightTable};
