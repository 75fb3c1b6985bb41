//! Coarse → fine linear refinement.
//!
//! - [`weights`]: the 1-D weight table of one `(centering, ratio)` pair.
//! - [`cache`]: process-wide sharing of those tables.
//! - [`indexes_and_weights`]: per-direction start-index / weight lookups.
//! - [`linear`]: the multilinear refine operator over fields.

pub mod cache;
pub mod indexes_and_weights;
pub mod linear;
pub mod weights;

pub use cache::WeightTableCache;
pub use indexes_and_weights::LinearRefineIndexesAndWeights;
pub use linear::FieldLinearRefine;
pub use weights::WeightTable;
