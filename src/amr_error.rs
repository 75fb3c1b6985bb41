//! AmrFieldError: Unified error type for amr-field public APIs
//!
//! Every fallible operation of the crate (table construction, refine, overlap
//! copy) reports through this enum. Errors are programming-contract
//! violations: none of them is transient, and none leaves the destination
//! field partially written.

use thiserror::Error;

/// Unified error type for amr-field operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmrFieldError {
    /// A refinement ratio component was below 1.
    #[error("invalid refinement ratio {ratio} in direction {direction} (must be >= 1)")]
    InvalidRefinementRatio { direction: usize, ratio: i32 },
    /// Centering and ratio arrays (or the requested dimension) disagree in length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Interpolation order outside of the supported `1..=3`.
    #[error("unsupported interpolation order {0} (expected 1, 2 or 3)")]
    InvalidInterpOrder(u8),
    /// Malformed box or geometry description.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A destination range is not covered by the destination allocation.
    #[error("destination range {range} is outside the allocated box {allocated}")]
    DestinationOutOfRange { range: String, allocated: String },
    /// Refinement needs coarse samples the source does not hold.
    #[error("coarse neighbours {required} are outside the source allocation {allocated}")]
    CoarseNeighborOutOfRange { required: String, allocated: String },
    /// An overlap copy needs source samples the source does not hold.
    #[error("source range {required} is outside the source allocation {allocated}")]
    SourceOutOfRange { required: String, allocated: String },
    /// Single-index access outside of the allocated box.
    #[error("index {index} is outside the allocated box {allocated}")]
    IndexOutOfRange { index: String, allocated: String },
    /// A structural invariant was broken.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = AmrFieldError> = std::result::Result<T, E>;
