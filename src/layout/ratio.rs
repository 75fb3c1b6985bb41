//! Integer refinement ratio between two levels.

use serde::{Deserialize, Serialize};

use crate::amr_error::{AmrFieldError, Result};
use crate::geometry::index_box::serde_array;

/// Number of fine cells per coarse cell, per direction. Always `>= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRatio<D>", into = "RawRatio<D>")]
pub struct RefinementRatio<const D: usize>([i32; D]);

impl<const D: usize> RefinementRatio<D> {
    /// # Errors
    /// `InvalidRefinementRatio` for the first component below 1.
    pub fn new(ratio: [i32; D]) -> Result<Self> {
        if let Some(direction) = ratio.iter().position(|&r| r < 1) {
            return Err(AmrFieldError::InvalidRefinementRatio {
                direction,
                ratio: ratio[direction],
            });
        }
        Ok(Self(ratio))
    }

    /// Same ratio in every direction.
    pub fn uniform(ratio: i32) -> Result<Self> {
        Self::new([ratio; D])
    }

    /// Build from a runtime slice, checking its length against `D`.
    pub fn from_slice(ratio: &[i32]) -> Result<Self> {
        let arr: [i32; D] = ratio
            .try_into()
            .map_err(|_| AmrFieldError::DimensionMismatch {
                expected: D,
                found: ratio.len(),
            })?;
        Self::new(arr)
    }

    #[inline]
    pub fn get(&self, dir: usize) -> i32 {
        self.0[dir]
    }

    #[inline]
    pub fn as_array(&self) -> [i32; D] {
        self.0
    }
}

#[derive(Serialize, Deserialize)]
struct RawRatio<const D: usize>(#[serde(with = "serde_array")] [i32; D]);

impl<const D: usize> TryFrom<RawRatio<D>> for RefinementRatio<D> {
    type Error = AmrFieldError;

    fn try_from(raw: RawRatio<D>) -> Result<Self, Self::Error> {
        Self::new(raw.0)
    }
}

impl<const D: usize> From<RefinementRatio<D>> for RawRatio<D> {
    fn from(ratio: RefinementRatio<D>) -> Self {
        RawRatio(ratio.0)
    }
}
