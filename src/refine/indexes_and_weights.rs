//! Per-direction start indices and weights for linear refinement.

use std::sync::Arc;

use crate::amr_error::{AmrFieldError, Result};
use crate::geometry::Index;
use crate::layout::{Centering, RefinementRatio};
use crate::refine::cache::WeightTableCache;
use crate::refine::weights::WeightTable;

/// The 1-D weight machinery of every direction of a `D`-dimensional quantity.
///
/// Holds no reference to any field: one instance serves every patch that
/// shares the centering and ratio.
#[derive(Clone, Debug)]
pub struct LinearRefineIndexesAndWeights<const D: usize> {
    centering: [Centering; D],
    ratio: RefinementRatio<D>,
    tables: [Arc<WeightTable>; D],
}

impl<const D: usize> LinearRefineIndexesAndWeights<D> {
    /// Fetch (or build) the weight table of each direction from the global cache.
    pub fn new(centering: [Centering; D], ratio: RefinementRatio<D>) -> Result<Self> {
        Self::with_cache(centering, ratio, WeightTableCache::global())
    }

    /// Same as [`new`](Self::new) with an explicit cache.
    pub fn with_cache(
        centering: [Centering; D],
        ratio: RefinementRatio<D>,
        cache: &WeightTableCache,
    ) -> Result<Self> {
        let mut tables = Vec::with_capacity(D);
        for dir in 0..D {
            let table = cache
                .get_or_build(centering[dir], ratio.get(dir))
                .map_err(|e| match e {
                    AmrFieldError::InvalidRefinementRatio { ratio, .. } => {
                        AmrFieldError::InvalidRefinementRatio { direction: dir, ratio }
                    }
                    other => other,
                })?;
            tables.push(table);
        }
        let tables: [Arc<WeightTable>; D] = tables
            .try_into()
            .map_err(|v: Vec<_>| AmrFieldError::DimensionMismatch {
                expected: D,
                found: v.len(),
            })?;
        Ok(Self {
            centering,
            ratio,
            tables,
        })
    }

    /// Build from runtime slices, e.g. a parsed input deck.
    ///
    /// # Errors
    /// `DimensionMismatch` if either slice length differs from `D`,
    /// `InvalidRefinementRatio` for a ratio below 1.
    pub fn from_slices(centering: &[Centering], ratio: &[i32]) -> Result<Self> {
        if centering.len() != ratio.len() {
            return Err(AmrFieldError::DimensionMismatch {
                expected: centering.len(),
                found: ratio.len(),
            });
        }
        let centering: [Centering; D] =
            centering
                .try_into()
                .map_err(|_| AmrFieldError::DimensionMismatch {
                    expected: D,
                    found: centering.len(),
                })?;
        Self::new(centering, RefinementRatio::from_slice(ratio)?)
    }

    #[inline]
    pub fn centering(&self) -> &[Centering; D] {
        &self.centering
    }

    #[inline]
    pub fn ratio(&self) -> &RefinementRatio<D> {
        &self.ratio
    }

    /// Weight table of every direction.
    pub fn weights(&self) -> [&WeightTable; D] {
        std::array::from_fn(|dir| self.tables[dir].as_ref())
    }

    /// First coarse index of the bounding pair, per direction.
    #[inline]
    pub fn compute_start_index(&self, fine: Index<D>) -> Index<D> {
        std::array::from_fn(|dir| self.tables[dir].start_index(fine[dir]))
    }

    /// Weight-table position of `fine`, per direction.
    #[inline]
    pub fn compute_weight_index(&self, fine: Index<D>) -> [usize; D] {
        std::array::from_fn(|dir| self.tables[dir].weight_index(fine[dir]))
    }

    /// `(weight of start, weight of start + 1)` per direction.
    #[inline]
    pub fn weight_pair(&self, fine: Index<D>) -> [(f64, f64); D] {
        std::array::from_fn(|dir| {
            let w = self.tables[dir].weight_for(fine[dir]);
            (1.0 - w, w)
        })
    }
}
