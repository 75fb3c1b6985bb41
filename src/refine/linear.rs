//! Linear (multilinear) coarse → fine refinement of field data.

use itertools::Itertools;
use num_traits::{Float, FromPrimitive};

use crate::amr_error::{AmrFieldError, Result};
use crate::data::field::Field;
use crate::data::storage::Storage;
use crate::geometry::{Index, IndexBox};
use crate::layout::{Centering, RefinementRatio};
use crate::refine::indexes_and_weights::LinearRefineIndexesAndWeights;

/// Fills fine samples from the `2^D` surrounding coarse samples.
///
/// Each direction contributes an independent `(1 - w, w)` pair from its
/// weight table; the coarse sample at `start + corner` is weighted by the
/// product over directions.
#[derive(Clone, Debug)]
pub struct FieldLinearRefine<const D: usize> {
    indexes_and_weights: LinearRefineIndexesAndWeights<D>,
    /// `{0, 1}^D`, one entry per coarse neighbour.
    corners: Vec<[i32; D]>,
}

impl<const D: usize> FieldLinearRefine<D> {
    pub fn new(centering: [Centering; D], ratio: RefinementRatio<D>) -> Result<Self> {
        Ok(Self::from_indexes_and_weights(
            LinearRefineIndexesAndWeights::new(centering, ratio)?,
        ))
    }

    pub fn from_indexes_and_weights(indexes_and_weights: LinearRefineIndexesAndWeights<D>) -> Self {
        let corners = (0..D)
            .map(|_| 0..2)
            .multi_cartesian_product()
            .map(|bits: Vec<i32>| std::array::from_fn(|dir| bits[dir]))
            .collect();
        Self {
            indexes_and_weights,
            corners,
        }
    }

    #[inline]
    pub fn indexes_and_weights(&self) -> &LinearRefineIndexesAndWeights<D> {
        &self.indexes_and_weights
    }

    /// The coarse box read when refining `fine_range`.
    ///
    /// Start indices are non-decreasing in the fine index, so the box spans
    /// from the start of `lower` to one past the start of `upper`.
    pub fn required_source_box(&self, fine_range: &IndexBox<D>) -> IndexBox<D> {
        if fine_range.is_empty() {
            return IndexBox::empty();
        }
        let lower = self.indexes_and_weights.compute_start_index(fine_range.lower());
        let upper = self
            .indexes_and_weights
            .compute_start_index(fine_range.upper())
            .map(|s| s + 1);
        IndexBox::new(lower, upper)
    }

    /// Refine `source` into `destination` over `fine_range` (data index space).
    ///
    /// # Errors
    /// - `DestinationOutOfRange` if `fine_range` is not inside the destination ghost box.
    /// - `CoarseNeighborOutOfRange` if a needed coarse sample is not allocated in `source`.
    ///
    /// Nothing is written when an error is returned. An empty range is a no-op.
    pub fn refine<V, Sd, Ss>(
        &self,
        destination: &mut Field<D, V, Sd>,
        source: &Field<D, V, Ss>,
        fine_range: &IndexBox<D>,
    ) -> Result<()>
    where
        V: Float + FromPrimitive,
        Sd: Storage<V>,
        Ss: Storage<V>,
    {
        if fine_range.is_empty() {
            return Ok(());
        }
        if !destination.ghost_box().contains_box(fine_range) {
            return Err(AmrFieldError::DestinationOutOfRange {
                range: fine_range.to_string(),
                allocated: destination.ghost_box().to_string(),
            });
        }
        let required = self.required_source_box(fine_range);
        if !source.ghost_box().contains_box(&required) {
            return Err(AmrFieldError::CoarseNeighborOutOfRange {
                required: required.to_string(),
                allocated: source.ghost_box().to_string(),
            });
        }

        let (lo, hi) = self.converted_weights::<V>()?;
        let iw = &self.indexes_and_weights;
        let coarse = source.as_slice();

        for fine in fine_range.iter() {
            let start = iw.compute_start_index(fine);
            let k = iw.compute_weight_index(fine);

            let mut acc = V::zero();
            for corner in &self.corners {
                let mut coef = V::one();
                let mut at: Index<D> = start;
                for dir in 0..D {
                    if corner[dir] == 1 {
                        coef = coef * hi[dir][k[dir]];
                        at[dir] += 1;
                    } else {
                        coef = coef * lo[dir][k[dir]];
                    }
                }
                acc = acc + coef * coarse[source.offset_unchecked(&at)];
            }

            let lin = destination.offset_unchecked(&fine);
            destination.as_mut_slice()[lin] = acc;
        }

        log::trace!(
            "refined {} fine samples over {fine_range} from coarse {required}",
            fine_range.volume()
        );
        Ok(())
    }

    /// Refine the data samples of a fine *cell* box.
    ///
    /// Primal directions carry one more sample than cells, so the box is
    /// extended accordingly, then clipped to the destination ghost box.
    pub fn refine_cell_box<V, Sd, Ss>(
        &self,
        destination: &mut Field<D, V, Sd>,
        source: &Field<D, V, Ss>,
        fine_cell_box: &IndexBox<D>,
    ) -> Result<()>
    where
        V: Float + FromPrimitive,
        Sd: Storage<V>,
        Ss: Storage<V>,
    {
        let mask = Centering::primal_mask(self.indexes_and_weights.centering());
        let data_box = fine_cell_box.extend_upper(mask);
        let clipped = data_box.intersect(destination.ghost_box());
        if clipped != data_box {
            log::debug!(
                "refine box {data_box} clipped to {clipped} by destination allocation {}",
                destination.ghost_box()
            );
        }
        self.refine(destination, source, &clipped)
    }

    /// `(1 - w, w)` tables of every direction, converted once per call.
    #[allow(clippy::type_complexity)]
    fn converted_weights<V: Float + FromPrimitive>(
        &self,
    ) -> Result<([Vec<V>; D], [Vec<V>; D])> {
        let convert = |w: f64| {
            V::from_f64(w).ok_or_else(|| {
                AmrFieldError::InvariantViolation(format!("weight {w} is not representable"))
            })
        };
        let tables = self.indexes_and_weights.weights();
        let mut lo: [Vec<V>; D] = std::array::from_fn(|_| Vec::new());
        let mut hi: [Vec<V>; D] = std::array::from_fn(|_| Vec::new());
        for dir in 0..D {
            for &w in tables[dir].weights() {
                lo[dir].push(convert(1.0 - w)?);
                hi[dir].push(convert(w)?);
            }
        }
        Ok((lo, hi))
    }
}
