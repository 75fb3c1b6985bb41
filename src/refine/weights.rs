//! One-dimensional linear refinement weights.
//!
//! For a fine index `f` and ratio `r` the two coarse samples bounding `f` are
//! `start(f)` and `start(f) + 1`. The table stores the weight of the *second*
//! sample, one entry per position `k = f mod r` inside a refinement period,
//! plus a closing entry at `k = r`.
//!
//! # Primal
//! Fine node `f` sits at `f / r` coarse cells: `start = floor(f / r)` and
//! `w(k) = k / r`, so `w(0) = 0`, `w(r) = 1`.
//!
//! # Dual
//! Fine cell `f` has its centre at `(f + 1/2) / r`, coarse cell `j` at `j + 1/2`.
//! Writing `s = 2k + 1 - r` (the offset from the nearest coarse centre, in
//! half fine cells), the weight is `s / 2r` when `s > 0`, otherwise the sample
//! is bounded by the previous coarse pair and the weight is `(s + 2r) / 2r`.
//! A fine centre that lands exactly on a coarse centre (odd `r`,
//! `k = (r - 1) / 2`) is therefore attached to the *lower* pair with weight
//! exactly 1. The closing entry `w(r) = 1 - w((r - 1) / 2)` re-expresses that
//! position from the upper pair.

use crate::amr_error::{AmrFieldError, Result};
use crate::debug_invariants::{DebugInvariants, ensure};
use crate::layout::Centering;

/// Interpolation weights for one direction, built once per `(centering, ratio)`.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    centering: Centering,
    ratio: i32,
    weights: Vec<f64>,
}

impl WeightTable {
    /// Tabulate the weights. **O(ratio)**.
    ///
    /// # Errors
    /// `InvalidRefinementRatio` if `ratio < 1`.
    pub fn new(centering: Centering, ratio: i32) -> Result<Self> {
        if ratio < 1 {
            return Err(AmrFieldError::InvalidRefinementRatio {
                direction: 0,
                ratio,
            });
        }

        let weights = match centering {
            Centering::Primal => (0..=ratio)
                .map(|k| f64::from(k) / f64::from(ratio))
                .collect(),
            Centering::Dual => {
                let r = i64::from(ratio);
                let two_r = 2.0 * f64::from(ratio);
                let mut w: Vec<f64> = (0..r)
                    .map(|k| {
                        let s = 2 * k + 1 - r;
                        let numerator = if s > 0 { s } else { s + 2 * r };
                        numerator as f64 / two_r
                    })
                    .collect();
                let mid = ((ratio - 1) / 2) as usize;
                w.push(1.0 - w[mid]);
                w
            }
        };

        let table = Self {
            centering,
            ratio,
            weights,
        };
        table.debug_assert_invariants();
        Ok(table)
    }

    #[inline]
    pub fn centering(&self) -> Centering {
        self.centering
    }

    #[inline]
    pub fn ratio(&self) -> i32 {
        self.ratio
    }

    /// All `ratio + 1` weights.
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false: a table has at least two entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of the second coarse sample at table position `k`.
    ///
    /// # Panics
    /// Panics if `k > ratio`.
    #[inline]
    pub fn weight(&self, k: usize) -> f64 {
        self.weights[k]
    }

    /// Coarse index of the first of the two samples bounding `fine`.
    #[inline]
    pub fn start_index(&self, fine: i32) -> i32 {
        match self.centering {
            Centering::Primal => fine.div_euclid(self.ratio),
            // 2 * fine leaves i32 for |fine| >= 2^30; the quotient fits again.
            Centering::Dual => {
                let r = i64::from(self.ratio);
                (2 * i64::from(fine) - r).div_euclid(2 * r) as i32
            }
        }
    }

    /// Position of `fine` within its refinement period, `0..ratio`.
    #[inline]
    pub fn weight_index(&self, fine: i32) -> usize {
        fine.rem_euclid(self.ratio) as usize
    }

    /// Weight of `start_index(fine) + 1` for this fine index.
    #[inline]
    pub fn weight_for(&self, fine: i32) -> f64 {
        self.weights[self.weight_index(fine)]
    }

    /// Table position mirrored about the midpoint: `r - k` for primal, and
    /// `r - 1 - k` over the reachable dual positions (the closing dual entry
    /// pairs with `(r - 1) / 2`).
    pub fn mirror(&self, k: usize) -> usize {
        let r = self.ratio as usize;
        match self.centering {
            Centering::Primal => r - k,
            Centering::Dual if k == r => (r - 1) / 2,
            Centering::Dual if 2 * k + 1 == r => r,
            Centering::Dual => r - 1 - k,
        }
    }
}

impl DebugInvariants for WeightTable {
    fn validate_invariants(&self) -> Result<()> {
        let r = self.ratio as usize;
        ensure(self.weights.len() == r + 1, || {
            format!("table has {} entries, expected {}", self.weights.len(), r + 1)
        })?;
        for (k, &w) in self.weights.iter().enumerate() {
            ensure((0.0..=1.0).contains(&w), || format!("weight {w} at {k} outside [0, 1]"))?;
            let m = self.weights[self.mirror(k)];
            ensure((w + m - 1.0).abs() <= 4.0 * f64::EPSILON, || {
                format!("weights at {k} and {} are not complementary", self.mirror(k))
            })?;
        }
        if self.centering.is_primal() {
            ensure(self.weights.windows(2).all(|p| p[0] <= p[1]), || {
                "primal weights must be non-decreasing".into()
            })?;
        }
        Ok(())
    }
}
