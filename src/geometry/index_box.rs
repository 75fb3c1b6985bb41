//! `IndexBox`: an inclusive, axis-aligned range of integer indices.
//!
//! Boxes follow the structured-AMR convention: both `lower` and `upper` are
//! part of the box, and a box is empty as soon as `upper < lower` along any
//! direction. All indices are global (level-wide) indices, so boxes from two
//! patches on the same level can be intersected directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Index;
use crate::layout::ratio::RefinementRatio;

/// Inclusive box `[lower, upper]` in a `D`-dimensional index space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexBox<const D: usize> {
    #[serde(with = "serde_array")]
    lower: Index<D>,
    #[serde(with = "serde_array")]
    upper: Index<D>,
}

impl<const D: usize> IndexBox<D> {
    /// Box spanning `lower..=upper`. No validation: an inverted range is simply empty.
    #[inline]
    pub const fn new(lower: Index<D>, upper: Index<D>) -> Self {
        Self { lower, upper }
    }

    /// The canonical empty box.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            lower: [0; D],
            upper: [-1; D],
        }
    }

    #[inline]
    pub fn lower(&self) -> Index<D> {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> Index<D> {
        self.upper
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..D).any(|dir| self.upper[dir] < self.lower[dir])
    }

    /// Number of indices along `dir` (0 for an empty box).
    #[inline]
    pub fn extent(&self, dir: usize) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.upper[dir] - self.lower[dir] + 1) as usize
        }
    }

    /// Number of indices along every direction.
    pub fn shape(&self) -> [usize; D] {
        std::array::from_fn(|dir| self.extent(dir))
    }

    /// Total number of indices in the box.
    pub fn volume(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (0..D).map(|dir| self.extent(dir)).product()
    }

    #[inline]
    pub fn contains(&self, index: &Index<D>) -> bool {
        (0..D).all(|dir| self.lower[dir] <= index[dir] && index[dir] <= self.upper[dir])
    }

    /// True if every index of `other` lies in `self`. The empty box is
    /// contained in every box.
    pub fn contains_box(&self, other: &IndexBox<D>) -> bool {
        other.is_empty() || (self.contains(&other.lower) && self.contains(&other.upper))
    }

    /// Intersection of two boxes; possibly empty.
    pub fn intersect(&self, other: &IndexBox<D>) -> IndexBox<D> {
        let lower = std::array::from_fn(|dir| self.lower[dir].max(other.lower[dir]));
        let upper = std::array::from_fn(|dir| self.upper[dir].min(other.upper[dir]));
        let b = IndexBox::new(lower, upper);
        if b.is_empty() { IndexBox::empty() } else { b }
    }

    /// Grow by `width[dir]` indices on both sides of every direction.
    pub fn grow(&self, width: [i32; D]) -> IndexBox<D> {
        if self.is_empty() {
            return *self;
        }
        IndexBox::new(
            std::array::from_fn(|dir| self.lower[dir] - width[dir]),
            std::array::from_fn(|dir| self.upper[dir] + width[dir]),
        )
    }

    /// Translate by `offset`.
    pub fn shift(&self, offset: Index<D>) -> IndexBox<D> {
        if self.is_empty() {
            return *self;
        }
        IndexBox::new(
            std::array::from_fn(|dir| self.lower[dir] + offset[dir]),
            std::array::from_fn(|dir| self.upper[dir] + offset[dir]),
        )
    }

    /// Extend the upper bound by one along each direction flagged in `mask`.
    ///
    /// A cell box covering cells `l..=u` has nodes `l..=u+1`; this is the
    /// per-direction cell → node conversion.
    pub fn extend_upper(&self, mask: [bool; D]) -> IndexBox<D> {
        if self.is_empty() {
            return *self;
        }
        IndexBox::new(
            self.lower,
            std::array::from_fn(|dir| self.upper[dir] + i32::from(mask[dir])),
        )
    }

    /// The fine cell box covering the same region as this coarse cell box.
    pub fn refine(&self, ratio: &RefinementRatio<D>) -> IndexBox<D> {
        if self.is_empty() {
            return *self;
        }
        let r = ratio.as_array();
        IndexBox::new(
            std::array::from_fn(|dir| self.lower[dir] * r[dir]),
            std::array::from_fn(|dir| (self.upper[dir] + 1) * r[dir] - 1),
        )
    }

    /// `self \ other` as a list of disjoint, non-empty boxes.
    ///
    /// The remainder is peeled one direction at a time: along each direction
    /// the slabs below and above `other` are emitted, then the working box is
    /// clipped to `other`'s extent in that direction before moving on.
    pub fn remove(&self, other: &IndexBox<D>) -> Vec<IndexBox<D>> {
        if self.is_empty() {
            return Vec::new();
        }
        let overlap = self.intersect(other);
        if overlap.is_empty() {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2 * D);
        let mut rest = *self;
        for dir in 0..D {
            if rest.lower[dir] < overlap.lower[dir] {
                let mut below = rest;
                below.upper[dir] = overlap.lower[dir] - 1;
                pieces.push(below);
                rest.lower[dir] = overlap.lower[dir];
            }
            if rest.upper[dir] > overlap.upper[dir] {
                let mut above = rest;
                above.lower[dir] = overlap.upper[dir] + 1;
                pieces.push(above);
                rest.upper[dir] = overlap.upper[dir];
            }
        }
        pieces
    }

    /// Iterate every index of the box, first direction fastest.
    pub fn iter(&self) -> BoxIndices<D> {
        BoxIndices {
            bx: *self,
            cursor: if self.is_empty() { None } else { Some(self.lower) },
        }
    }
}

impl<const D: usize> Default for IndexBox<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const D: usize> fmt::Debug for IndexBox<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexBox{self}")
    }
}

impl<const D: usize> fmt::Display for IndexBox<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[empty]");
        }
        write!(f, "[{:?}..={:?}]", self.lower, self.upper)
    }
}

impl<'a, const D: usize> IntoIterator for &'a IndexBox<D> {
    type Item = Index<D>;
    type IntoIter = BoxIndices<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the indices of an [`IndexBox`], first direction fastest.
#[derive(Clone, Debug)]
pub struct BoxIndices<const D: usize> {
    bx: IndexBox<D>,
    cursor: Option<Index<D>>,
}

impl<const D: usize> Iterator for BoxIndices<D> {
    type Item = Index<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;

        let mut next = current;
        let mut done = true;
        for dir in 0..D {
            if next[dir] < self.bx.upper[dir] {
                next[dir] += 1;
                done = false;
                break;
            }
            next[dir] = self.bx.lower[dir];
        }
        self.cursor = if done { None } else { Some(next) };

        Some(current)
    }
}

/// serde has no blanket impls for `[T; N]` with a generic `N`, so indices go
/// through a plain sequence.
pub(crate) mod serde_array {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer, const D: usize>(
        index: &[i32; D],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        index.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, De: Deserializer<'de>, const D: usize>(
        deserializer: De,
    ) -> Result<[i32; D], De::Error> {
        let v = Vec::<i32>::deserialize(deserializer)?;
        let found = v.len();
        v.try_into()
            .map_err(|_| De::Error::custom(format!("expected {D} components, found {found}")))
    }
}
