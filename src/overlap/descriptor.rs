//! The geometric request behind one data transfer.

use serde::{Deserialize, Serialize};

use crate::geometry::{IndexBox, Transformation};
use crate::overlap::field_overlap::FieldOverlap;

/// Source range, fill range, translation and interior policy of a transfer,
/// all in the data index space of the quantity being moved.
///
/// Built fresh by the caller for every transfer and consumed by
/// [`resolve`](Self::resolve); it never outlives the copy it describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapDescriptor<const D: usize> {
    /// Samples that may be read, in source indices.
    pub source_range: IndexBox<D>,
    /// Samples that may be written, in destination indices.
    pub fill_range: IndexBox<D>,
    /// Source → destination translation (zero or a periodic shift).
    pub transformation: Transformation<D>,
    /// When false, the destination interior is left untouched.
    pub overwrite_interior: bool,
}

impl<const D: usize> OverlapDescriptor<D> {
    pub fn new(
        source_range: IndexBox<D>,
        fill_range: IndexBox<D>,
        transformation: Transformation<D>,
        overwrite_interior: bool,
    ) -> Self {
        Self {
            source_range,
            fill_range,
            transformation,
            overwrite_interior,
        }
    }

    /// Same-image transfer of `range` onto itself.
    pub fn same_image(range: IndexBox<D>, overwrite_interior: bool) -> Self {
        Self::new(range, range, Transformation::identity(), overwrite_interior)
    }

    /// Resolve against a destination allocation.
    ///
    /// The written region is `shift(source_range) ∩ fill_range ∩
    /// destination_ghost_box`, minus `destination_interior` unless interior
    /// overwrites are allowed.
    pub fn resolve(
        &self,
        destination_ghost_box: &IndexBox<D>,
        destination_interior: &IndexBox<D>,
    ) -> FieldOverlap<D> {
        let together = self
            .transformation
            .transform_box(&self.source_range)
            .intersect(&self.fill_range)
            .intersect(destination_ghost_box);

        let boxes = if together.is_empty() {
            Vec::new()
        } else if self.overwrite_interior {
            vec![together]
        } else {
            together.remove(destination_interior)
        };

        if boxes.is_empty() {
            log::debug!(
                "overlap of {} (shift {:?}) with fill {} is empty",
                self.source_range,
                self.transformation.offset(),
                self.fill_range
            );
        }
        FieldOverlap::new(boxes, self.transformation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_three_boxes() {
        let d = OverlapDescriptor::new(
            IndexBox::new([0], [9]),
            IndexBox::new([4], [20]),
            Transformation::new([2]),
            true,
        );
        let o = d.resolve(&IndexBox::new([-2], [8]), &IndexBox::new([0], [6]));
        assert_eq!(o.destination_boxes(), &[IndexBox::new([4], [8])]);
    }

    #[test]
    fn interior_is_carved_out() {
        let d = OverlapDescriptor::same_image(IndexBox::new([-2, -2], [7, 7]), false);
        let interior = IndexBox::new([0, 0], [5, 5]);
        let o = d.resolve(&IndexBox::new([-2, -2], [7, 7]), &interior);
        let touched: usize = o.destination_boxes().iter().map(|b| b.volume()).sum();
        assert_eq!(touched, 100 - 36);
        assert!(o.destination_boxes().iter().all(|b| b.intersect(&interior).is_empty()));
    }

    #[test]
    fn disjoint_ranges_resolve_to_nothing() {
        let d = OverlapDescriptor::new(
            IndexBox::new([0], [3]),
            IndexBox::new([10], [12]),
            Transformation::identity(),
            true,
        );
        assert!(d.resolve(&IndexBox::new([0], [20]), &IndexBox::new([1], [19])).is_empty());
    }
}
