//! A resolved overlap: the destination boxes a transfer writes.

use crate::geometry::{IndexBox, Transformation};

/// Explicit list of disjoint destination boxes plus the translation that maps
/// source indices onto them.
///
/// This is a plain value computed before any data is touched; it holds no
/// reference into either field, so source and destination may share storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldOverlap<const D: usize> {
    destination_boxes: Vec<IndexBox<D>>,
    transformation: Transformation<D>,
}

impl<const D: usize> FieldOverlap<D> {
    /// Empty boxes are dropped.
    pub fn new(boxes: Vec<IndexBox<D>>, transformation: Transformation<D>) -> Self {
        let destination_boxes = boxes.into_iter().filter(|b| !b.is_empty()).collect();
        Self {
            destination_boxes,
            transformation,
        }
    }

    #[inline]
    pub fn destination_boxes(&self) -> &[IndexBox<D>] {
        &self.destination_boxes
    }

    #[inline]
    pub fn transformation(&self) -> &Transformation<D> {
        &self.transformation
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.destination_boxes.is_empty()
    }

    /// Number of destination samples written.
    pub fn volume(&self) -> usize {
        self.destination_boxes.iter().map(IndexBox::volume).sum()
    }

    /// Source boxes read, one per destination box.
    pub fn source_boxes(&self) -> impl Iterator<Item = IndexBox<D>> + '_ {
        self.destination_boxes
            .iter()
            .map(|b| self.transformation.inverse_transform_box(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_boxes_and_maps_sources() {
        let o = FieldOverlap::new(
            vec![IndexBox::empty(), IndexBox::new([3, 3], [4, 5])],
            Transformation::new([10, 0]),
        );
        assert_eq!(o.destination_boxes().len(), 1);
        assert_eq!(o.volume(), 6);
        let src: Vec<_> = o.source_boxes().collect();
        assert_eq!(src, vec![IndexBox::new([-7, 3], [-6, 5])]);
    }
}
