//! Translation-only box transformation, used for periodic images.

use serde::{Deserialize, Serialize};

use crate::amr_error::{AmrFieldError, Result};
use crate::geometry::index_box::{IndexBox, serde_array};
use crate::geometry::Index;

/// Maps source indices to destination indices by a constant integer offset.
///
/// The zero offset is the same-image transfer; a periodic image uses plus or
/// minus the domain length along the wrapped direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformation<const D: usize> {
    #[serde(with = "serde_array")]
    offset: Index<D>,
}

impl<const D: usize> Transformation<D> {
    #[inline]
    pub const fn new(offset: Index<D>) -> Self {
        Self { offset }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self { offset: [0; D] }
    }

    /// Shift by one period of `domain` along `direction`, towards increasing
    /// indices when `positive` is set.
    ///
    /// # Errors
    /// `InvalidGeometry` if `domain` is empty or `direction >= D`.
    pub fn periodic(
        domain: &IndexBox<D>,
        direction: usize,
        positive: bool,
    ) -> Result<Self> {
        if direction >= D {
            return Err(AmrFieldError::InvalidGeometry(format!(
                "periodic direction {direction} out of range for dimension {D}"
            )));
        }
        if domain.is_empty() {
            return Err(AmrFieldError::InvalidGeometry(
                "periodic shift requires a non-empty domain".into(),
            ));
        }
        let length = domain.extent(direction) as i32;
        let mut offset = [0; D];
        offset[direction] = if positive { length } else { -length };
        Ok(Self { offset })
    }

    #[inline]
    pub fn offset(&self) -> Index<D> {
        self.offset
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.offset.iter().all(|&o| o == 0)
    }

    /// Source index → destination index.
    #[inline]
    pub fn transform(&self, index: Index<D>) -> Index<D> {
        std::array::from_fn(|dir| index[dir] + self.offset[dir])
    }

    /// Destination index → source index.
    #[inline]
    pub fn inverse_transform(&self, index: Index<D>) -> Index<D> {
        std::array::from_fn(|dir| index[dir] - self.offset[dir])
    }

    pub fn transform_box(&self, bx: &IndexBox<D>) -> IndexBox<D> {
        bx.shift(self.offset)
    }

    pub fn inverse_transform_box(&self, bx: &IndexBox<D>) -> IndexBox<D> {
        bx.shift(self.offset.map(|o| -o))
    }
}

impl<const D: usize> Default for Transformation<D> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_shift_is_domain_length() {
        let domain = IndexBox::new([0, 0], [9, 4]);
        let t = Transformation::periodic(&domain, 1, false).unwrap();
        assert_eq!(t.offset(), [0, -5]);
        assert_eq!(t.transform([3, 4]), [3, -1]);
        assert_eq!(t.inverse_transform(t.transform([3, 4])), [3, 4]);
    }

    #[test]
    fn periodic_rejects_bad_direction() {
        let domain = IndexBox::new([0], [9]);
        assert!(matches!(
            Transformation::periodic(&domain, 1, true),
            Err(AmrFieldError::InvalidGeometry(_))
        ));
        assert!(Transformation::periodic(&IndexBox::<1>::empty(), 0, true).is_err());
    }

    #[test]
    fn boxes_round_trip() {
        let t = Transformation::new([4, -2]);
        let b = IndexBox::new([0, 0], [2, 2]);
        assert_eq!(t.inverse_transform_box(&t.transform_box(&b)), b);
        assert!(Transformation::<3>::identity().is_identity());
    }

    #[test]
    fn serializes_as_plain_offset() {
        let t = Transformation::new([-16, 0, 3]);
        let s = serde_json::to_string(&t).unwrap();
        assert_eq!(s, r#"{"offset":[-16,0,3]}"#);
        let back: Transformation<3> = serde_json::from_str(&s).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<Transformation<2>>(&s).is_err());
    }
}
