//! Field: patch-local data over a ghost-inclusive index box.
//!
//! A `Field` couples two boxes with a flat [`Storage`] buffer:
//! - the *ghost box*, which is the allocated range and the only range that can
//!   be read or written;
//! - the *interior box*, the samples owned by the patch. Overlap transfers
//!   can be told to leave it alone.
//!
//! Indices are global (level-wide). The buffer is laid out with the first
//! direction fastest.

use crate::amr_error::{AmrFieldError, Result};
use crate::data::storage::{Storage, VecStorage};
use crate::debug_invariants::{DebugInvariants, ensure};
use crate::geometry::{Index, IndexBox};

/// Field values over `ghost_box`, backed by storage `S`.
#[derive(Clone, Debug)]
pub struct Field<const D: usize, V = f64, S = VecStorage<V>> {
    interior: IndexBox<D>,
    ghost_box: IndexBox<D>,
    strides: [usize; D],
    storage: S,
    _marker: std::marker::PhantomData<V>,
}

fn strides_of<const D: usize>(bx: &IndexBox<D>) -> [usize; D] {
    let mut strides = [1usize; D];
    for dir in 1..D {
        strides[dir] = strides[dir - 1] * bx.extent(dir - 1);
    }
    strides
}

fn check_boxes<const D: usize>(
    interior: &IndexBox<D>,
    ghost_box: &IndexBox<D>,
) -> Result<()> {
    if ghost_box.is_empty() {
        return Err(AmrFieldError::InvalidGeometry(
            "field ghost box must not be empty".into(),
        ));
    }
    if !ghost_box.contains_box(interior) {
        return Err(AmrFieldError::InvalidGeometry(format!(
            "interior {interior} is not inside ghost box {ghost_box}"
        )));
    }
    Ok(())
}

impl<const D: usize, V, S> Field<D, V, S>
where
    V: Clone,
    S: Storage<V>,
{
    /// Allocate a field over `ghost_box`, every sample set to `fill`.
    ///
    /// # Errors
    /// `InvalidGeometry` if `ghost_box` is empty or does not contain `interior`.
    pub fn new(interior: IndexBox<D>, ghost_box: IndexBox<D>, fill: V) -> Result<Self> {
        check_boxes(&interior, &ghost_box)?;
        let storage = S::with_len(ghost_box.volume(), fill);
        let field = Self {
            interior,
            ghost_box,
            strides: strides_of(&ghost_box),
            storage,
            _marker: std::marker::PhantomData,
        };
        field.debug_assert_invariants();
        Ok(field)
    }

    /// Wrap an existing buffer. Its length must equal the ghost-box volume.
    pub fn from_storage(
        interior: IndexBox<D>,
        ghost_box: IndexBox<D>,
        storage: S,
    ) -> Result<Self> {
        check_boxes(&interior, &ghost_box)?;
        if storage.len() != ghost_box.volume() {
            return Err(AmrFieldError::InvalidGeometry(format!(
                "buffer holds {} values but ghost box {ghost_box} needs {}",
                storage.len(),
                ghost_box.volume()
            )));
        }
        Ok(Self {
            interior,
            ghost_box,
            strides: strides_of(&ghost_box),
            storage,
            _marker: std::marker::PhantomData,
        })
    }

    /// Allocate and initialise every sample from its global index.
    pub fn from_fn(
        interior: IndexBox<D>,
        ghost_box: IndexBox<D>,
        mut f: impl FnMut(Index<D>) -> V,
    ) -> Result<Self> {
        // Box iteration order matches the buffer layout.
        let data: Vec<V> = ghost_box.iter().map(&mut f).collect();
        Self::from_storage(interior, ghost_box, S::from_vec(data))
    }

    /// Overwrite every allocated sample with `value`.
    pub fn fill(&mut self, value: V) {
        self.storage.fill(value);
    }

    /// Overwrite the samples of `bx ∩ ghost_box` with `value`.
    pub fn fill_box(&mut self, bx: &IndexBox<D>, value: V) {
        let clipped = bx.intersect(&self.ghost_box);
        for idx in clipped.iter() {
            let lin = self.offset_unchecked(&idx);
            self.storage.as_mut_slice()[lin] = value.clone();
        }
    }
}

impl<const D: usize, V, S: Storage<V>> Field<D, V, S> {
    /// The allocated (ghost-inclusive) box.
    #[inline]
    pub fn ghost_box(&self) -> &IndexBox<D> {
        &self.ghost_box
    }

    /// The patch-owned box.
    #[inline]
    pub fn interior_box(&self) -> &IndexBox<D> {
        &self.interior
    }

    /// Flat buffer offset of `index`, or `None` outside of the ghost box.
    #[inline]
    pub fn offset(&self, index: &Index<D>) -> Option<usize> {
        if self.ghost_box.contains(index) {
            Some(self.offset_unchecked(index))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn offset_unchecked(&self, index: &Index<D>) -> usize {
        let lower = self.ghost_box.lower();
        (0..D)
            .map(|dir| (index[dir] - lower[dir]) as usize * self.strides[dir])
            .sum()
    }

    #[inline]
    pub fn get(&self, index: &Index<D>) -> Option<&V> {
        self.offset(index).map(|lin| &self.storage.as_slice()[lin])
    }

    #[inline]
    pub fn get_mut(&mut self, index: &Index<D>) -> Option<&mut V> {
        let lin = self.offset(index)?;
        Some(&mut self.storage.as_mut_slice()[lin])
    }

    /// # Errors
    /// `IndexOutOfRange` outside of the ghost box.
    pub fn try_get(&self, index: &Index<D>) -> Result<&V> {
        let allocated = self.ghost_box;
        self.get(index).ok_or_else(|| AmrFieldError::IndexOutOfRange {
            index: format!("{index:?}"),
            allocated: allocated.to_string(),
        })
    }

    /// # Errors
    /// `IndexOutOfRange` outside of the ghost box.
    pub fn try_set(&mut self, index: &Index<D>, value: V) -> Result<()> {
        let allocated = self.ghost_box;
        let slot = self.get_mut(index).ok_or_else(|| AmrFieldError::IndexOutOfRange {
            index: format!("{index:?}"),
            allocated: allocated.to_string(),
        })?;
        *slot = value;
        Ok(())
    }

    /// `(index, value)` for every allocated sample, in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = (Index<D>, &V)> + '_ {
        self.ghost_box.iter().zip(self.storage.as_slice().iter())
    }

    #[inline]
    pub fn as_slice(&self) -> &[V] {
        self.storage.as_slice()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        self.storage.as_mut_slice()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<const D: usize, V, S: Storage<V>> DebugInvariants for Field<D, V, S> {
    fn validate_invariants(&self) -> Result<()> {
        ensure(!self.ghost_box.is_empty(), || "empty ghost box".into())?;
        ensure(self.ghost_box.contains_box(&self.interior), || {
            format!("interior {} escapes ghost box {}", self.interior, self.ghost_box)
        })?;
        ensure(self.storage.len() == self.ghost_box.volume(), || {
            format!(
                "buffer length {} != ghost box volume {}",
                self.storage.len(),
                self.ghost_box.volume()
            )
        })?;
        ensure(self.strides == strides_of(&self.ghost_box), || "stale strides".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_2d() -> Field<2> {
        let interior = IndexBox::new([0, 0], [3, 2]);
        Field::new(interior, interior.grow([1, 1]), 0.0).unwrap()
    }

    #[test]
    fn allocation_covers_ghost_box() {
        let f = field_2d();
        assert_eq!(f.as_slice().len(), 6 * 5);
        assert!(f.validate_invariants().is_ok());
        assert_eq!(f.offset(&[-1, -1]), Some(0));
        assert_eq!(f.offset(&[0, -1]), Some(1));
        assert_eq!(f.offset(&[-1, 0]), Some(6));
        assert_eq!(f.offset(&[5, 0]), None);
    }

    #[test]
    fn set_get_and_errors() {
        let mut f = field_2d();
        f.try_set(&[2, 3], 7.5).unwrap();
        assert_eq!(f.try_get(&[2, 3]), Ok(&7.5));
        assert!(matches!(
            f.try_set(&[2, 4], 1.0),
            Err(AmrFieldError::IndexOutOfRange { .. })
        ));
        assert!(f.try_get(&[-2, 0]).is_err());
    }

    #[test]
    fn rejects_interior_outside_ghosts() {
        let interior = IndexBox::new([0], [5]);
        let ghost = IndexBox::new([1], [6]);
        assert!(matches!(
            Field::<1>::new(interior, ghost, 0.0),
            Err(AmrFieldError::InvalidGeometry(_))
        ));
        assert!(Field::<1>::new(IndexBox::empty(), IndexBox::empty(), 0.0).is_err());
    }

    #[test]
    fn from_fn_matches_indices() {
        let interior = IndexBox::new([0, 0], [2, 2]);
        let f: Field<2> =
            Field::from_fn(interior, interior, |[i, j]| f64::from(10 * i + j)).unwrap();
        for (idx, v) in f.iter() {
            assert_eq!(*v, f64::from(10 * idx[0] + idx[1]));
        }
    }

    #[test]
    fn from_storage_checks_length() {
        let b = IndexBox::new([0], [3]);
        let ok = Field::<1, i32>::from_storage(b, b, VecStorage::from(vec![1, 2, 3, 4]));
        assert!(ok.is_ok());
        let bad = Field::<1, i32>::from_storage(b, b, VecStorage::from(vec![1, 2]));
        assert!(bad.is_err());
    }

    #[test]
    fn fill_box_clips_to_allocation() {
        let mut f = field_2d();
        f.fill_box(&IndexBox::new([3, 2], [10, 10]), 1.0);
        let ones = f.iter().filter(|(_, v)| **v == 1.0).count();
        assert_eq!(ones, 2 * 2);
    }
}
