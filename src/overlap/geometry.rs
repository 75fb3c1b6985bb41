//! Patch geometries: how a patch's cell box maps to the index space of the
//! data living on it, and how two such geometries overlap.
//!
//! Masks and fill boxes passed to [`BoxGeometry::calculate_overlap`] are cell
//! boxes. Each geometry converts them into its own data space before
//! intersecting, so a field whose directions are all dual overlaps exactly
//! like cell data, and an all-primal field exactly like node data.

use crate::amr_error::{AmrFieldError, Result};
use crate::data::Field;
use crate::geometry::{IndexBox, Transformation};
use crate::layout::{Centering, LayoutConfig};
use crate::overlap::descriptor::OverlapDescriptor;
use crate::overlap::field_overlap::FieldOverlap;

/// A patch box, a ghost width and a cell → data box conversion.
pub trait BoxGeometry<const D: usize> {
    /// The patch's interior cells.
    fn patch_box(&self) -> &IndexBox<D>;

    /// Ghost cells on each side, per direction.
    fn ghosts(&self) -> [i32; D];

    /// Directions along which data sits on nodes.
    fn primal_mask(&self) -> [bool; D];

    /// Data indices covering the cells of `cell_box`.
    fn to_data_box(&self, cell_box: &IndexBox<D>) -> IndexBox<D> {
        cell_box.extend_upper(self.primal_mask())
    }

    /// Data indices owned by the patch.
    fn interior_box(&self) -> IndexBox<D> {
        self.to_data_box(self.patch_box())
    }

    /// Every data index allocated on the patch.
    fn ghost_box(&self) -> IndexBox<D> {
        self.to_data_box(&self.patch_box().grow(self.ghosts()))
    }

    /// A field shaped after this geometry, filled with `fill`.
    fn allocate<V: Clone>(&self, fill: V) -> Result<Field<D, V>>
    where
        Self: Sized,
    {
        Field::new(self.interior_box(), self.ghost_box(), fill)
    }

    /// Overlap of data held on `source` onto data held on `self`.
    ///
    /// The source range is `source.ghost_box() ∩ data(source_mask)`; it is
    /// shifted by `transformation`, then clipped by `data(fill_box)` and by
    /// this geometry's ghost box. Unless `overwrite_interior` is set, this
    /// geometry's interior box is removed from the result.
    fn calculate_overlap(
        &self,
        source: &dyn BoxGeometry<D>,
        source_mask: &IndexBox<D>,
        fill_box: &IndexBox<D>,
        overwrite_interior: bool,
        transformation: &Transformation<D>,
    ) -> FieldOverlap<D> {
        let source_range = source
            .ghost_box()
            .intersect(&source.to_data_box(source_mask));
        let descriptor = OverlapDescriptor::new(
            source_range,
            self.to_data_box(fill_box),
            *transformation,
            overwrite_interior,
        );
        descriptor.resolve(&self.ghost_box(), &self.interior_box())
    }
}

/// Geometry of a field with an arbitrary centering per direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldGeometry<const D: usize> {
    patch_box: IndexBox<D>,
    ghosts: [i32; D],
    centering: [Centering; D],
}

impl<const D: usize> FieldGeometry<D> {
    /// # Errors
    /// `InvalidGeometry` for an empty patch box or a negative ghost width.
    pub fn new(
        patch_box: IndexBox<D>,
        ghosts: [i32; D],
        centering: [Centering; D],
    ) -> Result<Self> {
        check_patch(&patch_box, &ghosts)?;
        Ok(Self {
            patch_box,
            ghosts,
            centering,
        })
    }

    /// Ghost width taken from the layout's interpolation order.
    pub fn from_config(
        patch_box: IndexBox<D>,
        centering: [Centering; D],
        config: &LayoutConfig,
    ) -> Result<Self> {
        config.validate()?;
        Self::new(patch_box, [config.ghost_width(); D], centering)
    }

    pub fn centering(&self) -> &[Centering; D] {
        &self.centering
    }
}

impl<const D: usize> BoxGeometry<D> for FieldGeometry<D> {
    fn patch_box(&self) -> &IndexBox<D> {
        &self.patch_box
    }

    fn ghosts(&self) -> [i32; D] {
        self.ghosts
    }

    fn primal_mask(&self) -> [bool; D] {
        Centering::primal_mask(&self.centering)
    }
}

/// Cell-centred data: dual in every direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGeometry<const D: usize> {
    patch_box: IndexBox<D>,
    ghosts: [i32; D],
}

impl<const D: usize> CellGeometry<D> {
    pub fn new(patch_box: IndexBox<D>, ghosts: [i32; D]) -> Result<Self> {
        check_patch(&patch_box, &ghosts)?;
        Ok(Self { patch_box, ghosts })
    }
}

impl<const D: usize> BoxGeometry<D> for CellGeometry<D> {
    fn patch_box(&self) -> &IndexBox<D> {
        &self.patch_box
    }

    fn ghosts(&self) -> [i32; D] {
        self.ghosts
    }

    fn primal_mask(&self) -> [bool; D] {
        [false; D]
    }
}

/// Node-centred data: primal in every direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeGeometry<const D: usize> {
    patch_box: IndexBox<D>,
    ghosts: [i32; D],
}

impl<const D: usize> NodeGeometry<D> {
    pub fn new(patch_box: IndexBox<D>, ghosts: [i32; D]) -> Result<Self> {
        check_patch(&patch_box, &ghosts)?;
        Ok(Self { patch_box, ghosts })
    }
}

impl<const D: usize> BoxGeometry<D> for NodeGeometry<D> {
    fn patch_box(&self) -> &IndexBox<D> {
        &self.patch_box
    }

    fn ghosts(&self) -> [i32; D] {
        self.ghosts
    }

    fn primal_mask(&self) -> [bool; D] {
        [true; D]
    }
}

fn check_patch<const D: usize>(patch_box: &IndexBox<D>, ghosts: &[i32; D]) -> Result<()> {
    if patch_box.is_empty() {
        return Err(AmrFieldError::InvalidGeometry("patch box is empty".into()));
    }
    if let Some(dir) = ghosts.iter().position(|&g| g < 0) {
        return Err(AmrFieldError::InvalidGeometry(format!(
            "negative ghost width {} in direction {dir}",
            ghosts[dir]
        )));
    }
    Ok(())
}
