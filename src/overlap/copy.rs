//! Overlap-driven transfers between fields of the same resolution.
//!
//! Every transfer validates the whole overlap against both allocations before
//! the first write, so an error never leaves the destination half updated.

use crate::amr_error::{AmrFieldError, Result};
use crate::data::{Field, Storage};
use crate::geometry::IndexBox;
use crate::overlap::delta::{AddDelta, CopyDelta, Delta};
use crate::overlap::descriptor::OverlapDescriptor;
use crate::overlap::field_overlap::FieldOverlap;

fn check_ranges<const D: usize>(
    overlap: &FieldOverlap<D>,
    destination: &IndexBox<D>,
    source: &IndexBox<D>,
) -> Result<()> {
    for dst_box in overlap.destination_boxes() {
        if !destination.contains_box(dst_box) {
            return Err(AmrFieldError::DestinationOutOfRange {
                range: dst_box.to_string(),
                allocated: destination.to_string(),
            });
        }
        let src_box = overlap.transformation().inverse_transform_box(dst_box);
        if !source.contains_box(&src_box) {
            return Err(AmrFieldError::SourceOutOfRange {
                required: src_box.to_string(),
                allocated: source.to_string(),
            });
        }
    }
    Ok(())
}

/// Move every overlapped sample from `source` into `destination`, merging
/// with the fusion rule `Dl`: `dst[i] ⊕= src[i - t]`.
///
/// # Errors
/// `DestinationOutOfRange` if an overlap box escapes the destination ghost
/// box, `SourceOutOfRange` if its pre-image escapes the source ghost box.
pub fn transfer<Dl, const D: usize, V, Sd, Ss>(
    destination: &mut Field<D, V, Sd>,
    source: &Field<D, V, Ss>,
    overlap: &FieldOverlap<D>,
) -> Result<()>
where
    Dl: Delta<V>,
    Sd: Storage<V>,
    Ss: Storage<V>,
{
    if overlap.is_empty() {
        return Ok(());
    }
    check_ranges(overlap, destination.ghost_box(), source.ghost_box())?;

    log::trace!(
        "overlap transfer of {} samples in {} boxes",
        overlap.volume(),
        overlap.destination_boxes().len()
    );
    let t = overlap.transformation();
    for dst_box in overlap.destination_boxes() {
        for idx in dst_box.iter() {
            let from = source.offset_unchecked(&t.inverse_transform(idx));
            let part = Dl::restrict(&source.as_slice()[from]);
            let to = destination.offset_unchecked(&idx);
            Dl::fuse(&mut destination.as_mut_slice()[to], part);
        }
    }
    Ok(())
}

/// `dst[i] = src[i - t]` over the overlap. An empty overlap is a no-op.
pub fn copy<const D: usize, V, Sd, Ss>(
    destination: &mut Field<D, V, Sd>,
    source: &Field<D, V, Ss>,
    overlap: &FieldOverlap<D>,
) -> Result<()>
where
    V: Clone,
    Sd: Storage<V>,
    Ss: Storage<V>,
{
    transfer::<CopyDelta, D, V, Sd, Ss>(destination, source, overlap)
}

/// `dst[i] += src[i - t]` over the overlap.
pub fn accumulate<const D: usize, V, Sd, Ss>(
    destination: &mut Field<D, V, Sd>,
    source: &Field<D, V, Ss>,
    overlap: &FieldOverlap<D>,
) -> Result<()>
where
    V: std::ops::AddAssign + Copy,
    Sd: Storage<V>,
    Ss: Storage<V>,
{
    transfer::<AddDelta, D, V, Sd, Ss>(destination, source, overlap)
}

/// Resolve `descriptor` against the destination, then [`copy`].
pub fn copy_with_descriptor<const D: usize, V, Sd, Ss>(
    destination: &mut Field<D, V, Sd>,
    source: &Field<D, V, Ss>,
    descriptor: &OverlapDescriptor<D>,
) -> Result<()>
where
    V: Clone,
    Sd: Storage<V>,
    Ss: Storage<V>,
{
    let overlap = descriptor.resolve(destination.ghost_box(), destination.interior_box());
    copy(destination, source, &overlap)
}

/// Copy between two regions of the same field, e.g. a periodic image of a
/// patch onto its own ghosts.
///
/// All source values are gathered before any is written, so overlapping
/// source and destination regions behave as if copied from a snapshot.
pub fn copy_within<const D: usize, V, S>(
    field: &mut Field<D, V, S>,
    overlap: &FieldOverlap<D>,
) -> Result<()>
where
    V: Clone,
    S: Storage<V>,
{
    if overlap.is_empty() {
        return Ok(());
    }
    let allocated = *field.ghost_box();
    check_ranges(overlap, &allocated, &allocated)?;

    let t = overlap.transformation();
    let staged: Vec<V> = overlap
        .destination_boxes()
        .iter()
        .flat_map(|b| b.iter())
        .map(|idx| field.as_slice()[field.offset_unchecked(&t.inverse_transform(idx))].clone())
        .collect();

    log::trace!("self copy of {} staged samples", staged.len());
    let targets = overlap.destination_boxes().iter().flat_map(|b| b.iter());
    for (idx, value) in targets.zip(staged) {
        let to = field.offset_unchecked(&idx);
        field.as_mut_slice()[to] = value;
    }
    Ok(())
}
