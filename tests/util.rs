#![allow(dead_code)]
use amr_field::prelude::*;

/// Distinct value per global index, so misplaced copies show up.
pub fn tag<const D: usize>(idx: Index<D>) -> f64 {
    idx.iter()
        .enumerate()
        .map(|(dir, &i)| f64::from(i) * 1000f64.powi(dir as i32))
        .sum::<f64>()
        + 0.5
}

/// Field over a geometry's ghost box, every sample set by `f`.
pub fn field_on<const D: usize>(
    geom: &impl BoxGeometry<D>,
    f: impl FnMut(Index<D>) -> f64,
) -> Field<D> {
    Field::from_fn(geom.interior_box(), geom.ghost_box(), f).unwrap()
}

/// Brute-force overlap copy, one index at a time, for data living on
/// geometries with the given primal mask.
#[allow(clippy::too_many_arguments)]
pub fn reference_copy<const D: usize>(
    dst: &mut Field<D>,
    src: &Field<D>,
    primal: [bool; D],
    source_mask: &IndexBox<D>,
    fill_box: &IndexBox<D>,
    overwrite_interior: bool,
    t: &Transformation<D>,
) {
    let mask = source_mask.extend_upper(primal);
    let fill = fill_box.extend_upper(primal);
    let interior = *dst.interior_box();
    let ghost = *dst.ghost_box();
    for i in ghost.iter() {
        let from = t.inverse_transform(i);
        let readable = src.ghost_box().contains(&from) && mask.contains(&from);
        let writable = fill.contains(&i) && (overwrite_interior || !interior.contains(&i));
        if readable && writable {
            let v = *src.get(&from).unwrap();
            *dst.get_mut(&i).unwrap() = v;
        }
    }
}

/// Indices where two fields over the same box differ.
pub fn differences<const D: usize>(a: &Field<D>, b: &Field<D>) -> Vec<Index<D>> {
    assert_eq!(a.ghost_box(), b.ghost_box());
    a.iter()
        .zip(b.iter())
        .filter(|((_, x), (_, y))| x != y)
        .map(|((i, _), _)| i)
        .collect()
}

/// Every centering combination in `D` directions.
pub fn all_centerings<const D: usize>() -> Vec<[Centering; D]> {
    (0..1usize << D)
        .map(|bits| {
            std::array::from_fn(|dir| {
                if bits >> dir & 1 == 1 {
                    Centering::Primal
                } else {
                    Centering::Dual
                }
            })
        })
        .collect()
}
