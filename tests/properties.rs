//! Property checks for the index laws, box algebra and overlap copies.

mod util;

use amr_field::prelude::*;
use proptest::prelude::*;

fn centering() -> impl Strategy<Value = Centering> {
    prop_oneof![Just(Centering::Primal), Just(Centering::Dual)]
}

fn box_2d() -> impl Strategy<Value = IndexBox<2>> {
    (-8i32..8, -8i32..8, 0i32..8, 0i32..8)
        .prop_map(|(x, y, w, h)| IndexBox::new([x, y], [x + w, y + h]))
}

proptest! {
    #[test]
    fn primal_start_and_weight_index(r in 1i32..20, f in -200i32..200) {
        let t = WeightTable::new(Centering::Primal, r).unwrap();
        prop_assert_eq!(t.start_index(f), f.div_euclid(r));
        prop_assert_eq!(t.weight_index(f) as i32, f.rem_euclid(r));
        prop_assert_eq!(t.start_index(f + r), t.start_index(f) + 1);
    }

    #[test]
    fn weight_index_is_periodic(c in centering(), r in 1i32..20, f in -200i32..200) {
        let t = WeightTable::new(c, r).unwrap();
        prop_assert_eq!(t.weight_index(f), t.weight_index(f + r));
        prop_assert_eq!(t.start_index(f + r), t.start_index(f) + 1);
        prop_assert!(t.weight_index(f) < r as usize);
    }

    #[test]
    fn weights_locate_the_fine_sample(c in centering(), r in 1i32..20, f in -200i32..200) {
        // x(fine) = (1 - w) x(start) + w x(start + 1), in coarse units
        let t = WeightTable::new(c, r).unwrap();
        let half = if c.is_primal() { 0.0 } else { 0.5 };
        let x = (f64::from(f) + half) / f64::from(r);
        let s = f64::from(t.start_index(f)) + half;
        let w = t.weight_for(f);
        prop_assert!((0.0..=1.0).contains(&w));
        prop_assert!((s + w - x).abs() < 1e-12);
    }

    #[test]
    fn start_index_is_monotone(c in centering(), r in 1i32..20, f in -200i32..200) {
        let t = WeightTable::new(c, r).unwrap();
        let step = t.start_index(f + 1) - t.start_index(f);
        prop_assert!(step == 0 || step == 1);
    }

    #[test]
    fn remove_partitions_the_difference(a in box_2d(), b in box_2d()) {
        let pieces = a.remove(&b);
        let total: usize = pieces.iter().map(|p| p.volume()).sum();
        prop_assert_eq!(total, a.volume() - a.intersect(&b).volume());
        for idx in a.iter() {
            let hits = pieces.iter().filter(|p| p.contains(&idx)).count();
            prop_assert_eq!(hits, usize::from(!b.contains(&idx)));
        }
    }

    #[test]
    fn intersection_is_contained_in_both(a in box_2d(), b in box_2d()) {
        let i = a.intersect(&b);
        prop_assert!(a.contains_box(&i) && b.contains_box(&i));
        prop_assert_eq!(i, b.intersect(&a));
    }

    #[test]
    fn self_copy_is_idempotent(
        patch in box_2d(),
        cx in centering(),
        cy in centering(),
        order in 1u8..=3,
    ) {
        let g = FieldGeometry::from_config(patch, [cx, cy], &LayoutConfig::new(order).unwrap()).unwrap();
        let mut f = util::field_on(&g, util::tag);
        let before = f.clone();
        let overlap = g.calculate_overlap(
            &g,
            &patch.grow(g.ghosts()),
            &patch.grow(g.ghosts()),
            true,
            &Transformation::identity(),
        );
        copy_within(&mut f, &overlap).unwrap();
        prop_assert!(util::differences(&f, &before).is_empty());
    }

    #[test]
    fn overlap_copy_matches_brute_force(
        dst_patch in box_2d(),
        src_patch in box_2d(),
        mask in box_2d(),
        fill in box_2d(),
        cx in centering(),
        cy in centering(),
        shift in (-6i32..6, -6i32..6),
        overwrite in any::<bool>(),
    ) {
        let dst_geom = FieldGeometry::new(dst_patch, [1, 2], [cx, cy]).unwrap();
        let src_geom = FieldGeometry::new(src_patch, [2, 1], [cx, cy]).unwrap();
        let t = Transformation::new([shift.0, shift.1]);
        let overlap = dst_geom.calculate_overlap(&src_geom, &mask, &fill, overwrite, &t);

        let src = util::field_on(&src_geom, util::tag);
        let mut got = dst_geom.allocate(0.0).unwrap();
        copy(&mut got, &src, &overlap).unwrap();

        let mut want = dst_geom.allocate(0.0).unwrap();
        let primal = Centering::primal_mask(&[cx, cy]);
        util::reference_copy(&mut want, &src, primal, &mask, &fill, overwrite, &t);
        prop_assert!(util::differences(&got, &want).is_empty());
    }
}
