use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use amr_field::prelude::*;

fn bench_overlap_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_copy");

    for &order in &[1u8, 3] {
        let config = LayoutConfig::new(order).expect("valid order");
        let centering = [Centering::Dual, Centering::Primal, Centering::Dual];
        let dst_geom =
            FieldGeometry::from_config(IndexBox::new([0; 3], [31; 3]), centering, &config)
                .expect("dst");
        let src_geom =
            FieldGeometry::from_config(IndexBox::new([32, 0, 0], [63, 31, 31]), centering, &config)
                .expect("src");
        let src = src_geom.allocate(1.0f64).expect("alloc");
        let mut dst = dst_geom.allocate(0.0f64).expect("alloc");

        let fill = dst_geom.patch_box().grow(dst_geom.ghosts());
        let identity = Transformation::identity();

        group.bench_with_input(BenchmarkId::new("resolve", order), &order, |b, _| {
            b.iter(|| {
                let o = dst_geom.calculate_overlap(&src_geom, src_geom.patch_box(), &fill, false, &identity);
                black_box(o.volume());
            });
        });

        let overlap =
            dst_geom.calculate_overlap(&src_geom, src_geom.patch_box(), &fill, false, &identity);
        group.bench_with_input(BenchmarkId::new("ghost_fill", order), &order, |b, _| {
            b.iter(|| {
                copy(&mut dst, &src, &overlap).expect("copy");
            });
        });

        let self_overlap = OverlapDescriptor::same_image(dst_geom.ghost_box(), true)
            .resolve(&dst_geom.ghost_box(), &dst_geom.interior_box());
        group.bench_with_input(BenchmarkId::new("self_copy", order), &order, |b, _| {
            b.iter(|| {
                copy_within(&mut dst, &self_overlap).expect("self copy");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_overlap_copy);
criterion_main!(benches);
