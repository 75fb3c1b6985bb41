use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use amr_field::prelude::*;

fn bench_refine(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_refine");
    let config = LayoutConfig::new(1).expect("valid order");

    for &ratio in &[2i32, 4] {
        let centering = [Centering::Primal, Centering::Dual];
        let coarse_cells = IndexBox::new([0, 0], [31, 31]);
        let coarse = FieldGeometry::from_config(coarse_cells, centering, &config).expect("coarse");
        let mut src = coarse.allocate(0.0f64).expect("alloc");
        for (i, v) in src.as_mut_slice().iter_mut().enumerate() {
            *v = i as f64 * 1e-3;
        }

        let ratio = RefinementRatio::uniform(ratio).expect("ratio");
        let fine = FieldGeometry::from_config(coarse_cells.refine(&ratio), centering, &config)
            .expect("fine");
        let mut dst = fine.allocate(0.0f64).expect("alloc");
        let op = FieldLinearRefine::new(centering, ratio).expect("operator");
        let range = fine.interior_box();

        group.bench_with_input(
            BenchmarkId::new("2d_primal_dual", ratio.get(0)),
            &range,
            |b, range| {
                b.iter(|| {
                    op.refine(&mut dst, &src, range).expect("refine");
                    black_box(dst.as_slice()[0]);
                });
            },
        );
    }

    group.bench_function("weight_table_cache_hit", |b| {
        WeightTableCache::global()
            .get_or_build(Centering::Dual, 4)
            .expect("table");
        b.iter(|| {
            let t = WeightTableCache::global()
                .get_or_build(black_box(Centering::Dual), black_box(4))
                .expect("table");
            black_box(t.weight_for(7));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_refine);
criterion_main!(benches);
