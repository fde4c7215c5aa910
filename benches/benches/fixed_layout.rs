// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Size};
use understory_fixed_layout::{Margins, SpreadSurfaces, SurfaceMetrics, fit_spread};

fn page(width: f64, height: f64, edge: f64) -> Option<SurfaceMetrics> {
    Some(SurfaceMetrics {
        intrinsic_size: Size::new(width, height),
        margins: Margins::new(Insets::uniform(edge), Insets::uniform(1.0), Insets::ZERO),
    })
}

fn bench_fit_spread(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_fixed_layout");

    let book = Margins::new(Insets::ZERO, Insets::ZERO, Insets::uniform(12.0));
    let cases = [
        (
            "center",
            SpreadSurfaces {
                center: page(1200.0, 1600.0, 0.0),
                ..SpreadSurfaces::default()
            },
        ),
        (
            "dual_equal",
            SpreadSurfaces {
                left: page(800.0, 1200.0, 4.0),
                right: page(800.0, 1200.0, 4.0),
                center: None,
            },
        ),
        (
            "dual_normalized",
            SpreadSurfaces {
                left: page(800.0, 1200.0, 4.0),
                right: page(600.0, 900.0, 2.0),
                center: None,
            },
        ),
        (
            "right_only",
            SpreadSurfaces {
                right: page(800.0, 1200.0, 4.0),
                ..SpreadSurfaces::default()
            },
        ),
    ];

    for (name, surfaces) in cases {
        group.bench_function(format!("fit_spread({name})"), |b| {
            b.iter(|| {
                fit_spread(
                    black_box(Size::new(1920.0, 1080.0)),
                    black_box(&book),
                    black_box(&surfaces),
                )
            });
        });
    }

    // A window drag: many viewport sizes against the same spread.
    let surfaces = cases[1].1;
    group.bench_function("fit_spread(resize_sweep_256)", |b| {
        b.iter(|| {
            let mut scale_sum = 0.0;
            for step in 0..256_u32 {
                let w = 640.0 + f64::from(step) * 5.0;
                let h = 480.0 + f64::from(step) * 2.5;
                if let Some(layout) = fit_spread(Size::new(w, h), &book, &surfaces) {
                    scale_sum += layout.fit.scale;
                }
            }
            black_box(scale_sum)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fit_spread);
criterion_main!(benches);
