// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_spread::{PageSpread, ReadingDirection, Spine, SpineEntry, Spread};

fn entries(n: usize) -> impl Iterator<Item = SpineEntry> {
    (0..n).map(|i| {
        let entry = SpineEntry::new(format!("item{i}"), format!("item{i}.xhtml"));
        // Sprinkle in center pages so alternation restarts now and then.
        if i % 37 == 0 {
            entry.with_page_spread(PageSpread::Center)
        } else {
            entry
        }
    })
}

fn bench_spread(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_spread");
    group.sample_size(50);

    for &n in &[64_usize, 1_024] {
        group.bench_function(format!("spine_new(n={n})"), |b| {
            b.iter_batched(
                || entries(n).collect::<Vec<_>>(),
                |entries| black_box(Spine::new(ReadingDirection::LeftToRight, entries)),
                BatchSize::SmallInput,
            );
        });

        for direction in [ReadingDirection::LeftToRight, ReadingDirection::RightToLeft] {
            let Ok(spine) = Spine::new(direction, entries(n)) else {
                continue;
            };
            group.bench_function(format!("walk_next({direction:?},n={n})"), |b| {
                b.iter(|| {
                    let mut spread = Spread::new();
                    let mut spreads = 0_usize;
                    while spread.open_next(&spine) {
                        spreads += 1;
                    }
                    black_box(spreads)
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_spread);
criterion_main!(benches);
