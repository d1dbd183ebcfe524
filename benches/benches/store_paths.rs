// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::num::NonZeroUsize;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use widget_store::{Area, Point, Query, WidgetDraft, WidgetId, WidgetRepository, WidgetStore};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, bound: u64) -> i32 {
        (self.next_u64() % bound) as i32
    }
}

fn gen_random_drafts(count: usize, extent: u64, max_side: u64, seed: u64) -> Vec<WidgetDraft> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            WidgetDraft::new(
                rng.below(extent),
                rng.below(extent),
                1 + rng.below(max_side),
                1 + rng.below(max_side),
            )
        })
        .collect()
}

fn filled_store(drafts: &[WidgetDraft]) -> WidgetStore {
    let store = WidgetStore::new();
    for draft in drafts {
        let _ = store.insert(*draft);
    }
    store
}

fn bench_rectangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rectangle");
    for &n in &[1_000usize, 10_000, 50_000] {
        let store = filled_store(&gen_random_drafts(n, 10_000, 200, 0x5eed_0001));
        // Narrow in x so the x-ordered scan can stop early.
        let narrow = Area::new(Point::new(1_000, 0), Point::new(1_500, 10_000));
        let wide = Area::new(Point::new(0, 0), Point::new(10_000, 10_000));
        group.throughput(Throughput::Elements(n as u64));
        for (label, area) in [("narrow", narrow), ("wide", wide)] {
            group.bench_function(format!("ordered_{label}_n{n}"), |b| {
                b.iter(|| black_box(store.find_all(&Query::all().within(area)).len()));
            });
            group.bench_function(format!("spatial_{label}_n{n}"), |b| {
                b.iter(|| black_box(store.find_all_in_rectangle(area).len()));
            });
        }
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let n = 10_000usize;
    let store = filled_store(&gen_random_drafts(n, 10_000, 200, 0x5eed_0002));
    let mut rng = Rng::new(0x5eed_0003);
    let ids: Vec<WidgetId> = (0..1_024)
        .map(|_| WidgetId(1 + rng.next_u64() % n as u64))
        .collect();
    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function("find_by_id", |b| {
        b.iter(|| {
            let hits = ids
                .iter()
                .filter(|id| store.find_by_id(**id).is_some())
                .count();
            black_box(hits);
        });
    });
    let page = Query::from_parts(NonZeroUsize::new(50), NonZeroUsize::new(3), None, None);
    group.bench_function("page_3_of_50", |b| {
        b.iter(|| black_box(store.find_all(&page).len()));
    });
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000] {
        let drafts = gen_random_drafts(n, 10_000, 200, 0x5eed_0004);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("on_top_n{n}"), |b| {
            b.iter_batched(
                WidgetStore::new,
                |store| {
                    for draft in &drafts {
                        let _ = store.insert(*draft);
                    }
                    black_box(store.len());
                },
                BatchSize::SmallInput,
            )
        });
        // Every insert lands on z = 1 and pushes the whole stack up.
        group.bench_function(format!("shift_bottom_n{n}"), |b| {
            b.iter_batched(
                WidgetStore::new,
                |store| {
                    for draft in &drafts {
                        let _ = store.insert(draft.with_z_order(1));
                    }
                    black_box(store.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rectangle, bench_lookup, bench_insert);
criterion_main!(benches);
