// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for justified layout computation.
//!
//! Row packing runs on every container resize, so it sits on the resize
//! hot path; this measures recomputation cost for realistic list sizes.

use criterion::{criterion_group, criterion_main, Criterion};
use iced_gallery::gallery::justified::RowLayout;
use iced_gallery::media::{DocId, MediaItem};
use std::hint::black_box;

fn varied_items(count: usize) -> Vec<MediaItem> {
    (0..count)
        .map(|i| {
            // Deterministic mix of portrait, square, and landscape.
            let (w, h) = match i % 3 {
                0 => (1600, 900),
                1 => (800, 800),
                _ => (600, 900),
            };
            MediaItem::new(DocId::from(i as i64), format!("{i}.jpg"), format!("{i}.jpg"))
                .with_dimensions(w, h)
        })
        .collect()
}

fn bench_row_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("justified_layout");

    for count in [50, 500, 2000] {
        let items = varied_items(count);
        group.bench_function(format!("compute_{count}_items"), |b| {
            b.iter(|| RowLayout::compute(black_box(&items), black_box(1200.0)));
        });
    }

    let items = varied_items(500);
    let layout = RowLayout::compute(&items, 1200.0);
    group.bench_function("locate_mid_item", |b| {
        b.iter(|| layout.locate(black_box(250)));
    });

    group.finish();
}

criterion_group!(benches, bench_row_packing);
criterion_main!(benches);
