//! Resolver lookup benchmarks.
//!
//! A lookup picks the line's records directly and binary-searches within the line, so
//! time per lookup should stay flat as the buffer grows.
//!
//! Run with: cargo bench --bench resolve

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hexmark::index::{DisplayCoord, PositionIndex};
use hexmark::layout::{build_lines, GroupingSize, LayoutConfig};
use hexmark::model::ByteBuffer;

fn build_index(len: usize, grouping: GroupingSize) -> PositionIndex {
    let buffer = ByteBuffer::from(vec![0x5Au8; len]);
    let lines = build_lines(&buffer, LayoutConfig::new(grouping));
    PositionIndex::build(&lines, grouping)
}

/// Lookups spread across the buffer, for increasing buffer sizes.
fn benchmark_resolve_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_hex_scaling");

    for len in [4_096, 1 << 20, 16 << 20] {
        let index = build_index(len, GroupingSize::Two);
        let last = index.line_count().saturating_sub(1);
        let coords = [
            DisplayCoord::new(0, 0),
            DisplayCoord::new(last / 4, 17),
            DisplayCoord::new(last / 2, 42),
            DisplayCoord::new(last * 3 / 4, 63),
            DisplayCoord::new(last, 79),
        ];

        group.bench_with_input(BenchmarkId::new("resolve_hex", len), &index, |b, index| {
            b.iter(|| {
                for &coord in &coords {
                    black_box(index.resolve_hex(black_box(coord)));
                }
            });
        });
    }

    group.finish();
}

/// Single lookups per grouping size on a 1 MiB buffer.
fn benchmark_resolve_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_by_grouping_1mib");

    for grouping in [GroupingSize::One, GroupingSize::Two, GroupingSize::Four] {
        let index = build_index(1 << 20, grouping);
        let coord = DisplayCoord::new(index.line_count() / 2, 40);
        group.bench_with_input(
            BenchmarkId::new("grouping", u8::from(grouping)),
            &index,
            |b, index| {
                b.iter(|| {
                    (
                        index.resolve_hex(black_box(coord)),
                        index.resolve_ascii(black_box(coord)),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_resolve_scaling,
    benchmark_resolve_grouping
);
criterion_main!(benches);
