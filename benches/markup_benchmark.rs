//! Benchmarks for escaping and section building.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use paratag::render::{entity, escape};
use paratag::{build_sections, MarkupOptions, Rect, Region, RegionTag};

fn sample_text(repeat: usize) -> String {
    "Résumé: <b>x ≤ y</b> & <i>α → β</i> <br> AT&T &copy; "
        .repeat(repeat)
}

fn sample_regions(count: usize) -> Vec<Region> {
    let tags = [
        RegionTag::H1,
        RegionTag::P,
        RegionTag::H2,
        RegionTag::P,
        RegionTag::Li,
        RegionTag::H3,
        RegionTag::P,
    ];
    (0..count)
        .map(|i| {
            Region::new(
                format!("p1_r{}", i + 1),
                Rect::new(0.0, i as f32 * 12.0, 500.0, i as f32 * 12.0 + 10.0),
                sample_text(2),
            )
            .with_tag(tags[i % tags.len()])
        })
        .collect()
}

fn bench_escape(c: &mut Criterion) {
    let text = sample_text(50);

    c.bench_function("transcode", |b| {
        b.iter(|| entity::transcode(black_box(&text)))
    });

    c.bench_function("escape", |b| {
        let transcoded = entity::transcode(&text);
        b.iter(|| escape::escape(black_box(&transcoded)))
    });
}

fn bench_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_sections");
    let options = MarkupOptions::default();

    for count in [10, 100, 1000] {
        let regions = sample_regions(count);
        group.bench_function(format!("{}_regions", count), |b| {
            b.iter(|| build_sections(0, black_box(&regions), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_escape, bench_sections);
criterion_main!(benches);
