//! Mask planning benchmarks
//!
//! Planning runs on every image after detection, so it should stay far
//! below detector latency even for dense cards.

use aadhaar_mask::{
    AadhaarMaskOptions, AadhaarMasker, BlockGrouper, ChunkOrder, MaskingPipeline, TextRegion,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A card-like layout: header lines, address lines, chunked and full numbers
fn sample_regions(lines: usize) -> Vec<TextRegion> {
    let mut regions = Vec::with_capacity(lines * 3);
    for i in 0..lines {
        let y = (i as i32) * 45;
        match i % 4 {
            0 => {
                regions.push(TextRegion::new("1234", (20, y), (80, y + 30), 0.8));
                regions.push(TextRegion::new("5678", (100, y + 2), (160, y + 32), 0.8));
                regions.push(TextRegion::new("9012", (180, y + 4), (240, y + 34), 0.8));
            }
            1 => regions.push(TextRegion::new("Address: 12 MG Road", (20, y), (320, y + 30), 0.6)),
            2 => regions.push(TextRegion::new("1234 5678 9012", (20, y), (320, y + 40), 0.9)),
            _ => regions.push(TextRegion::new("Government of India", (20, y), (300, y + 30), 0.9)),
        }
    }
    regions
}

fn bench_plan_regions(c: &mut Criterion) {
    let pipeline = MaskingPipeline::default();
    let mut group = c.benchmark_group("plan_regions");

    for lines in [8usize, 64, 512] {
        let regions = sample_regions(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &regions, |b, regions| {
            b.iter(|| pipeline.plan_regions(black_box(regions)))
        });
    }

    group.finish();
}

fn bench_chunk_order(c: &mut Criterion) {
    let regions = sample_regions(256);
    let mut group = c.benchmark_group("aadhaar_chunk_order");

    for order in [ChunkOrder::Spatial, ChunkOrder::Collection] {
        let options = AadhaarMaskOptions {
            chunk_order: order,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", order)),
            &options,
            |b, options| b.iter(|| AadhaarMasker::plan(black_box(&regions), options)),
        );
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let regions = sample_regions(512);
    c.bench_function("group_blocks_512_lines", |b| {
        b.iter(|| BlockGrouper::group(black_box(&regions), 30))
    });
}

criterion_group!(benches, bench_plan_regions, bench_chunk_order, bench_grouping);
criterion_main!(benches);
