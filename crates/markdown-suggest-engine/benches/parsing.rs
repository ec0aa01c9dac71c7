use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_suggest_engine::parsing::{parse, parse_threads};
use pulldown_cmark::Parser;
mod common;

fn bench_full_reparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    for size in [10, 100, 1000] {
        let content = common::generate_marked_up_content(size);
        group.bench_with_input(BenchmarkId::new("parse", size), &content, |b, content| {
            b.iter(|| {
                let ranges = parse(std::hint::black_box(content));
                let threads = parse_threads(&ranges);
                std::hint::black_box((ranges, threads));
            });
        });
    }

    let plain = common::generate_plain_content(1000);
    group.bench_function("parse_no_markup", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(&plain))));
    });

    group.finish();
}

fn bench_pulldown_cmark_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_marked_up_content(100);
    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| {
            let parser = Parser::new(std::hint::black_box(&content));
            let events: Vec<_> = parser.collect();
            std::hint::black_box(events);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_full_reparse, bench_pulldown_cmark_baseline);
criterion_main!(benches);
