use criterion::{criterion_group, criterion_main, Criterion};

use pagekit::{render_initial, PageDocument, RenderConfig};

const LANDING: &str = include_str!("../tests/fixtures/landing.json");

fn bench_parse_document(c: &mut Criterion) {
    c.bench_function("parse_landing_document", |b| {
        b.iter(|| PageDocument::from_json_str(LANDING).unwrap())
    });
}

fn bench_render_html(c: &mut Criterion) {
    let doc = PageDocument::from_json_str(LANDING).unwrap();
    let config = RenderConfig::default();

    c.bench_function("render_landing_tree", |b| {
        b.iter(|| render_initial(&doc, &config))
    });

    let page = render_initial(&doc, &config);
    c.bench_function("serialize_landing_html", |b| b.iter(|| page.to_html()));
}

criterion_group!(benches, bench_parse_document, bench_render_html);
criterion_main!(benches);
