use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motif_core::{compile, scan, Annotator, LayoutConfig, MotifSet};

fn generate_test_sequence(length: usize) -> Vec<u8> {
    let pattern = b"ttgcatgAGCTGCTGCAU";
    let mut sequence = Vec::with_capacity(length);

    while sequence.len() < length {
        let remaining = length - sequence.len();
        let chunk_size = std::cmp::min(pattern.len(), remaining);
        sequence.extend_from_slice(&pattern[..chunk_size]);
    }

    sequence
}

fn bench_scan(c: &mut Criterion) {
    let sequence = generate_test_sequence(5000);
    let exact = compile("GCATG").unwrap();
    let degenerate = compile("YGCY").unwrap();
    let wide = compile("NNNNNN").unwrap();

    c.bench_function("scan_exact_5kb", |b| {
        b.iter(|| black_box(scan(&exact, black_box(&sequence))))
    });
    c.bench_function("scan_degenerate_5kb", |b| {
        b.iter(|| black_box(scan(&degenerate, black_box(&sequence))))
    });
    c.bench_function("scan_all_n_5kb", |b| {
        b.iter(|| black_box(scan(&wide, black_box(&sequence))))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let motifs = MotifSet::compile(["ygcy", "GCAUG", "catag", "YYYYYYYYYY"]).unwrap();
    let annotator = Annotator::new(motifs, LayoutConfig::default());
    let inputs: Vec<(String, Vec<u8>)> = (0..10)
        .map(|i| (format!("seq{}", i), generate_test_sequence(1000)))
        .collect();

    c.bench_function("annotate_10x1kb", |b| {
        b.iter(|| black_box(annotator.annotate(inputs.clone(), None)))
    });
}

criterion_group!(benches, bench_scan, bench_pipeline);
criterion_main!(benches);
