//! Criterion benchmarks for corpus preparation.
//!
//! Run with: `cargo bench --bench batch_bench`
//!
//! ## Benchmarks
//!
//! 1. **Vocabulary build** — character counting and frequency ranking
//! 2. **Batch slicing** — truncate, shift, reshape, split for several layouts
//! 3. **Full preparation** — vocabulary + encode + batches

use charbatch::{compute_batches, Config, Corpus, CorpusBatcher, Vocabulary};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Repeat a short verse up to roughly `len` characters.
fn synthetic_corpus(len: usize) -> String {
    const VERSE: &str = "I miss the sweet Kanye, chop up the beats Kanye\n";
    VERSE.chars().cycle().take(len).collect()
}

// ============================================================================
// Benchmark: Vocabulary Build
// ============================================================================

fn bench_vocabulary(c: &mut Criterion) {
    let text = synthetic_corpus(100_000);
    c.bench_function("vocabulary_100k", |b| {
        b.iter(|| Vocabulary::from_text(black_box(&text)));
    });
}

// ============================================================================
// Benchmark: Batch Slicing
// ============================================================================

fn bench_compute_batches(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_batches");

    let text = synthetic_corpus(100_000);
    let vocab = Vocabulary::from_text(&text);
    let encoded = vocab.encode(&text).expect("corpus encodes");

    for (batch_size, sequence_length) in [(1, 50), (32, 5), (64, 100)] {
        group.bench_with_input(
            BenchmarkId::new("layout", format!("{batch_size}x{sequence_length}")),
            &(batch_size, sequence_length),
            |b, &(bs, sl)| {
                b.iter(|| {
                    compute_batches(black_box(&encoded), bs, sl).expect("compute_batches failed")
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Full Preparation
// ============================================================================

fn bench_prepare(c: &mut Criterion) {
    let corpus = Corpus::from_text(synthetic_corpus(100_000));
    c.bench_function("prepare_100k_32x5", |b| {
        b.iter(|| {
            CorpusBatcher::new(black_box(corpus.clone()), Config::default())
                .expect("prepare failed")
        });
    });
}

criterion_group!(benches, bench_vocabulary, bench_compute_batches, bench_prepare);
criterion_main!(benches);
