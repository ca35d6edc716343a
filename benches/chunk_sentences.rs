use criterion::{black_box, criterion_group, criterion_main, Criterion};

use npchunk::tagger::tokenize;
use npchunk::{Chunker, Config};

const SAMPLE: &str = include_str!("./data/sample.txt");

fn criterion_benchmark(c: &mut Criterion) {
  let chunker = Chunker::new(Config::default()).unwrap();
  let short = SAMPLE.lines().next().unwrap();
  let long = SAMPLE.lines().max_by_key(|l| l.len()).unwrap();

  c.bench_function("parse short sentence", |b| {
    b.iter(|| chunker.parser().parse(tokenize(black_box(short))).unwrap())
  });

  c.bench_function("parse long sentence with recovery", |b| {
    b.iter(|| chunker.parser().parse(tokenize(black_box(long))).unwrap())
  });

  c.bench_function("chunk sample text", |b| {
    b.iter(|| chunker.noun_phrases(black_box(SAMPLE).lines()).len())
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
