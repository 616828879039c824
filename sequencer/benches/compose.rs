use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};
use sequencer::{Compositor, CorpusView, GlyphStore, LabelIndex, Spacing};
use std::hint::black_box;

const N: u32 = 1000;
const SIDE: u32 = 28;

fn image_blob() -> Vec<u8> {
    let mut out = Vec::new();
    for v in [2051, N, SIDE, SIDE] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    for i in 0..N {
        out.extend((0..SIDE * SIDE).map(|p| ((i + p) % 256) as u8));
    }
    out
}

fn bench_compose(c: &mut Criterion) {
    let labels: Vec<u8> = (0..N).map(|i| (i % 10) as u8).collect();
    let corpus = CorpusView::new(
        GlyphStore::open(image_blob()).unwrap(),
        LabelIndex::from_labels(&labels).unwrap(),
    )
    .unwrap();
    let digits = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    c.bench_function("compose_10_digits", |b| {
        b.iter_batched(
            || SmallRng::seed_from_u64(42),
            |mut rng| {
                let canvas = Compositor::new(&corpus)
                    .compose(&digits, Spacing::new(2, 8), 320, &mut rng)
                    .unwrap();
                black_box(canvas.normalize());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
