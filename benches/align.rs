use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use phylign::libs::align::{align, AlignMode, AlignParams};
use phylign::libs::score_matrix::ScoreMatrixBuilder;
use phylign::libs::seq::Sequence;
use phylign::libs::sub_matrix::SubMatrix;
use std::hint::black_box;

fn protein(length: usize, seed: usize) -> Vec<u8> {
    let residues = b"ARNDCQEGHILKMFPSTWYV";
    (0..length)
        .map(|i| residues[(i * 7 + seed * 13 + i / 5) % 20])
        .collect()
}

fn bench_modes(c: &mut Criterion) {
    let matrix = SubMatrix::blosum62();
    let mut group = c.benchmark_group("align");

    for length in [50, 200, 500] {
        let a = protein(length, 1);
        let b = protein(length, 2);
        for mode in [AlignMode::Global, AlignMode::Local, AlignMode::Affine] {
            let params = AlignParams {
                mode,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), length),
                &length,
                |bench, _| bench.iter(|| align(&params, &matrix, black_box(&a), black_box(&b))),
            );
        }
    }

    group.finish();
}

fn bench_score_matrix(c: &mut Criterion) {
    let matrix = SubMatrix::blosum62();
    let params = AlignParams::default();
    let seqs: Vec<Sequence> = (0..16)
        .map(|i| Sequence::new(format!("seq_{}", i), protein(150, i)))
        .collect();

    let mut group = c.benchmark_group("score_matrix");
    group.sample_size(10);
    for threads in [1, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |bench, &t| {
            bench.iter(|| {
                ScoreMatrixBuilder::new(&matrix, &params)
                    .threads(t)
                    .build(black_box(&seqs))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_modes, bench_score_matrix);
criterion_main!(benches);
