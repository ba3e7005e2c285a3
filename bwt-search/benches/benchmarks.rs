use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bwt_search::index::{fm::FmIndex, sa, IndexOpt, OccMode};
use bwt_search::util::alphabet::{self, Alphabet};

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len + 1);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    alphabet::terminated(&seq, b'$')
}

fn build_index(text: &[u8], mode: OccMode) -> FmIndex {
    let opt = IndexOpt { occ_mode: mode, occ_stride: 32, sa_stride: 32, ..IndexOpt::default() };
    FmIndex::build(text, &opt).expect("valid reference")
}

fn bench_exact_match(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let full = build_index(&reference, OccMode::Full);
    let sampled = build_index(&reference, OccMode::Sampled);
    let pattern = reference[100..120].to_vec();

    c.bench_function("exact_match_20bp_full_occ", |b| {
        b.iter(|| black_box(full.exact_match(black_box(&pattern)).unwrap()));
    });
    c.bench_function("exact_match_20bp_sampled_occ", |b| {
        b.iter(|| black_box(sampled.exact_match(black_box(&pattern)).unwrap()));
    });
}

fn bench_approximate_match(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let fm = build_index(&reference, OccMode::Sampled);
    let mut pattern = reference[500..530].to_vec();
    pattern[15] = if pattern[15] == b'A' { b'C' } else { b'A' };

    c.bench_function("approximate_match_30bp_2mm", |b| {
        b.iter(|| black_box(fm.approximate_match(black_box(&pattern), 2).unwrap()));
    });
}

fn bench_build_sa(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let codes = Alphabet::from_text(&reference, b'$').encode(&reference).unwrap();

    c.bench_function("build_sa_10k", |b| {
        b.iter(|| black_box(sa::build_sa(black_box(&codes)).unwrap()));
    });
}

fn bench_invert(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let fm = build_index(&reference, OccMode::Sampled);

    c.bench_function("invert_10k", |b| {
        b.iter(|| black_box(fm.invert().unwrap()));
    });
}

criterion_group!(benches, bench_exact_match, bench_approximate_match, bench_build_sa, bench_invert);
criterion_main!(benches);
