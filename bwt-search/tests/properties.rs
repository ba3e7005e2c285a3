use proptest::prelude::*;

use bwt_search::index::{bwt, invert, IndexOpt, OccMode};
use bwt_search::util::alphabet::terminated;
use bwt_search::FmIndex;

fn reference(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'c'), Just(b'g'), Just(b't')], 0..=max_len)
        .prop_map(|s| terminated(&s, b'$'))
}

fn pattern(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'c'), Just(b'g'), Just(b't'), Just(b'$')], 1..=max_len)
}

fn hamming_positions(text: &[u8], pattern: &[u8], m: usize) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| text[i..i + pattern.len()].iter().zip(pattern).filter(|(a, b)| a != b).count() <= m)
        .collect()
}

fn full_opt() -> IndexOpt {
    IndexOpt { occ_mode: OccMode::Full, sa_stride: 1, ..IndexOpt::default() }
}

#[test]
fn aacg_scenario() {
    let fm = FmIndex::build(b"aacg$", &IndexOpt::default()).unwrap();
    assert_eq!(fm.bwt_string(), b"g$aac");
    assert_eq!(invert::decode(b"g$aac", b'$').unwrap(), b"aacg$");
    assert_eq!(fm.invert().unwrap(), b"aacg$");
    assert_eq!(fm.exact_match(b"ac").unwrap(), vec![1]);
    assert!(fm.approximate_match(b"ag", 1).unwrap().contains(&1));
    assert_eq!(fm.exact_match(b"aacg$").unwrap(), vec![0]);
    assert!(fm.exact_match(b"aacgaacg$").unwrap().is_empty());
}

proptest! {
    #[test]
    fn invert_round_trips(text in reference(60), k in 1usize..8) {
        let fm = FmIndex::build(&text, &IndexOpt::with_stride(k)).unwrap();
        prop_assert_eq!(fm.invert().unwrap(), text.clone());
        prop_assert_eq!(invert::decode(&fm.bwt_string(), b'$').unwrap(), text);
    }

    #[test]
    fn bwt_is_a_permutation(text in reference(60)) {
        let mut b = bwt::transform(&text, b'$').unwrap();
        let mut t = text.clone();
        b.sort_unstable();
        t.sort_unstable();
        prop_assert_eq!(b, t);
    }

    #[test]
    fn exact_match_equals_brute_force(text in reference(60), pat in pattern(6), k in 1usize..8) {
        let fm = FmIndex::build(&text, &IndexOpt::with_stride(k)).unwrap();
        prop_assert_eq!(fm.exact_match(&pat).unwrap(), hamming_positions(&text, &pat, 0));
        prop_assert_eq!(fm.count(&pat).unwrap(), hamming_positions(&text, &pat, 0).len());
    }

    #[test]
    fn approximate_match_equals_brute_force(text in reference(40), pat in pattern(5), m in 0usize..3) {
        let fm = FmIndex::build(&text, &IndexOpt::default()).unwrap();
        prop_assert_eq!(fm.approximate_match(&pat, m).unwrap(), hamming_positions(&text, &pat, m));
    }

    #[test]
    fn approximate_contains_exact(text in reference(40), pat in pattern(5), m in 0usize..3) {
        let fm = FmIndex::build(&text, &IndexOpt::default()).unwrap();
        let exact = fm.exact_match(&pat).unwrap();
        let approx = fm.approximate_match(&pat, m).unwrap();
        prop_assert!(exact.iter().all(|p| approx.contains(p)));
        prop_assert_eq!(fm.approximate_match(&pat, 0).unwrap(), exact);
    }

    #[test]
    fn sampled_tables_agree_with_full(
        text in reference(50),
        pat in pattern(5),
        occ_stride in 1usize..10,
        sa_stride in 1usize..10,
        m in 0usize..2,
    ) {
        let full = FmIndex::build(&text, &full_opt()).unwrap();
        let opt = IndexOpt { occ_stride, sa_stride, ..IndexOpt::default() };
        let sampled = FmIndex::build(&text, &opt).unwrap();
        prop_assert_eq!(full.exact_match(&pat).unwrap(), sampled.exact_match(&pat).unwrap());
        prop_assert_eq!(
            full.approximate_match(&pat, m).unwrap(),
            sampled.approximate_match(&pat, m).unwrap()
        );
    }
}
