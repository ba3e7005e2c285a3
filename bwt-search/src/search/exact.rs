use log::debug;

use crate::error::{invalid, Result};
use crate::index::fm::FmIndex;
use crate::util::alphabet::SENTINEL_CODE;

/// 求模式串对应的 SA 区间 [l, r)；`None` 表示不出现。
///
/// 哨兵在文本中只出现一次且位于末尾，因此只能匹配模式串的最后一个字符；
/// 出现在其他位置时必然跨越文本末尾（循环轮换），直接判为不匹配。
pub fn interval(fm: &FmIndex, pattern: &[u8]) -> Result<Option<(usize, usize)>> {
    if pattern.is_empty() {
        return Err(invalid("pattern is empty"));
    }
    if pattern.len() > fm.len() {
        return Ok(None);
    }
    let codes: Option<Vec<u8>> = fm.alphabet().encode_pattern(pattern).into_iter().collect();
    let Some(codes) = codes else {
        return Ok(None);
    };
    if codes[..codes.len() - 1].contains(&SENTINEL_CODE) {
        return Ok(None);
    }
    Ok(fm.backward_search(&codes))
}

/// 精确匹配：返回模式串在参考串中所有出现的起始位置（升序）
pub fn exact_match(fm: &FmIndex, pattern: &[u8]) -> Result<Vec<usize>> {
    let Some((l, r)) = interval(fm, pattern)? else {
        debug!("exact '{}': no match", String::from_utf8_lossy(pattern));
        return Ok(Vec::new());
    };
    let mut positions = fm.sa_interval_positions(l, r)?;
    positions.sort_unstable();
    debug!("exact '{}': {} hits", String::from_utf8_lossy(pattern), positions.len());
    Ok(positions)
}

/// 出现次数，即 SA 区间宽度，不需要回溯位置
pub fn count(fm: &FmIndex, pattern: &[u8]) -> Result<usize> {
    Ok(interval(fm, pattern)?.map_or(0, |(l, r)| r - l))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::index::{IndexOpt, OccMode};

    fn build(text: &[u8]) -> FmIndex {
        FmIndex::build(text, &IndexOpt::default()).unwrap()
    }

    fn brute_force(text: &[u8], pattern: &[u8]) -> Vec<usize> {
        if pattern.len() > text.len() {
            return Vec::new();
        }
        (0..=text.len() - pattern.len()).filter(|&i| &text[i..i + pattern.len()] == pattern).collect()
    }

    #[test]
    fn finds_single_occurrence() {
        let fm = build(b"aacg$");
        assert_eq!(exact_match(&fm, b"ac").unwrap(), vec![1]);
        assert_eq!(count(&fm, b"ac").unwrap(), 1);
    }

    #[test]
    fn finds_overlapping_occurrences() {
        let text = b"AATCGGGTTCAATCGGGGT$";
        let fm = build(text);
        for pat in [&b"ATCG"[..], b"GGG", b"A", b"T", b"AATCGGGG", b"GT$"] {
            assert_eq!(exact_match(&fm, pat).unwrap(), brute_force(text, pat), "pattern {:?}", pat);
        }
        assert_eq!(exact_match(&fm, b"GGG").unwrap(), vec![4, 14, 15]);
    }

    #[test]
    fn absent_pattern_is_empty_not_error() {
        let fm = build(b"aacg$");
        assert!(exact_match(&fm, b"gg").unwrap().is_empty());
        assert!(exact_match(&fm, b"ax").unwrap().is_empty());
        assert_eq!(count(&fm, b"ca").unwrap(), 0);
    }

    #[test]
    fn whole_reference_matches_at_zero() {
        let fm = build(b"aacg$");
        assert_eq!(exact_match(&fm, b"aacg$").unwrap(), vec![0]);
        assert_eq!(exact_match(&fm, b"$").unwrap(), vec![4]);
    }

    #[test]
    fn longer_than_reference_is_empty() {
        let fm = build(b"aacg$");
        assert!(exact_match(&fm, b"aacgaacg").unwrap().is_empty());
    }

    #[test]
    fn sentinel_inside_pattern_never_wraps() {
        // 作为循环轮换 "g$aac" 会以 "g$a" 开头，但它不是参考串的子串
        let fm = build(b"aacg$");
        assert!(exact_match(&fm, b"g$a").unwrap().is_empty());
    }

    #[test]
    fn empty_pattern_is_invalid() {
        let fm = build(b"aacg$");
        assert!(matches!(exact_match(&fm, b""), Err(IndexError::InvalidInput(_))));
        assert!(matches!(count(&fm, b""), Err(IndexError::InvalidInput(_))));
    }

    #[test]
    fn full_and_sampled_tables_agree() {
        let text = b"ATATATATGCGCATATTTAGCA$";
        let full = FmIndex::build(text, &IndexOpt { occ_mode: OccMode::Full, ..IndexOpt::default() }).unwrap();
        for k in 1..=8 {
            let sampled = FmIndex::build(text, &IndexOpt::with_stride(k)).unwrap();
            for pat in [&b"AT"[..], b"ATAT", b"GC", b"TTTAG", b"CA$", b"G"] {
                assert_eq!(exact_match(&full, pat).unwrap(), exact_match(&sampled, pat).unwrap());
            }
        }
    }
}
