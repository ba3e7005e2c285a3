use rayon::prelude::*;

use crate::error::Result;
use crate::index::fm::FmIndex;
use crate::search::{approx, exact};

/// 一条模式串的查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHits {
    pub pattern: Vec<u8>,
    pub positions: Vec<usize>,
}

fn run_batch<P, F>(patterns: &[P], query: F) -> Result<Vec<PatternHits>>
where
    P: AsRef<[u8]> + Sync,
    F: Fn(&[u8]) -> Result<Vec<usize>> + Sync,
{
    patterns
        .par_iter()
        .map(|p| {
            let pattern = p.as_ref();
            let positions = query(pattern)?;
            Ok(PatternHits { pattern: pattern.to_vec(), positions })
        })
        .collect()
}

/// 多条模式串并行查询：每条模式串一个 rayon 任务，共享同一个只读索引。
/// `max_mismatches == 0` 时走精确匹配。结果顺序与输入一致，任一模式串非法则整体报错。
pub fn search_batch<P>(fm: &FmIndex, patterns: &[P], max_mismatches: usize) -> Result<Vec<PatternHits>>
where
    P: AsRef<[u8]> + Sync,
{
    if max_mismatches == 0 {
        exact_match_batch(fm, patterns)
    } else {
        approximate_match_batch(fm, patterns, max_mismatches)
    }
}

pub fn exact_match_batch<P>(fm: &FmIndex, patterns: &[P]) -> Result<Vec<PatternHits>>
where
    P: AsRef<[u8]> + Sync,
{
    run_batch(patterns, |p| exact::exact_match(fm, p))
}

pub fn approximate_match_batch<P>(fm: &FmIndex, patterns: &[P], max_mismatches: usize) -> Result<Vec<PatternHits>>
where
    P: AsRef<[u8]> + Sync,
{
    run_batch(patterns, |p| approx::approximate_match(fm, p, max_mismatches))
}
