use log::debug;

use crate::error::{invalid, Result};
use crate::index::fm::FmIndex;
use crate::util::alphabet::SENTINEL_CODE;

/// 近似匹配的一处命中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproxHit {
    /// 参考串上的起始位置
    pub position: usize,
    /// 与模式串的 Hamming 距离
    pub mismatches: usize,
    /// 参考串上实际匹配到的子串
    pub matched: Vec<u8>,
}

/// 搜索状态：已匹配的后缀（编码）、SA 区间 [top, bot)、累计错配数
#[derive(Debug, Clone)]
struct State {
    suffix: Vec<u8>,
    top: usize,
    bot: usize,
    mismatches: usize,
}

/// 带错配上限的反向搜索。
///
/// 每处理模式串的一个字符（从后往前），对每个存活状态尝试字母表中的每个符号：
/// 与模式字符相同则不计代价，不同则错配数加一，超过上限即剪枝；区间为空的分支丢弃。
/// 不同后缀对应的 SA 区间互不相交，所以结果与分支探索顺序无关。
pub fn approximate_hits(fm: &FmIndex, pattern: &[u8], max_mismatches: usize) -> Result<Vec<ApproxHit>> {
    if pattern.is_empty() {
        return Err(invalid("pattern is empty"));
    }
    let n = fm.len();
    if pattern.len() > n {
        return Ok(Vec::new());
    }

    let alphabet = fm.alphabet();
    let sigma = alphabet.sigma();
    let codes = alphabet.encode_pattern(pattern);
    let last = codes.len() - 1;

    let mut states = vec![State { suffix: Vec::new(), top: 0, bot: n, mismatches: 0 }];
    let mut next: Vec<State> = Vec::new();
    for (j, &want) in codes.iter().enumerate().rev() {
        // 哨兵只可能出现在模式串末尾，否则匹配会跨越文本末尾
        let first = usize::from(if j == last { SENTINEL_CODE } else { SENTINEL_CODE + 1 });
        for st in states.drain(..) {
            for a in (first..sigma).map(|a| a as u8) {
                let mismatches = st.mismatches + usize::from(want != Some(a));
                if mismatches > max_mismatches {
                    continue;
                }
                let (top, bot) = fm.rank_range(a, st.top, st.bot);
                if top >= bot {
                    continue;
                }
                let mut suffix = Vec::with_capacity(st.suffix.len() + 1);
                suffix.push(a);
                suffix.extend_from_slice(&st.suffix);
                next.push(State { suffix, top, bot, mismatches });
            }
        }
        std::mem::swap(&mut states, &mut next);
        if states.is_empty() {
            break;
        }
    }

    let mut hits = Vec::new();
    for st in &states {
        let matched = alphabet.decode(&st.suffix);
        for row in st.top..st.bot {
            hits.push(ApproxHit {
                position: fm.locate(row)?,
                mismatches: st.mismatches,
                matched: matched.clone(),
            });
        }
    }
    hits.sort_unstable_by_key(|h| h.position);
    hits.dedup_by_key(|h| h.position);
    debug!(
        "approx '{}' (<= {} mismatches): {} states, {} hits",
        String::from_utf8_lossy(pattern),
        max_mismatches,
        states.len(),
        hits.len()
    );
    Ok(hits)
}

/// 近似匹配：返回 Hamming 距离不超过 `max_mismatches` 的所有起始位置（升序）
pub fn approximate_match(fm: &FmIndex, pattern: &[u8], max_mismatches: usize) -> Result<Vec<usize>> {
    Ok(approximate_hits(fm, pattern, max_mismatches)?.into_iter().map(|h| h.position).collect())
}
