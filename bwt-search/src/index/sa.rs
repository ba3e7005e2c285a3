use rayon::prelude::*;

use crate::error::{invalid, Result};
use crate::util::alphabet::SENTINEL_CODE;

/// 校验数值化文本：非空、长度可用 u32 表示、哨兵(0) 恰好出现一次且位于末尾。
pub fn check_text(text: &[u8]) -> Result<()> {
    let n = text.len();
    if n == 0 {
        return Err(invalid("reference is empty"));
    }
    if n > u32::MAX as usize {
        return Err(invalid(format!("reference length {} exceeds u32 range", n)));
    }
    let sentinels = text.iter().filter(|&&c| c == SENTINEL_CODE).count();
    match sentinels {
        0 => Err(invalid("reference has no sentinel")),
        1 if text[n - 1] == SENTINEL_CODE => Ok(()),
        1 => Err(invalid("sentinel must be the last symbol of the reference")),
        k => Err(invalid(format!("reference has {} sentinels, expected exactly one", k))),
    }
}

/// 构建后缀数组（朴素比较排序）。
///
/// 输入为数值化文本，以唯一的哨兵 0 结尾。由于哨兵唯一且最小，
/// 比较后缀与比较循环轮换得到的顺序完全一致，且不存在相等的情况，
/// 因此并行的不稳定排序结果也是确定的。
pub fn build_sa(text: &[u8]) -> Result<Vec<u32>> {
    check_text(text)?;
    let n = text.len();
    let mut sa: Vec<u32> = (0..n as u32).collect();
    sa.par_sort_unstable_by(|&i, &j| text[i as usize..].cmp(&text[j as usize..]));
    Ok(sa)
}
