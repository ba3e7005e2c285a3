use crate::error::{corrupt, invalid, Result};
use crate::index::occ::{OccTable, RankTable};
use crate::util::alphabet::{Alphabet, SENTINEL_CODE};

/// LF 映射：从第 row 行跳到文本中前一个字符所在的行
#[inline]
pub(crate) fn lf(bwt: &[u8], c: &RankTable, occ: &OccTable, row: usize) -> usize {
    let ch = bwt[row];
    c.less(ch) + occ.occ(bwt, ch, row)
}

/// 沿 LF 映射从第 0 行（以哨兵开头的轮换）出发走 n-1 步，逆序拼出原文。
///
/// 合法的 BWT 构成唯一一个长度为 n 的环：前 n-1 步都不会遇到哨兵，
/// 第 n-1 步后恰好停在 BWT 为哨兵的那一行。否则视为索引损坏。
pub fn invert_codes(bwt: &[u8], c: &RankTable, occ: &OccTable) -> Result<Vec<u8>> {
    let n = bwt.len();
    if n == 0 {
        return Err(corrupt("cannot invert an empty BWT"));
    }
    let mut text = vec![SENTINEL_CODE; n];
    let mut row = 0usize;
    for i in (0..n - 1).rev() {
        let ch = bwt[row];
        if ch == SENTINEL_CODE {
            return Err(corrupt(format!("LF cycle closed after {} of {} steps", n - 1 - i, n - 1)));
        }
        text[i] = ch;
        row = lf(bwt, c, occ, row);
        if row >= n {
            return Err(corrupt(format!("LF mapping left the BWT (row {} >= {})", row, n)));
        }
    }
    if bwt[row] != SENTINEL_CODE {
        return Err(corrupt(format!("LF cycle did not close after {} steps", n - 1)));
    }
    Ok(text)
}

/// 只凭一条 BWT 字符串还原原文：自建字母表、C 表和完整 Occ 表。
/// 返回的原文以哨兵结尾。
pub fn decode(bwt_text: &[u8], sentinel: u8) -> Result<Vec<u8>> {
    if bwt_text.is_empty() {
        return Err(invalid("BWT string is empty"));
    }
    let sentinels = bwt_text.iter().filter(|&&b| b == sentinel).count();
    if sentinels != 1 {
        return Err(invalid(format!(
            "BWT string has {} sentinels, expected exactly one",
            sentinels
        )));
    }
    let alphabet = Alphabet::from_text(bwt_text, sentinel);
    let bwt = alphabet.encode(bwt_text)?;
    let c = RankTable::from_bwt(&bwt, alphabet.sigma())?;
    let occ = OccTable::full(&bwt, alphabet.sigma())?;
    let text = invert_codes(&bwt, &c, &occ)?;
    Ok(alphabet.decode(&text))
}
