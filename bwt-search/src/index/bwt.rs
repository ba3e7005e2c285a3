use crate::error::Result;
use crate::index::sa;
use crate::util::alphabet::Alphabet;

/// 编码后的文本按后缀数组投影成 BWT：第 i 行取 SA[i] 前一位的符号，
/// SA[i] == 0 时回绕到末尾的哨兵（编码 0）。
pub fn build_bwt(codes: &[u8], sa: &[u32]) -> Vec<u8> {
    let Some(&last) = codes.last() else {
        return Vec::new();
    };
    sa.iter()
        .map(|&p| match p as usize {
            0 => last,
            i => codes[i - 1],
        })
        .collect()
}

/// 对原始字节串做 Burrows-Wheeler 变换，返回原始字节形式的 BWT。
/// `text` 必须以唯一的 `sentinel` 结尾。
pub fn transform(text: &[u8], sentinel: u8) -> Result<Vec<u8>> {
    let alphabet = Alphabet::from_text(text, sentinel);
    let codes = alphabet.encode(text)?;
    let sa_arr = sa::build_sa(&codes)?;
    Ok(alphabet.decode(&build_bwt(&codes, &sa_arr)))
}
