use serde::{Deserialize, Serialize};

use crate::error::{corrupt, invalid, Result};

/// 默认哨兵字节
pub const DEFAULT_SENTINEL: u8 = b'$';

/// 哨兵在数值化字母表中的编码，恒为最小
pub const SENTINEL_CODE: u8 = 0;

/// 若文本末尾不是哨兵则补上一个
pub fn terminated(text: &[u8], sentinel: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 1);
    out.extend_from_slice(text);
    if text.last() != Some(&sentinel) {
        out.push(sentinel);
    }
    out
}

/// 构建时固定下来的显式字母表。
///
/// 哨兵编码为 0，参考串中其余不同的字节按字节序依次编码为 `1..sigma`，
/// 所以 Rank / Occ 表都可以用稠密数组按编码下标访问。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alphabet {
    /// symbols[code] = 原始字节
    symbols: Vec<u8>,
    /// lookup[byte] = code
    lookup: Vec<Option<u8>>,
}

impl Alphabet {
    /// 从原始文本收集字母表。文本中的哨兵字节会被识别为编码 0，
    /// 哨兵是否唯一由后缀数组构建负责校验。
    pub fn from_text(text: &[u8], sentinel: u8) -> Self {
        let mut seen = [false; 256];
        for &b in text {
            seen[b as usize] = true;
        }
        seen[sentinel as usize] = false;

        let mut symbols = Vec::with_capacity(16);
        symbols.push(sentinel);
        symbols.extend((0..=255u8).filter(|&b| seen[b as usize]));

        let mut lookup = vec![None; 256];
        for (code, &b) in symbols.iter().enumerate() {
            lookup[b as usize] = Some(code as u8);
        }
        Self { symbols, lookup }
    }

    /// 字母表大小（含哨兵）
    #[inline]
    pub fn sigma(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn sentinel(&self) -> u8 {
        self.symbols[SENTINEL_CODE as usize]
    }

    #[inline]
    pub fn code(&self, b: u8) -> Option<u8> {
        self.lookup[b as usize]
    }

    #[inline]
    pub fn symbol(&self, code: u8) -> u8 {
        self.symbols[code as usize]
    }

    /// 按编码顺序返回所有原始字节
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// 数值化参考串；出现字母表外的字节视为非法输入。
    pub fn encode(&self, text: &[u8]) -> Result<Vec<u8>> {
        text.iter()
            .map(|&b| {
                self.code(b).ok_or_else(|| {
                    invalid(format!("byte 0x{b:02x} is not part of the alphabet"))
                })
            })
            .collect()
    }

    /// 数值化查询模式串。字母表外的字节保留为 `None`：
    /// 精确匹配时直接无结果，近似匹配时总是计为一次错配。
    pub fn encode_pattern(&self, pattern: &[u8]) -> Vec<Option<u8>> {
        pattern.iter().map(|&b| self.code(b)).collect()
    }

    pub fn decode(&self, codes: &[u8]) -> Vec<u8> {
        codes.iter().map(|&c| self.symbol(c)).collect()
    }

    /// 检查从外部加载的字母表：`symbols` 与 `lookup` 互为逆映射，
    /// 编码 0 是给定的哨兵，其余符号按字节序严格递增。
    pub fn check(&self, sentinel: u8) -> Result<()> {
        if self.lookup.len() != 256 {
            return Err(corrupt(format!("alphabet lookup has {} entries, expected 256", self.lookup.len())));
        }
        if self.symbols.is_empty() || self.symbols.len() > 256 {
            return Err(corrupt(format!("alphabet has {} symbols", self.symbols.len())));
        }
        if self.symbols[SENTINEL_CODE as usize] != sentinel {
            return Err(corrupt(format!(
                "alphabet sentinel is 0x{:02x}, index options say 0x{:02x}",
                self.symbols[SENTINEL_CODE as usize], sentinel
            )));
        }
        if self.symbols[1..].windows(2).any(|w| w[0] >= w[1]) {
            return Err(corrupt("alphabet symbols are not in byte order"));
        }
        for (code, &b) in self.symbols.iter().enumerate() {
            if self.lookup[b as usize] != Some(code as u8) {
                return Err(corrupt(format!("alphabet lookup disagrees for byte 0x{b:02x}")));
            }
        }
        if self.lookup.iter().filter(|c| c.is_some()).count() != self.symbols.len() {
            return Err(corrupt("alphabet lookup maps bytes outside the symbol list"));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(symbols: Vec<u8>, lookup: Vec<Option<u8>>) -> Self {
        Self { symbols, lookup }
    }
}
