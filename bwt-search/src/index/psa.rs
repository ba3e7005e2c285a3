use serde::{Deserialize, Serialize};

use crate::error::{corrupt, invalid, Result};

/// 稀疏后缀数组：只保留 `SA[i] % stride == 0` 的行。
///
/// `rows` 按行号升序存放，`offsets[j]` 为 `rows[j]` 对应的文本位置。
/// 其余行通过 LF 映射回溯到最近的采样行再加上步数得到位置，
/// 回溯步数不超过 `stride - 1`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialSuffixArray {
    stride: u32,
    rows: Vec<u32>,
    offsets: Vec<u32>,
}

impl PartialSuffixArray {
    pub fn build(sa: &[u32], stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(invalid("suffix array stride must be at least 1"));
        }
        let stride = u32::try_from(stride)
            .map_err(|_| invalid(format!("suffix array stride {} exceeds u32 range", stride)))?;
        let mut rows = Vec::with_capacity(sa.len() / stride as usize + 1);
        let mut offsets = Vec::with_capacity(rows.capacity());
        for (row, &off) in sa.iter().enumerate() {
            if off % stride == 0 {
                rows.push(row as u32);
                offsets.push(off);
            }
        }
        Ok(Self { stride, rows, offsets })
    }

    /// 若该行被采样，返回其文本位置
    #[inline]
    pub fn get(&self, row: usize) -> Option<u32> {
        let row = u32::try_from(row).ok()?;
        self.rows.binary_search(&row).ok().map(|j| self.offsets[j])
    }

    pub fn stride(&self) -> usize {
        self.stride as usize
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (行号, 文本位置)，按行号升序
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().zip(&self.offsets).map(|(&r, &o)| (r as usize, o as usize))
    }

    /// 检查采样是否与长度为 n 的文本一致：行号递增且在范围内，
    /// 位置都是 stride 的倍数，且位置 0 一定被采样。
    pub fn check(&self, n: usize) -> Result<()> {
        if self.stride == 0 || self.rows.len() != self.offsets.len() {
            return Err(corrupt("partial suffix array is malformed"));
        }
        if self.rows.windows(2).any(|w| w[0] >= w[1]) {
            return Err(corrupt("partial suffix array rows are not strictly increasing"));
        }
        if self.rows.last().is_some_and(|&r| r as usize >= n) {
            return Err(corrupt("partial suffix array row out of range"));
        }
        if self.offsets.iter().any(|&o| o as usize >= n || o % self.stride != 0) {
            return Err(corrupt("partial suffix array offset is not a sampled position"));
        }
        if !self.offsets.contains(&0) {
            return Err(corrupt("partial suffix array does not sample position 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // panamabananas$ 的后缀数组
    const SA: [u32; 14] = [13, 5, 3, 1, 7, 9, 11, 6, 4, 2, 8, 10, 0, 12];

    #[test]
    fn keeps_rows_whose_offset_is_multiple_of_stride() {
        let psa = PartialSuffixArray::build(&SA, 5).unwrap();
        let pairs: Vec<(usize, usize)> = psa.iter().collect();
        assert_eq!(pairs, vec![(1, 5), (11, 10), (12, 0)]);
        assert_eq!(psa.get(11), Some(10));
        assert_eq!(psa.get(2), None);
        psa.check(SA.len()).unwrap();
    }

    #[test]
    fn stride_one_keeps_everything() {
        let psa = PartialSuffixArray::build(&SA, 1).unwrap();
        assert_eq!(psa.len(), SA.len());
        for (row, &off) in SA.iter().enumerate() {
            assert_eq!(psa.get(row), Some(off));
        }
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(PartialSuffixArray::build(&SA, 0).is_err());
    }
}
