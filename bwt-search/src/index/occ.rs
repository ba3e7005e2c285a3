use serde::{Deserialize, Serialize};

use crate::error::{corrupt, invalid, Result};

/// Rank 表（C 表）：C[c] = BWT 中严格小于 c 的符号个数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    c: Vec<u32>,
    counts: Vec<u32>,
}

impl RankTable {
    pub fn from_bwt(bwt: &[u8], sigma: usize) -> Result<Self> {
        let mut counts = vec![0u32; sigma];
        for &ch in bwt {
            let ci = ch as usize;
            if ci >= sigma {
                return Err(corrupt(format!("symbol code {} outside alphabet of {}", ci, sigma)));
            }
            counts[ci] += 1;
        }
        let mut c = vec![0u32; sigma];
        let mut acc = 0u32;
        for i in 0..sigma {
            c[i] = acc;
            acc += counts[i];
        }
        Ok(Self { c, counts })
    }

    /// C(c)
    #[inline]
    pub fn less(&self, c: u8) -> usize {
        self.c[c as usize] as usize
    }

    /// 符号 c 在整个 BWT 中的出现次数
    #[inline]
    pub fn count(&self, c: u8) -> usize {
        self.counts[c as usize] as usize
    }

    pub fn sigma(&self) -> usize {
        self.c.len()
    }

    /// C(最后一个符号) + count(最后一个符号)，即 BWT 长度
    pub fn total(&self) -> usize {
        match (self.c.last(), self.counts.last()) {
            (Some(&c), Some(&k)) => c as usize + k as usize,
            _ => 0,
        }
    }
}

/// Occ 表的存储方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OccMode {
    /// 每个前缀长度都存一份计数
    Full,
    /// 每 k 个位置存一份快照，查询时从最近快照顺扫补偿
    #[default]
    Sampled,
}

/// Occ 表：Occ(c, i) = c 在 BWT[0, i) 中的出现次数。
///
/// 快照按行优先展平存储：`samples[j * sigma + c]` 为 c 在 `BWT[0, j * stride)` 中的计数，
/// 共 `n / stride + 1` 行。完整表即 `stride == 1` 的特例，查询时不需要扫描。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccTable {
    sigma: u32,
    stride: u32,
    samples: Vec<u32>,
}

impl OccTable {
    pub fn build(bwt: &[u8], sigma: usize, mode: OccMode, stride: usize) -> Result<Self> {
        match mode {
            OccMode::Full => Self::full(bwt, sigma),
            OccMode::Sampled => Self::sampled(bwt, sigma, stride),
        }
    }

    pub fn full(bwt: &[u8], sigma: usize) -> Result<Self> {
        Self::sampled(bwt, sigma, 1)
    }

    pub fn sampled(bwt: &[u8], sigma: usize, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(invalid("occurrence table stride must be at least 1"));
        }
        if stride > u32::MAX as usize {
            return Err(invalid(format!("occurrence table stride {} exceeds u32 range", stride)));
        }
        let n = bwt.len();
        let rows = n / stride + 1;
        let mut samples = Vec::with_capacity(rows * sigma);
        let mut running = vec![0u32; sigma];
        for (i, &ch) in bwt.iter().enumerate() {
            if i % stride == 0 {
                samples.extend_from_slice(&running);
            }
            let ci = ch as usize;
            if ci >= sigma {
                return Err(corrupt(format!("symbol code {} outside alphabet of {}", ci, sigma)));
            }
            running[ci] += 1;
        }
        if n % stride == 0 {
            samples.extend_from_slice(&running);
        }
        debug_assert_eq!(samples.len(), rows * sigma);
        Ok(Self { sigma: sigma as u32, stride: stride as u32, samples })
    }

    /// 返回 BWT[0..pos) 中 c 的出现次数。`bwt` 必须是构建本表时用的那一份。
    #[inline]
    pub fn occ(&self, bwt: &[u8], c: u8, pos: usize) -> usize {
        let sigma = self.sigma as usize;
        let stride = self.stride as usize;
        let j = pos / stride;
        let base = self.samples[j * sigma + c as usize] as usize;
        let start = j * stride;
        if start == pos {
            return base;
        }
        base + bwt[start..pos].iter().filter(|&&ch| ch == c).count()
    }

    pub fn mode(&self) -> OccMode {
        if self.stride == 1 {
            OccMode::Full
        } else {
            OccMode::Sampled
        }
    }

    pub fn stride(&self) -> usize {
        self.stride as usize
    }

    pub fn sigma(&self) -> usize {
        self.sigma as usize
    }

    /// 快照所占的计数个数
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// 检查快照数量与给定 BWT 长度是否吻合
    pub fn check_len(&self, n: usize) -> Result<()> {
        if self.stride == 0 {
            return Err(corrupt("occurrence table stride is zero"));
        }
        let expected = (n / self.stride() + 1) * self.sigma();
        if self.samples.len() != expected {
            return Err(corrupt(format!(
                "occurrence table holds {} counts, expected {}",
                self.samples.len(),
                expected
            )));
        }
        Ok(())
    }
}
