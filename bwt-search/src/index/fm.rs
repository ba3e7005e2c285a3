use std::io::Write;

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{self, corrupt, invalid};
use crate::index::occ::{OccMode, OccTable, RankTable};
use crate::index::psa::PartialSuffixArray;
use crate::index::{bwt, invert, sa, IndexOpt};
use crate::search::approx::{self, ApproxHit};
use crate::search::exact;
use crate::util::alphabet::{Alphabet, SENTINEL_CODE};

/// 索引构建元信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub reference_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 单条参考串上的 FM 索引：
/// - 字母表在构建时固定，哨兵编码为 0，C / Occ 表按编码稠密存储。
/// - Occ 可选完整表或按 `occ_stride` 采样（块内顺扫补偿）。
/// - 不保留完整 SA，只保留 `SA[i] % sa_stride == 0` 的采样，位置经 LF 回溯得到。
///
/// 构建完成后只读，可以在多个线程间直接共享 `&FmIndex`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmIndex {
    opt: IndexOpt,
    alphabet: Alphabet,
    /// C[c] = BWT 中 < c 的符号数
    c: RankTable,
    /// BWT 序列（数值化）
    bwt: Vec<u8>,
    occ: OccTable,
    psa: PartialSuffixArray,
    meta: IndexMeta,
}

impl FmIndex {
    /// 从原始参考串构建索引。`reference` 必须以唯一的 `opt.sentinel` 结尾。
    pub fn build(reference: &[u8], opt: &IndexOpt) -> error::Result<Self> {
        opt.validate()?;
        let alphabet = Alphabet::from_text(reference, opt.sentinel);
        let text = alphabet.encode(reference)?;
        info!(
            "building index: n={}, sigma={}, occ={:?}/{}, sa_stride={}",
            text.len(),
            alphabet.sigma(),
            opt.occ_mode,
            opt.occ_stride,
            opt.sa_stride
        );

        let sa_arr = sa::build_sa(&text)?;
        let bwt_arr = bwt::build_bwt(&text, &sa_arr);
        drop(text);
        debug!("suffix array and BWT ready");

        let c = RankTable::from_bwt(&bwt_arr, alphabet.sigma())?;
        let occ = OccTable::build(&bwt_arr, alphabet.sigma(), opt.occ_mode, opt.occ_stride)?;
        let psa = PartialSuffixArray::build(&sa_arr, opt.sa_stride)?;
        info!(
            "tables ready: {} occ counts, {} of {} suffix array rows sampled",
            occ.sample_count(),
            psa.len(),
            sa_arr.len()
        );

        Ok(Self { opt: *opt, alphabet, c, bwt: bwt_arr, occ, psa, meta: IndexMeta::default() })
    }

    /// 文本长度（含哨兵）
    #[inline]
    pub fn len(&self) -> usize {
        self.bwt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bwt.is_empty()
    }

    pub fn opt(&self) -> &IndexOpt {
        &self.opt
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn rank_table(&self) -> &RankTable {
        &self.c
    }

    pub fn occ_table(&self) -> &OccTable {
        &self.occ
    }

    pub fn partial_sa(&self) -> &PartialSuffixArray {
        &self.psa
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    /// 原始字节形式的 BWT
    pub fn bwt_string(&self) -> Vec<u8> {
        self.alphabet.decode(&self.bwt)
    }

    #[inline]
    pub fn occ(&self, c: u8, pos: usize) -> usize {
        // 返回 BWT[0..pos) 中 c 的出现次数
        self.occ.occ(&self.bwt, c, pos)
    }

    #[inline]
    pub fn lf(&self, row: usize) -> usize {
        invert::lf(&self.bwt, &self.c, &self.occ, row)
    }

    #[inline]
    pub fn rank_range(&self, c: u8, l: usize, r: usize) -> (usize, usize) {
        // 返回在区间 [l, r) 上扩展字符 c 后的新区间
        let c0 = self.c.less(c);
        (c0 + self.occ(c, l), c0 + self.occ(c, r))
    }

    /// 反向搜索精确匹配，pat 已经是编码后的字母表
    pub fn backward_search(&self, pat: &[u8]) -> Option<(usize, usize)> {
        if self.bwt.is_empty() {
            return None;
        }
        let mut l = 0usize;
        let mut r = self.bwt.len();
        for &a in pat.iter().rev() {
            let (nl, nr) = self.rank_range(a, l, r);
            if nl >= nr {
                return None;
            }
            l = nl;
            r = nr;
        }
        Some((l, r))
    }

    /// 求第 row 行的文本位置 SA[row]：沿 LF 回溯到采样行，再加上步数。
    pub fn locate(&self, row: usize) -> error::Result<usize> {
        let n = self.len();
        if row >= n {
            return Err(invalid(format!("row {} out of range 0..{}", row, n)));
        }
        let mut cur = row;
        let mut steps = 0usize;
        loop {
            if let Some(off) = self.psa.get(cur) {
                return Ok(off as usize + steps);
            }
            if steps >= n {
                return Err(corrupt(format!("row {} never reached a sampled row", row)));
            }
            cur = self.lf(cur);
            steps += 1;
        }
    }

    /// 取出 SA 区间 [l, r) 对应的文本位置
    pub fn sa_interval_positions(&self, l: usize, r: usize) -> error::Result<Vec<usize>> {
        (l..r).map(|row| self.locate(row)).collect()
    }

    /// 精确匹配，返回升序的起始位置
    pub fn exact_match(&self, pattern: &[u8]) -> error::Result<Vec<usize>> {
        exact::exact_match(self, pattern)
    }

    /// 统计出现次数而不解析位置
    pub fn count(&self, pattern: &[u8]) -> error::Result<usize> {
        exact::count(self, pattern)
    }

    /// 至多 `max_mismatches` 个替换的近似匹配，返回升序的起始位置
    pub fn approximate_match(&self, pattern: &[u8], max_mismatches: usize) -> error::Result<Vec<usize>> {
        approx::approximate_match(self, pattern, max_mismatches)
    }

    /// 近似匹配，附带每处命中的错配数与参考串上的实际子串
    pub fn approximate_hits(&self, pattern: &[u8], max_mismatches: usize) -> error::Result<Vec<ApproxHit>> {
        approx::approximate_hits(self, pattern, max_mismatches)
    }

    /// 经 LF 映射还原参考串（以哨兵结尾）
    pub fn invert(&self) -> error::Result<Vec<u8>> {
        let text = invert::invert_codes(&self.bwt, &self.c, &self.occ)?;
        Ok(self.alphabet.decode(&text))
    }

    /// 检查各表之间的一致性，加载外部索引文件后调用
    pub fn validate(&self) -> error::Result<()> {
        let n = self.len();
        let sigma = self.alphabet.sigma();
        if n == 0 {
            return Err(corrupt("index has an empty BWT"));
        }
        self.alphabet.check(self.opt.sentinel)?;
        if self.c.sigma() != sigma || self.occ.sigma() != sigma {
            return Err(corrupt(format!(
                "table alphabet sizes disagree: alphabet={}, C={}, Occ={}",
                sigma,
                self.c.sigma(),
                self.occ.sigma()
            )));
        }
        if self.c.total() != n {
            return Err(corrupt(format!("C table covers {} symbols, BWT has {}", self.c.total(), n)));
        }
        if self.bwt.iter().any(|&b| b as usize >= sigma) {
            return Err(corrupt("BWT contains a symbol outside the alphabet"));
        }
        if self.c.count(SENTINEL_CODE) != 1 {
            return Err(corrupt("BWT must contain exactly one sentinel"));
        }
        self.occ.check_len(n)?;
        self.psa.check(n)?;
        if self.occ.mode() != OccMode::Full && self.occ.stride() != self.opt.occ_stride {
            return Err(corrupt("occurrence table stride disagrees with index options"));
        }
        Ok(())
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        idx.validate()?;
        Ok(idx)
    }
}
