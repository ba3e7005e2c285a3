//! 索引构建：后缀数组 → BWT → {C 表, Occ 表, 稀疏 SA} → FM 索引

pub mod bwt;
pub mod fm;
pub mod invert;
pub mod occ;
pub mod psa;
pub mod sa;

use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};
use crate::util::alphabet::DEFAULT_SENTINEL;
pub use occ::OccMode;

/// 默认采样步长（Occ 与 SA 相同）
pub const DEFAULT_STRIDE: usize = 5;

/// 索引构建参数。
///
/// Occ 表与稀疏 SA 的步长相互独立，二者取值不同也能得到正确结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOpt {
    pub sentinel: u8,
    pub occ_mode: OccMode,
    pub occ_stride: usize,
    pub sa_stride: usize,
}

impl Default for IndexOpt {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
            occ_mode: OccMode::Sampled,
            occ_stride: DEFAULT_STRIDE,
            sa_stride: DEFAULT_STRIDE,
        }
    }
}

impl IndexOpt {
    /// 两个表共用同一步长
    pub fn with_stride(stride: usize) -> Self {
        Self { occ_stride: stride, sa_stride: stride, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.occ_stride == 0 {
            return Err(invalid("occ_stride must be at least 1"));
        }
        if self.sa_stride == 0 {
            return Err(invalid("sa_stride must be at least 1"));
        }
        Ok(())
    }
}
