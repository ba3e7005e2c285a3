//! # bwt-search
//!
//! 单条参考串上的 Burrows-Wheeler / FM 索引。
//!
//! 本 crate 提供：
//!
//! - **索引构建**：后缀数组（比较排序）→ BWT → C 表 / Occ 表（完整或采样）→ 稀疏后缀数组
//! - **精确匹配**：反向搜索逐字符收缩 SA 区间，经 LF 回溯解析位置
//! - **近似匹配**：带错配上限（Hamming 距离）的分支反向搜索
//! - **BWT 还原**：沿 LF 映射从 BWT 重建原文
//!
//! ## 快速示例
//!
//! ```rust
//! use bwt_search::index::{fm::FmIndex, IndexOpt};
//!
//! let fm = FmIndex::build(b"aacg$", &IndexOpt::default()).unwrap();
//! assert_eq!(fm.bwt_string(), b"g$aac");
//! assert_eq!(fm.exact_match(b"ac").unwrap(), vec![1]);
//! assert!(fm.approximate_match(b"ag", 1).unwrap().contains(&1));
//! assert_eq!(fm.invert().unwrap(), b"aacg$");
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 索引构建（后缀数组、BWT、C/Occ 表、稀疏 SA、FM 索引、BWT 还原）
//! - [`search`] — 精确 / 近似匹配与并行批量查询
//! - [`io`] — 查询数据读取与结果输出
//! - [`util`] — 字母表编码
//! - [`error`] — 错误类型

pub mod error;
pub mod index;
pub mod io;
pub mod search;
pub mod util;

pub use error::{IndexError, Result};
pub use index::fm::FmIndex;
pub use index::IndexOpt;
