//! 查询：精确反向搜索、带错配上限的近似搜索，以及多模式串并行批处理

pub mod approx;
pub mod batch;
pub mod exact;

pub use approx::ApproxHit;
pub use batch::PatternHits;
