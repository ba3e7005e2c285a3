//! 索引构建与查询的错误类型。
//!
//! "未找到" 不是错误：两个匹配器都以空结果表示没有命中。

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// 调用方输入不合法（缺失/重复的哨兵、空模式串、非法步长等）
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 索引内部不变量被破坏（LF 环长度不对、表尺寸不一致），属于构建缺陷
    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;

pub(crate) fn invalid(msg: impl Into<String>) -> IndexError {
    IndexError::InvalidInput(msg.into())
}

pub(crate) fn corrupt(msg: impl Into<String>) -> IndexError {
    IndexError::CorruptIndex(msg.into())
}
