//! 查询数据读取与结果输出

pub mod dataset;
