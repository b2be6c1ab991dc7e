//! # 数据模型模块
//!
//! 定义按峰索引的测量结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`report/` 和 `commands/` 使用
//! - 子模块: measurement

pub mod measurement;

pub use measurement::{Measurement, PeakRecord, ResultTable, ResultType};
