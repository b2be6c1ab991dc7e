//! # 报告模块
//!
//! 将提取结果渲染为可读文本，并导出为文本/CSV 文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: format, export

pub mod export;
pub mod format;

pub use format::{format_measurement, render_report, ReportOptions};
