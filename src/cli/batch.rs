//! # batch 子命令 CLI 定义
//!
//! 批量解析结果 XML 并汇总各峰的关键指标。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use crate::parsers::DEFAULT_RESULTS_PATTERN;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Results file or directory containing results files
    pub input: PathBuf,

    /// Glob pattern(s) for results files, comma separated
    #[arg(short, long, default_value = DEFAULT_RESULTS_PATTERN)]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Write the per-peak summary to this CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,
}
