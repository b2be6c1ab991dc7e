//! # extract / latest 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/extract.rs`

use crate::parsers::DEFAULT_RESULTS_PATTERN;
use crate::report::format::{EXTENDED_PRECISION, STANDARD_PRECISION};
use crate::report::ReportOptions;

use clap::Args;
use std::path::PathBuf;

/// 报告输出相关参数（extract 与 latest 共用）
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Save the text summary to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export the extracted table as CSV (peak, name, value, units, uncertainty_pct)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Decimal places for molar mass and radius uncertainties, and for values below 1000
    #[arg(long, default_value_t = STANDARD_PRECISION)]
    pub mass_precision: usize,

    /// Decimal places for polydispersity value and uncertainty
    #[arg(long, default_value_t = EXTENDED_PRECISION)]
    pub pdi_precision: usize,

    /// Do not print the summary to the terminal
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

impl ReportArgs {
    /// 转换为渲染选项
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            moment_precision: self.mass_precision,
            pdi_precision: self.pdi_precision,
        }
    }
}

/// extract 子命令参数
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// XML results file exported by the instrument software
    pub input: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// latest 子命令参数
#[derive(Args, Debug)]
pub struct LatestArgs {
    /// Run folder containing exported results files
    #[arg(env = "GPCUTIL_RESULTS_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Glob pattern for results files
    #[arg(short, long, default_value = DEFAULT_RESULTS_PATTERN)]
    pub pattern: String,

    /// Save the summary as 'molecular_weight_summary.txt' in the run folder
    #[arg(long, default_value_t = false)]
    pub save: bool,

    #[command(flatten)]
    pub report: ReportArgs,
}
