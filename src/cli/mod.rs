//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `extract`: 解析单个结果 XML 并显示/保存摘要
//! - `latest`: 在运行目录中找到最新的结果 XML 并解析
//! - `batch`: 批量解析目录下的结果 XML
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: extract, batch

pub mod batch;
pub mod extract;

use clap::{ArgAction, Parser, Subcommand};

/// gpcutil - GPC 结果提取工具
#[derive(Parser)]
#[command(name = "gpcutil")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Extract molar mass, polydispersity and RMS radius results from GPC XML exports", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Extract peak results from a single XML results file
    Extract(extract::ExtractArgs),

    /// Extract the most recent results file in a run folder
    Latest(extract::LatestArgs),

    /// Extract every results file under a directory in parallel
    Batch(batch::BatchArgs),
}
