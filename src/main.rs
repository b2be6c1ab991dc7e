//! # gpcutil - GPC 结果提取工具
//!
//! 解析 GPC（凝胶渗透色谱）仪器控制软件导出的结果 XML，
//! 提取按峰索引的摩尔质量矩、多分散性与均方根半径，并渲染为摘要报告。
//! 仪器自动化（会话、实验生命周期、数据集导出）不在本工具范围内。
//!
//! ## 子命令
//! - `extract` - 解析单个结果文件
//! - `latest`  - 解析运行目录中最新的结果文件
//! - `batch`   - 并行批量解析
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (结果 XML 提取器)
//!   │     ├── report/    (格式化与导出)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;
use log::LevelFilter;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = commands::run(cli.command) {
        log::debug!("command failed: {:?}", e);
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
