//! # extract / latest 命令实现
//!
//! 解析单个结果 XML，在终端显示摘要，并可保存为文本/CSV。
//!
//! ## 功能
//! - `extract`: 指定结果文件
//! - `latest`: 在运行目录中选取最新的结果文件
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `parsers/`, `report/`
//! - 使用 `utils/output.rs`

use crate::cli::extract::{ExtractArgs, LatestArgs, ReportArgs};
use crate::error::{GpcError, Result};
use crate::models::ResultTable;
use crate::parsers;
use crate::report::format::BANNER_WIDTH;
use crate::report::{export, render_report};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// `latest --save` 的摘要文件名
pub const SUMMARY_FILE_NAME: &str = "molecular_weight_summary.txt";

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting GPC Results");

    if !args.input.is_file() {
        return Err(GpcError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    output::print_info(&format!("Reading results from '{}'", args.input.display()));
    let table = parsers::parse_results_file(&args.input)?;

    present(&table, &args.report, args.report.output.as_deref())
}

/// 执行 latest 命令
pub fn execute_latest(args: LatestArgs) -> Result<()> {
    output::print_header("Extracting Latest GPC Results");

    let path = parsers::find_latest_results(&args.dir, &args.pattern)?;
    output::print_info(&format!("Latest results file: '{}'", path.display()));

    let table = parsers::parse_results_file(&path)?;

    present(&table, &args.report, summary_path(&args).as_deref())
}

/// latest 的摘要保存路径：显式 --output 优先于 --save
fn summary_path(args: &LatestArgs) -> Option<PathBuf> {
    args.report
        .output
        .clone()
        .or_else(|| args.save.then(|| args.dir.join(SUMMARY_FILE_NAME)))
}

/// 显示并按需保存提取结果
fn present(table: &ResultTable, report: &ReportArgs, summary_path: Option<&Path>) -> Result<()> {
    if table.is_empty() {
        output::print_warning("No molecular weight data found in results file");
        return Ok(());
    }

    let count: usize = table.values().map(|r| r.len()).sum();
    output::print_info(&format!(
        "Found {} measurement(s) across {} peak(s)",
        count,
        table.len()
    ));

    let text = render_report(table, &report.options());

    if !report.quiet {
        println!("\n{}\n{}\n", text, "=".repeat(BANNER_WIDTH));
    }

    if let Some(path) = summary_path {
        export::write_report(&text, path)?;
        output::print_success(&format!("Summary saved to '{}'", path.display()));
    }

    if let Some(ref csv_path) = report.csv {
        export::table_to_csv(table, csv_path)?;
        output::print_success(&format!("Table exported to '{}'", csv_path.display()));
    }

    output::print_done("Molecular weight values extracted");
    Ok(())
}
