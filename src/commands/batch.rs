//! # batch 命令实现
//!
//! 批量解析结果 XML，汇总各峰的 Mn / Mw / PDI / rz。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 并行解析（rayon）
//! - 终端表格与 CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `parsers/`, `report/format.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::error::{GpcError, Result};
use crate::models::{PeakRecord, ResultTable};
use crate::parsers;
use crate::report::format::{POLYDISPERSITY, RMS_RADIUS};
use crate::report::{format_measurement, ReportOptions};
use crate::utils::output;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 终端汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Peak")]
    peak: u32,
    #[tabled(rename = "Mn (g/mol)")]
    mn: String,
    #[tabled(rename = "Mw (g/mol)")]
    mw: String,
    #[tabled(rename = "Mw/Mn")]
    pdi: String,
    #[tabled(rename = "rz (nm)")]
    rz: String,
}

/// CSV 汇总行
#[derive(Debug, Clone, Serialize)]
struct CsvRow {
    file: String,
    peak: u32,
    mn: Option<f64>,
    mw: Option<f64>,
    mw_mn: Option<f64>,
    rz: Option<f64>,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch GPC Results Extraction");

    if !args.input.exists() {
        return Err(GpcError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No results files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} results files", files.len()));

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, process_file)?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} file(s), {} extracted, {} without data, {} failed",
        result.total(),
        result.success(),
        result.skipped,
        result.failed()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    if result.outputs.is_empty() {
        return Ok(());
    }

    let options = ReportOptions::default();
    let rows: Vec<SummaryRow> = result
        .outputs
        .iter()
        .flat_map(|(path, table)| summary_rows(path, table, &options))
        .collect();

    output::print_header("Per-Peak Summary");
    println!("{}", Table::new(&rows));

    if let Some(ref csv_path) = args.output_csv {
        save_summary_csv(&result.outputs, csv_path)?;
        output::print_success(&format!("Summary saved to '{}'", csv_path.display()));
    }

    Ok(())
}

/// 处理单个结果文件
fn process_file(path: &PathBuf) -> ProcessResult<(PathBuf, ResultTable)> {
    match parsers::parse_results_file(path) {
        Ok(table) if table.is_empty() => {
            ProcessResult::Skipped(format!("No measurements in {}", path.display()))
        }
        Ok(table) => ProcessResult::Success((path.clone(), table)),
        Err(e) => ProcessResult::Failed(path.display().to_string(), e.to_string()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn summary_rows(path: &Path, table: &ResultTable, options: &ReportOptions) -> Vec<SummaryRow> {
    let file = display_name(path);
    let cell = |record: &PeakRecord, name: &str, precision: usize| {
        record
            .get(name)
            .map(|m| format_measurement(m.value, m.uncertainty_pct, precision))
            .unwrap_or_else(|| "-".to_string())
    };

    table
        .iter()
        .map(|(peak, record)| SummaryRow {
            file: file.clone(),
            peak: *peak,
            mn: cell(record, "Mn", options.moment_precision),
            mw: cell(record, "Mw", options.moment_precision),
            pdi: cell(record, POLYDISPERSITY, options.pdi_precision),
            rz: cell(record, RMS_RADIUS, options.moment_precision),
        })
        .collect()
}

/// 保存汇总 CSV
fn save_summary_csv(outputs: &[(PathBuf, ResultTable)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (path, table) in outputs {
        let file = path.display().to_string();
        for (peak, record) in table {
            let value = |name: &str| record.get(name).map(|m| m.value);
            wtr.serialize(CsvRow {
                file: file.clone(),
                peak: *peak,
                mn: value("Mn"),
                mw: value("Mw"),
                mw_mn: value(POLYDISPERSITY),
                rz: value(RMS_RADIUS),
            })?;
        }
    }

    wtr.flush().map_err(|e| GpcError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    #[test]
    fn test_summary_rows() {
        let mut record = PeakRecord::new();
        record.insert("Mn".to_string(), Measurement::new(15000.0, "g/mol", 300.0));
        record.insert("Mw/Mn".to_string(), Measurement::new(2.0, "", 0.04));
        let mut table = ResultTable::new();
        table.insert(1, record);
        table.insert(3, PeakRecord::new());

        let rows = summary_rows(
            Path::new("/data/run/results_1.xml"),
            &table,
            &ReportOptions::default(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].file, "results_1.xml");
        assert_eq!(rows[0].mn, "1.500e+04 (±2.0%)");
        assert_eq!(rows[0].mw, "-");
        assert_eq!(rows[0].pdi, "2.000 (±2.000%)");
        assert_eq!(rows[1].peak, 3);
        assert_eq!(rows[1].rz, "-");
    }

    #[test]
    fn test_process_file_without_data_is_skipped() {
        let path = std::env::temp_dir().join(format!("gpcutil-empty-{}.xml", std::process::id()));
        std::fs::write(&path, "<results/>\n").unwrap();

        assert!(matches!(process_file(&path), ProcessResult::Skipped(_)));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_process_missing_file_fails() {
        let path = PathBuf::from("/nonexistent/results.xml");
        assert!(matches!(process_file(&path), ProcessResult::Failed(_, _)));
    }
}
