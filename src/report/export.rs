//! # 结果导出
//!
//! ## 支持格式
//! - TXT: `render_report` 生成的摘要报告（UTF-8，`\n` 分隔）
//! - CSV: 每个 (峰, 测量名) 一行的扁平表
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{GpcError, Result};
use crate::models::ResultTable;

use std::fs;
use std::path::Path;

/// 保存报告文本
///
/// 单次写入，失败直接上报，不重试。
pub fn write_report(report: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, report).map_err(|e| GpcError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 导出结果表为 CSV
pub fn table_to_csv(table: &ResultTable, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["peak", "name", "value", "units", "uncertainty_pct"])?;

    for (peak, record) in table {
        for (name, m) in record {
            wtr.write_record(&[
                peak.to_string(),
                name.clone(),
                m.value.to_string(),
                m.units.clone(),
                m.uncertainty_pct
                    .map(|p| format!("{:.6}", p))
                    .unwrap_or_default(),
            ])?;
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
    use crate::models::{Measurement, PeakRecord};

    #[test]
    fn test_table_to_csv() {
        let mut record = PeakRecord::new();
        record.insert("Mn".to_string(), Measurement::new(15000.0, "g/mol", 300.0));
        record.insert("rz".to_string(), Measurement::new(0.0, "nm", 0.1));
        let mut table = ResultTable::new();
        table.insert(1, record);

        let path = std::env::temp_dir().join(format!("gpcutil-table-{}.csv", std::process::id()));
        table_to_csv(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "peak,name,value,units,uncertainty_pct");
        assert_eq!(lines[1], "1,Mn,15000,g/mol,2.000000");
        assert_eq!(lines[2], "1,rz,0,nm,");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_write_report_to_missing_dir() {
        let err = write_report("x", Path::new("/nonexistent/dir/summary.txt")).unwrap_err();
        assert!(matches!(err, GpcError::FileWriteError { .. }));
    }
}
