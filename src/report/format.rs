//! # 测量值格式化与报告渲染
//!
//! 按仪器软件界面的显示习惯渲染测量值：
//! - 数值 >= 1000 使用科学计数法，如 `2.157e+04`
//! - 其余使用定点小数
//! - 不确定度以百分比附在后面，如 `(±0.5%)`
//!
//! 渲染只依赖 `ResultTable`，与提取过程解耦。
//!
//! ## 依赖关系
//! - 被 `commands/`、`report/export.rs` 使用
//! - 使用 `models/measurement.rs`

use crate::models::{Measurement, PeakRecord, ResultTable};

/// 标准精度（摩尔质量矩、均方根半径）
pub const STANDARD_PRECISION: usize = 1;

/// 扩展精度（多分散性）
pub const EXTENDED_PRECISION: usize = 3;

/// 摩尔质量矩的显示顺序
pub const MASS_MOMENTS: [&str; 3] = ["Mn", "Mw", "Mp"];

/// 多分散性名称
pub const POLYDISPERSITY: &str = "Mw/Mn";

/// z 均均方根半径名称
pub const RMS_RADIUS: &str = "rz";

/// 报告标题栏宽度
pub const BANNER_WIDTH: usize = 50;
const DIVIDER_WIDTH: usize = 30;

/// 报告渲染选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// 摩尔质量矩与半径的小数位数
    pub moment_precision: usize,
    /// 多分散性的小数位数
    pub pdi_precision: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            moment_precision: STANDARD_PRECISION,
            pdi_precision: EXTENDED_PRECISION,
        }
    }
}

/// 格式化单个测量值
///
/// `precision` 同时决定不确定度百分比的小数位数，以及数值 < 1000 时的小数位数。
pub fn format_measurement(value: f64, uncertainty_pct: Option<f64>, precision: usize) -> String {
    let formatted_value = if value >= 1000.0 {
        format_scientific(value, 3)
    } else {
        format!("{:.*}", precision, value)
    };

    match uncertainty_pct {
        Some(pct) => format!("{} (±{:.*}%)", formatted_value, precision, pct),
        None => format!("{} (±n/a)", formatted_value),
    }
}

/// 科学计数法，指数带符号且至少两位 (`e+04`, `e-03`)
pub fn format_scientific(value: f64, digits: usize) -> String {
    let raw = format!("{:.*e}", digits, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

/// 渲染完整报告（所有峰，按峰索引升序）
///
/// 空表只输出标题栏，不含任何峰区段。结尾的分隔线只在终端打印，不写入报告。
pub fn render_report(table: &ResultTable, options: &ReportOptions) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "MOLECULAR WEIGHT ANALYSIS RESULTS".to_string(),
        rule,
    ];

    for (peak, record) in table {
        lines.push(String::new());
        lines.extend(render_peak_section(*peak, record, options));
    }

    lines.join("\n")
}

/// 渲染单个峰的区段，缺失的类别整体省略
pub fn render_peak_section(peak: u32, record: &PeakRecord, options: &ReportOptions) -> Vec<String> {
    let mut lines = vec![format!("Peak {}", peak), "-".repeat(DIVIDER_WIDTH)];

    let moments: Vec<(&str, &Measurement)> = MASS_MOMENTS
        .iter()
        .filter_map(|name| record.get(*name).map(|m| (*name, m)))
        .collect();

    if !moments.is_empty() {
        lines.push("Molar mass moments (g/mol)".to_string());
        lines.push(String::new());
        for (name, m) in moments {
            lines.push(measurement_line(name, m, options.moment_precision));
        }
        lines.push(String::new());
    }

    if let Some(pdi) = record.get(POLYDISPERSITY) {
        lines.push("Polydispersity".to_string());
        lines.push(String::new());
        lines.push(measurement_line(POLYDISPERSITY, pdi, options.pdi_precision));
        lines.push(String::new());
    }

    if let Some(rz) = record.get(RMS_RADIUS) {
        lines.push("RMS radius moments (nm)".to_string());
        lines.push(String::new());
        lines.push(measurement_line(RMS_RADIUS, rz, options.moment_precision));
        lines.push(String::new());
    }

    lines
}

fn measurement_line(name: &str, m: &Measurement, precision: usize) -> String {
    format!(
        "  {}: {}",
        name,
        format_measurement(m.value, m.uncertainty_pct, precision)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::results_xml::extract;

    #[test]
    fn test_format_large_value() {
        let pct = 98.90642754 * 100.0 / 21571.63613;
        let s = format_measurement(21571.63613, Some(pct), STANDARD_PRECISION);
        assert!(s.starts_with("2.157e+04"), "{}", s);
        assert!(s.contains("(±0.5%)"), "{}", s);
    }

    #[test]
    fn test_format_small_value() {
        assert_eq!(format_measurement(22.3, Some(1.2), 1), "22.3 (±1.2%)");
    }

    #[test]
    fn test_format_extended_precision() {
        assert_eq!(format_measurement(2.0, Some(2.0), 3), "2.000 (±2.000%)");
    }

    #[test]
    fn test_format_threshold() {
        assert_eq!(format_measurement(1000.0, Some(1.0), 1), "1.000e+03 (±1.0%)");
        assert_eq!(format_measurement(999.94, Some(1.0), 1), "999.9 (±1.0%)");
    }

    #[test]
    fn test_format_undefined_uncertainty() {
        assert_eq!(format_measurement(0.0, None, 1), "0.0 (±n/a)");
    }

    #[test]
    fn test_format_scientific_exponents() {
        assert_eq!(format_scientific(1.5e6, 3), "1.500e+06");
        assert_eq!(format_scientific(1.234e123, 3), "1.234e+123");
        assert_eq!(format_scientific(0.00123, 3), "1.230e-03");
    }

    fn measurement(value: f64, units: &str, pct: f64) -> Measurement {
        Measurement {
            value,
            units: units.to_string(),
            uncertainty_pct: Some(pct),
        }
    }

    #[test]
    fn test_render_synthetic_table() {
        let mut table = ResultTable::new();
        let mut p2 = PeakRecord::new();
        p2.insert("Mp".to_string(), measurement(12000.0, "g/mol", 1.0));
        p2.insert("Mn".to_string(), measurement(10000.0, "g/mol", 1.5));
        p2.insert("rz".to_string(), measurement(18.4, "nm", 3.2));
        table.insert(2, p2);

        let mut p1 = PeakRecord::new();
        p1.insert("Mw/Mn".to_string(), measurement(1.234, "", 0.5));
        table.insert(1, p1);

        let report = render_report(&table, &ReportOptions::default());

        let peak1 = report.find("Peak 1").unwrap();
        let peak2 = report.find("Peak 2").unwrap();
        assert!(peak1 < peak2);

        // Mn 在 Mp 之前
        assert!(report.find("  Mn:").unwrap() < report.find("  Mp:").unwrap());
        assert!(report.contains("  Mw/Mn: 1.234 (±0.500%)"));
        assert!(report.contains("  rz: 18.4 (±3.2%)"));
        assert!(!report.contains("  Mw:"));

        // 峰 1 没有摩尔质量矩，标题只出现一次（峰 2）
        assert_eq!(report.matches("Molar mass moments (g/mol)").count(), 1);
        assert_eq!(report.matches("RMS radius moments (nm)").count(), 1);
        assert_eq!(report.matches("Polydispersity").count(), 1);
    }

    #[test]
    fn test_render_empty_table() {
        let report = render_report(&ResultTable::new(), &ReportOptions::default());
        assert!(report.contains("MOLECULAR WEIGHT ANALYSIS RESULTS"));
        assert!(!report.contains("Peak"));
        assert_eq!(report.lines().count(), 3);
    }

    #[test]
    fn test_report_has_no_closing_rule() {
        let mut record = PeakRecord::new();
        record.insert("rz".to_string(), measurement(18.4, "nm", 3.2));
        let mut table = ResultTable::new();
        table.insert(1, record);

        let report = render_report(&table, &ReportOptions::default());
        let rule = "=".repeat(BANNER_WIDTH);
        assert_eq!(report.lines().filter(|l| *l == rule).count(), 2);
        assert_ne!(report.lines().last(), Some(rule.as_str()));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let content = r#"<results>
<result type="molar mass">
<name>Mn</name>
<scalar units="g/mol" uncertainty="300" peak="1">15000</scalar>
</result>
<result type="molar mass">
<name>Mw</name>
<scalar units="g/mol" peak="1" uncertainty="600">30000</scalar>
</result>
<result type="polydispersity">
<name>Mw/Mn</name>
<scalar uncertainty="0.04" peak="1">2.0</scalar>
</result>
</results>"#;
        let table = extract(content);
        assert_eq!(table.len(), 1);
        assert_eq!(table[&1].len(), 3);
        assert_eq!(table[&1]["Mn"].units, "g/mol");
        assert_eq!(table[&1]["Mw/Mn"].units, "");

        let report = render_report(&table, &ReportOptions::default());
        assert!(report.contains("Peak 1"));
        assert!(report.contains("  Mn: 1.500e+04 (±2.0%)"));
        assert!(report.contains("  Mw: 3.000e+04 (±2.0%)"));
        assert!(report.contains("2.000 (±2.000%)"));
    }
}
