//! # GPC 结果 XML 提取器
//!
//! 从仪器控制软件导出的结果文档中提取按峰索引的测量值。
//!
//! ## 测量块格式
//! ```text
//! <result type="molar mass">
//!   <name>Mw</name>
//!   <scalar units="g/mol" uncertainty="98.9" peak="1">21571.63613</scalar>
//! ```
//!
//! - 第 1 行：结果类型 (`molar mass` / `polydispersity` / `rms radius`)
//! - 第 2 行：测量名称
//! - 第 3 行：数值及属性，属性顺序不固定，polydispersity 没有 `units`
//!
//! 文档并非严格的 XML，这里按行扫描而不是构建 DOM。
//! 任何无法识别的块都会被跳过（debug 日志），提取本身永不失败。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`、`batch/` 使用
//! - 使用 `models/measurement.rs`

use crate::models::{Measurement, ResultTable, ResultType};

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// 缺失值标记
pub const MISSING_VALUE_SENTINELS: [&str; 2] = ["n/a", "~Invalid"];

static RESULT_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<result\s+type="([^"]*)"\s*>"#).unwrap());

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<name>(.+?)</name>").unwrap());

static SCALAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<scalar\b([^>]*)>([^<]*)</scalar>").unwrap());

static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][\w.-]*)\s*=\s*"([^"]*)""#).unwrap());

/// 测量块被跳过的原因（仅用于诊断日志）
#[derive(Debug, Clone, PartialEq)]
enum SkipReason {
    Truncated,
    NoName,
    NoScalar,
    Filtered(String),
    MissingAttribute(&'static str),
    InvalidAttribute(&'static str, String),
    MissingValue(String),
    NonNumericValue(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Truncated => write!(f, "block truncated by end of document"),
            SkipReason::NoName => write!(f, "no <name> on following line"),
            SkipReason::NoScalar => write!(f, "no <scalar> two lines below"),
            SkipReason::Filtered(name) => write!(f, "name '{}' not recorded for this type", name),
            SkipReason::MissingAttribute(key) => write!(f, "missing '{}' attribute", key),
            SkipReason::InvalidAttribute(key, raw) => {
                write!(f, "invalid '{}' attribute: '{}'", key, raw)
            }
            SkipReason::MissingValue(raw) => write!(f, "missing value marker '{}'", raw),
            SkipReason::NonNumericValue(raw) => write!(f, "non-numeric value '{}'", raw),
        }
    }
}

/// 一个成功解析的测量块
#[derive(Debug)]
struct ParsedBlock {
    peak: u32,
    name: String,
    measurement: Measurement,
}

/// 从结果文档中提取所有测量值
///
/// 逐行扫描，每一行都重新判断是否为块起点（游标每次前进一行）。
/// 同一峰的多个块会累积到同一个 `PeakRecord`；同峰同名的后出现者覆盖前者。
/// 找不到任何有效块时返回空表。
pub fn extract(content: &str) -> ResultTable {
    let lines: Vec<&str> = content.lines().collect();
    let mut table = ResultTable::new();

    for (i, line) in lines.iter().enumerate() {
        let result_type = match match_result_type(line.trim()) {
            Some(t) => t,
            None => continue,
        };

        let name_line = lines.get(i + 1).copied();
        let scalar_line = lines.get(i + 2).copied();

        match parse_block(result_type, name_line, scalar_line) {
            Ok(block) => {
                table
                    .entry(block.peak)
                    .or_default()
                    .insert(block.name, block.measurement);
            }
            Err(reason) => {
                log::debug!("line {}: skipped '{}' block: {}", i + 1, result_type, reason);
            }
        }
    }

    log::debug!(
        "extracted {} measurement(s) across {} peak(s)",
        table.values().map(|r| r.len()).sum::<usize>(),
        table.len()
    );

    table
}

/// 判断一行是否为可识别的结果类型标记
fn match_result_type(line: &str) -> Option<ResultType> {
    let caps = RESULT_TYPE_RE.captures(line)?;
    ResultType::from_tag(caps.get(1)?.as_str())
}

/// 解析 name 行与 scalar 行
fn parse_block(
    result_type: ResultType,
    name_line: Option<&str>,
    scalar_line: Option<&str>,
) -> Result<ParsedBlock, SkipReason> {
    let (name_line, scalar_line) = match (name_line, scalar_line) {
        (Some(n), Some(s)) => (n.trim(), s.trim()),
        _ => return Err(SkipReason::Truncated),
    };

    let name = NAME_RE
        .captures(name_line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or(SkipReason::NoName)?;

    if !result_type.accepts(&name) {
        return Err(SkipReason::Filtered(name));
    }

    let caps = SCALAR_RE.captures(scalar_line).ok_or(SkipReason::NoScalar)?;
    let attributes = parse_attributes(caps.get(1).map_or("", |m| m.as_str()));
    let value_text = caps.get(2).map_or("", |m| m.as_str()).trim();

    let peak_raw = *attributes
        .get("peak")
        .ok_or(SkipReason::MissingAttribute("peak"))?;
    let peak: u32 = peak_raw
        .trim()
        .parse()
        .map_err(|_| SkipReason::InvalidAttribute("peak", peak_raw.to_string()))?;

    let uncertainty_raw = attributes
        .get("uncertainty")
        .ok_or(SkipReason::MissingAttribute("uncertainty"))?
        .trim();
    if is_missing_value(uncertainty_raw) {
        return Err(SkipReason::MissingValue(uncertainty_raw.to_string()));
    }
    let uncertainty = parse_number(uncertainty_raw)
        .ok_or_else(|| SkipReason::InvalidAttribute("uncertainty", uncertainty_raw.to_string()))?;

    if is_missing_value(value_text) {
        return Err(SkipReason::MissingValue(value_text.to_string()));
    }
    let value = parse_number(value_text)
        .ok_or_else(|| SkipReason::NonNumericValue(value_text.to_string()))?;

    // polydispersity 为无量纲量
    let units = match result_type {
        ResultType::Polydispersity => "",
        _ => attributes.get("units").copied().unwrap_or(""),
    };

    Ok(ParsedBlock {
        peak,
        name,
        measurement: Measurement::new(value, units, uncertainty),
    })
}

/// 将 `key="value"` 属性解析为映射，与属性顺序无关
fn parse_attributes(raw: &str) -> HashMap<&str, &str> {
    ATTR_RE
        .captures_iter(raw)
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect()
}

/// 是否为缺失值标记
pub fn is_missing_value(text: &str) -> bool {
    MISSING_VALUE_SENTINELS.contains(&text.trim())
}

/// 解析有限浮点数（拒绝 NaN / inf 文本）
fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
