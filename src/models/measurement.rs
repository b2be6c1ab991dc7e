//! # GPC 测量结果数据模型
//!
//! 存储从结果 XML 中提取的按峰索引的物理量（摩尔质量矩、多分散性、均方根半径）。
//!
//! ## 依赖关系
//! - 被 `parsers/results_xml.rs` 填充
//! - 被 `report/` 和 `commands/` 读取

use serde::Serialize;
use std::collections::BTreeMap;

/// 单个峰内的测量集合：测量名 (Mn, Mw, Mw/Mn, rz ...) -> 测量值
pub type PeakRecord = BTreeMap<String, Measurement>;

/// 提取器输出：峰索引 -> 该峰的测量集合
///
/// `BTreeMap` 保证按峰索引升序遍历，索引无需连续。
pub type ResultTable = BTreeMap<u32, PeakRecord>;

/// 单个测量值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// 数值
    pub value: f64,

    /// 单位（多分散性为空字符串）
    pub units: String,

    /// 相对不确定度 (%)，数值为 0 时未定义
    pub uncertainty_pct: Option<f64>,
}

impl Measurement {
    /// 由绝对不确定度构造，自动换算为百分比
    pub fn new(value: f64, units: impl Into<String>, uncertainty: f64) -> Self {
        let uncertainty_pct = if value == 0.0 {
            None
        } else {
            Some(100.0 * uncertainty / value)
        };

        Measurement {
            value,
            units: units.into(),
            uncertainty_pct,
        }
    }
}

/// 结果类型标记 `<result type="...">`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultType {
    MolarMass,
    Polydispersity,
    RmsRadius,
}

impl ResultType {
    /// 所有可识别的结果类型
    pub const ALL: [ResultType; 3] = [
        ResultType::MolarMass,
        ResultType::Polydispersity,
        ResultType::RmsRadius,
    ];

    /// XML 中的类型字符串
    pub fn tag(&self) -> &'static str {
        match self {
            ResultType::MolarMass => "molar mass",
            ResultType::Polydispersity => "polydispersity",
            ResultType::RmsRadius => "rms radius",
        }
    }

    /// 从类型字符串识别，未知类型返回 None
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// 该类型下是否记录给定名称
    ///
    /// rms radius 只记录 `rz`，polydispersity 只记录 `Mw/Mn`，
    /// 其余名称的含义未定义，保持窄过滤。
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            ResultType::MolarMass => true,
            ResultType::Polydispersity => name == "Mw/Mn",
            ResultType::RmsRadius => name == "rz",
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
