// ==========================================
// 纺织生产经营看板 - 领域类型定义
// ==========================================
// 依据: 数据模型 - 月份日历序 / 代理主键 / 看板分区
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization as _;

// ==========================================
// 数据覆盖年份
// ==========================================
// 工作簿固定包含 2021-2024 四个年度的需求/产能/成本表
pub const SUPPORTED_YEARS: [i32; 4] = [2021, 2022, 2023, 2024];

/// 最近一个数据年度（情景模拟基线取该年）
pub fn latest_year() -> i32 {
    SUPPORTED_YEARS[SUPPORTED_YEARS.len() - 1]
}

/// 年份是否在工作簿覆盖范围内
pub fn is_supported_year(year: i32) -> bool {
    SUPPORTED_YEARS.contains(&year)
}

/// 覆盖期间标签，如 "2021-2024"
pub fn period_label() -> String {
    format!("{}-{}", SUPPORTED_YEARS[0], latest_year())
}

// ==========================================
// 日历月份 (Calendar Month)
// ==========================================
// 顺序: 一月 < 二月 < ... < 十二月（按日历序，而非字母序）
// 序列化格式: 西班牙语月份名（与源数据一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalendarMonth {
    #[serde(rename = "Enero")]
    January,
    #[serde(rename = "Febrero")]
    February,
    #[serde(rename = "Marzo")]
    March,
    #[serde(rename = "Abril")]
    April,
    #[serde(rename = "Mayo")]
    May,
    #[serde(rename = "Junio")]
    June,
    #[serde(rename = "Julio")]
    July,
    #[serde(rename = "Agosto")]
    August,
    #[serde(rename = "Septiembre")]
    September,
    #[serde(rename = "Octubre")]
    October,
    #[serde(rename = "Noviembre")]
    November,
    #[serde(rename = "Diciembre")]
    December,
}

impl CalendarMonth {
    /// 全部月份（日历序）
    pub const ALL: [CalendarMonth; 12] = [
        CalendarMonth::January,
        CalendarMonth::February,
        CalendarMonth::March,
        CalendarMonth::April,
        CalendarMonth::May,
        CalendarMonth::June,
        CalendarMonth::July,
        CalendarMonth::August,
        CalendarMonth::September,
        CalendarMonth::October,
        CalendarMonth::November,
        CalendarMonth::December,
    ];

    /// 月份序号 (1-12)
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// 由月份序号构造
    pub fn from_number(number: u32) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Self::ALL[(number - 1) as usize])
        } else {
            None
        }
    }

    /// 源数据中的月份名称
    pub fn spanish_name(self) -> &'static str {
        match self {
            CalendarMonth::January => "Enero",
            CalendarMonth::February => "Febrero",
            CalendarMonth::March => "Marzo",
            CalendarMonth::April => "Abril",
            CalendarMonth::May => "Mayo",
            CalendarMonth::June => "Junio",
            CalendarMonth::July => "Julio",
            CalendarMonth::August => "Agosto",
            CalendarMonth::September => "Septiembre",
            CalendarMonth::October => "Octubre",
            CalendarMonth::November => "Noviembre",
            CalendarMonth::December => "Diciembre",
        }
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spanish_name())
    }
}

impl FromStr for CalendarMonth {
    type Err = String;

    /// 解析月份: 支持西班牙语月份名（不区分大小写与重音，兼容 "Setiembre"）及数字 1-12
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();

        if let Ok(number) = normalized.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| format!("月份序号越界: {}", s));
        }

        let month = match normalized.as_str() {
            "enero" => CalendarMonth::January,
            "febrero" => CalendarMonth::February,
            "marzo" => CalendarMonth::March,
            "abril" => CalendarMonth::April,
            "mayo" => CalendarMonth::May,
            "junio" => CalendarMonth::June,
            "julio" => CalendarMonth::July,
            "agosto" => CalendarMonth::August,
            "septiembre" | "setiembre" => CalendarMonth::September,
            "octubre" => CalendarMonth::October,
            "noviembre" => CalendarMonth::November,
            "diciembre" => CalendarMonth::December,
            _ => return Err(format!("无法识别的月份: {}", s)),
        };
        Ok(month)
    }
}

// ==========================================
// 代理主键 (Record Id)
// ==========================================
// 源数据 ID 可能是纯数字 (1, 2, 10) 或编码 (P001)
// 排序: 纯数字按数值比较，其余按字典序；数字 ID 排在编码 ID 之前
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric_value(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_value(), other.numeric_value()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::new(value)
    }
}

// ==========================================
// 看板分区 (Dashboard Section)
// ==========================================
// 六个可导航视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardSection {
    Overview,      // 总体概览
    ProductDetail, // 产品分析
    Profitability, // 成本与盈利
    Demand,        // 需求与季节性
    Processes,     // 工序产能
    Simulator,     // 情景模拟
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 6] = [
        DashboardSection::Overview,
        DashboardSection::ProductDetail,
        DashboardSection::Profitability,
        DashboardSection::Demand,
        DashboardSection::Processes,
        DashboardSection::Simulator,
    ];

    /// 国际化标题键
    pub fn title_key(self) -> &'static str {
        match self {
            DashboardSection::Overview => "section.overview",
            DashboardSection::ProductDetail => "section.product_detail",
            DashboardSection::Profitability => "section.profitability",
            DashboardSection::Demand => "section.demand",
            DashboardSection::Processes => "section.processes",
            DashboardSection::Simulator => "section.simulator",
        }
    }
}

impl fmt::Display for DashboardSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardSection::Overview => write!(f, "OVERVIEW"),
            DashboardSection::ProductDetail => write!(f, "PRODUCT_DETAIL"),
            DashboardSection::Profitability => write!(f, "PROFITABILITY"),
            DashboardSection::Demand => write!(f, "DEMAND"),
            DashboardSection::Processes => write!(f, "PROCESSES"),
            DashboardSection::Simulator => write!(f, "SIMULATOR"),
        }
    }
}
