// ==========================================
// 纺织生产经营看板 - API 数据传输对象
// ==========================================
// 职责: 选择输入与视图输出（均可 serde 序列化）
// ==========================================

use crate::domain::types::RecordId;
use crate::domain::DashboardSection;
use crate::engine::{
    DemandSeries, OverviewSummary, ProcessCapacity, ProcessCost, ProcessTimeTotal,
    ProductDetail, ScenarioLevers, ScenarioOutcome, YearlyProfitability,
};
use serde::{Deserialize, Serialize};

// ==========================================
// 输入
// ==========================================

/// 杠杆原始输入（未校验）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeverInput {
    pub supply_cost_reduction_pct: f64,
    pub process_efficiency_gain_pct: f64,
    pub price_increase_pct: f64,
    pub production_volume: f64,
}

impl From<ScenarioLevers> for LeverInput {
    fn from(levers: ScenarioLevers) -> Self {
        Self {
            supply_cost_reduction_pct: levers.supply_cost_reduction_pct,
            process_efficiency_gain_pct: levers.process_efficiency_gain_pct,
            price_increase_pct: levers.price_increase_pct,
            production_volume: f64::from(levers.production_volume),
        }
    }
}

/// 情景模拟请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// 产品名称（选择器展示名称）
    pub product_name: String,
    pub levers: LeverInput,
    /// 本次请求启用截断模式（否则使用配置）
    #[serde(default)]
    pub clamp: bool,
}

/// 看板选择（一个分区 + 该分区需要的参数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewSelection {
    Overview,
    ProductDetail { product_name: String },
    Profitability { year: i32 },
    Demand { product_name: String },
    Processes { year: i32 },
    Simulator(SimulationRequest),
}

impl ViewSelection {
    pub fn section(&self) -> DashboardSection {
        match self {
            ViewSelection::Overview => DashboardSection::Overview,
            ViewSelection::ProductDetail { .. } => DashboardSection::ProductDetail,
            ViewSelection::Profitability { .. } => DashboardSection::Profitability,
            ViewSelection::Demand { .. } => DashboardSection::Demand,
            ViewSelection::Processes { .. } => DashboardSection::Processes,
            ViewSelection::Simulator(_) => DashboardSection::Simulator,
        }
    }
}

// ==========================================
// 输出
// ==========================================

/// 产品选择项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductOption {
    pub product_id: RecordId,
    pub name: String,
}

/// 工序产能视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessesView {
    pub year: i32,
    pub capacity: Vec<ProcessCapacity>,
    pub costs: Vec<ProcessCost>,
    pub time_totals: Vec<ProcessTimeTotal>,
}

/// 情景模拟视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationView {
    pub product_id: RecordId,
    pub product_name: String,
    /// 基准所取年度
    pub baseline_year: i32,
    /// 实际参与计算的杠杆（截断后）
    pub levers: ScenarioLevers,
    pub outcome: ScenarioOutcome,
}

/// 看板视图
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DashboardView {
    Overview(OverviewSummary),
    ProductDetail(ProductDetail),
    Profitability(YearlyProfitability),
    Demand(DemandSeries),
    Processes(ProcessesView),
    Simulator(SimulationView),
}

impl DashboardView {
    pub fn section(&self) -> DashboardSection {
        match self {
            DashboardView::Overview(_) => DashboardSection::Overview,
            DashboardView::ProductDetail(_) => DashboardSection::ProductDetail,
            DashboardView::Profitability(_) => DashboardSection::Profitability,
            DashboardView::Demand(_) => DashboardSection::Demand,
            DashboardView::Processes(_) => DashboardSection::Processes,
            DashboardView::Simulator(_) => DashboardSection::Simulator,
        }
    }
}
