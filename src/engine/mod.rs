// ==========================================
// 纺织生产经营看板 - 引擎层
// ==========================================
// 依据: 数据模型 - 聚合查询 / 情景模拟
// ==========================================
// 职责: 基于只读数据表的统计查询与情景模拟
// 红线: Engine 不读文件、不改数据，输出只依赖 (数据表, 选择)
// ==========================================

pub mod aggregation;
pub mod demand_analysis;
pub mod overview;
pub mod process_analysis;
pub mod product_analysis;
pub mod profitability;
pub mod scenario;

// 重导出核心引擎
pub use demand_analysis::{DemandAnalysisEngine, DemandPoint, DemandSeries, SeasonalityPoint};
pub use overview::{CountBucket, DistributionSummary, OverviewEngine, OverviewSummary};
pub use process_analysis::{ProcessAnalysisEngine, ProcessCapacity, ProcessCost, ProcessTimeTotal};
pub use product_analysis::{
    ProductAnalysisEngine, ProductDetail, ProductProcessRow, ProductSupplyRow,
};
pub use profitability::{
    CategoryMargin, MonthlyProfitability, ProductProfitability, ProfitabilityEngine,
    ProfitabilityRow, ProfitabilitySummary, YearlyProfitability,
};
pub use scenario::{
    simulation_baseline, Baseline, ScenarioError, ScenarioLevers, ScenarioOutcome,
    ScenarioResult, ScenarioSimulator,
};
