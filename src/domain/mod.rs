// ==========================================
// 纺织生产经营看板 - 领域模型层
// ==========================================
// 依据: 数据模型 - 主数据 / 关联表 / 年度事实表
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含分析逻辑
// ==========================================

pub mod capacity;
pub mod cost;
pub mod demand;
pub mod product;
pub mod types;

// 重导出核心类型
pub use capacity::CapacityRecord;
pub use cost::CostRecord;
pub use demand::DemandRecord;
pub use product::{Process, ProcessTime, Product, Supply, SupplyConsumption};
pub use types::{CalendarMonth, DashboardSection, RecordId};
