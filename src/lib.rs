// ==========================================
// 纺织生产经营看板 - 核心库
// ==========================================
// 数据来源: 17 张工作表的生产经营工作簿（2021-2024）
// 技术栈: Rust + calamine/csv + clap
// 系统定位: 只读分析看板 + 情景模拟 (不回写源数据)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 只读数据表与快照缓存
pub mod repository;

// 引擎层 - 聚合查询与情景模拟
pub mod engine;

// 导入层 - 工作簿加载
pub mod importer;

// 配置层 - 看板配置与模拟策略
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 看板接口
pub mod api;

// 应用层 - 启动装配与终端渲染
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CalendarMonth, DashboardSection, RecordId};

// 领域实体
pub use domain::{
    CapacityRecord, CostRecord, DemandRecord, Process, ProcessTime, Product, Supply,
    SupplyConsumption,
};

// 数据仓储
pub use repository::{DataStore, DataTables, SnapshotCache};

// 引擎
pub use engine::{
    DemandAnalysisEngine, OverviewEngine, ProcessAnalysisEngine, ProductAnalysisEngine,
    ProfitabilityEngine, ScenarioSimulator,
};

// 导入
pub use importer::WorkbookImporter;

// API
pub use api::{DashboardApi, DashboardView, ViewSelection};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "纺织生产经营看板";
