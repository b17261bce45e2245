// ==========================================
// 纺织生产经营看板 - 配置层
// ==========================================
// 职责: 看板配置与情景模拟策略常量
// 存储: JSON 配置文件（可选）
// ==========================================

pub mod config_manager;
pub mod simulation_policy;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, ConfigError, ConfigManager, ConfigResult, DashboardConfig, DEFAULT_WORKBOOK_FILE,
};
pub use simulation_policy::{
    LeverBounds, SimulationPolicy, ValidationMode, DEFAULT_PROCESS_COST_SHARE,
    DEFAULT_SUPPLY_COST_SHARE,
};
