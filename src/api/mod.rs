// ==========================================
// 纺织生产经营看板 - API 层
// ==========================================
// 职责: 提供看板业务接口,供命令行界面调用
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use dto::{
    DashboardView, LeverInput, ProcessesView, ProductOption, SimulationRequest, SimulationView,
    ViewSelection,
};
pub use error::{ApiError, ApiResult, LeverViolation};
pub use validator::{LeverValidator, ValidationMode};
