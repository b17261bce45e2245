// ==========================================
// 纺织生产经营看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入/配置/模拟错误转换为用户可读的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::engine::ScenarioError;
use crate::importer::ImportError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 选择输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 杠杆校验失败（严格模式，带逐项原因）
    #[error("杠杆校验失败: {reason}")]
    LeverValidationError {
        reason: String,
        violations: Vec<LeverViolation>,
    },

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("数据加载失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("情景模拟失败: {0}")]
    ScenarioError(#[from] ScenarioError),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 杠杆违规详情
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverViolation {
    /// 杠杆名称
    pub lever: String,
    /// 输入值（非有限值序列化为 null）
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// 违规原因
    pub reason: String,
}
