// ==========================================
// 纺织生产经营看板 - 工序产能
// ==========================================
// 依据: 数据模型 - Capacity[year]
// ==========================================

use crate::domain::types::CalendarMonth;
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityRecord - 工序可用产能
// ==========================================
// 按工序名称关联 (源表无工序ID)
// 同一工序一年内可有多行 (通常按月)，分析时取均值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecord {
    pub process_name: String,
    pub year: i32,
    pub month: Option<CalendarMonth>, // 源表可选列
    pub available_minutes: f64,       // 可用分钟
    pub available_operators: f64,     // 可用操作工人数
}
