// ==========================================
// 纺织生产经营看板 - 年度成本
// ==========================================
// 依据: 数据模型 - Cost[year]
// ==========================================

use crate::domain::types::{CalendarMonth, RecordId};
use serde::{Deserialize, Serialize};

// ==========================================
// CostRecord - 月度单位总成本
// ==========================================
// 主键: (product_id, month, year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub product_id: RecordId,
    pub month: CalendarMonth,
    pub year: i32,
    pub total_cost: f64,             // 总成本 (S/)
}
