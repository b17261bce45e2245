// ==========================================
// 纺织生产经营看板 - 年度需求
// ==========================================
// 依据: 数据模型 - Demand[year]
// ==========================================

use crate::domain::types::{CalendarMonth, RecordId};
use serde::{Deserialize, Serialize};

// ==========================================
// DemandRecord - 月度需求与售价
// ==========================================
// 主键: (product_id, month, year)
// year 取自所在工作表 (DEMANDA_<year>)，不依赖行位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    pub product_id: RecordId,
    pub month: CalendarMonth,
    pub year: i32,
    pub min_demand: f64,             // 最低需求 (件)
    pub max_demand: f64,             // 最高需求 (件)
    pub sale_price: f64,             // 售价 (S/)
}
