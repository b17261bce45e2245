// ==========================================
// 纺织生产经营看板 - 产品/物料/工序主数据
// ==========================================
// 依据: 数据模型 - Product / Supply / Process 及两张关联表
// ==========================================

use crate::domain::types::RecordId;
use serde::{Deserialize, Serialize};

// ==========================================
// Product - 产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: RecordId,        // 产品ID
    pub name: String,                // 产品名称
    pub category: String,            // 品类
    pub line: String,                // 产品线
    pub total_production_min: f64,   // 总生产时间 (分钟)
}

// ==========================================
// Supply - 物料 (Insumo)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub supply_id: RecordId,         // 物料ID
    pub name: String,                // 物料名称
    pub unit: String,                // 计量单位
    pub unit_cost: f64,              // 单位成本 (S/)
}

// ==========================================
// Process - 工序
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub process_id: RecordId,        // 工序ID
    pub name: String,                // 工序名称
    pub cost_per_minute: f64,        // 每分钟成本 (S/)
}

// ==========================================
// SupplyConsumption - 物料耗用 (产品 × 物料)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyConsumption {
    pub product_id: RecordId,
    pub supply_id: RecordId,
    pub quantity_required: f64,      // 单件需求量
}

// ==========================================
// ProcessTime - 工序工时 (产品 × 工序)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTime {
    pub product_id: RecordId,
    pub process_id: RecordId,
    pub minutes: f64,                // 单件所需分钟
}
