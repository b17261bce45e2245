// ==========================================
// 纺织生产经营看板 - 产品分析引擎
// ==========================================
// 职责: 产品物料清单、工序工时明细
// 口径: inner join；未匹配的 ID 直接剔除，结果可为空
// ==========================================

use crate::domain::types::RecordId;
use crate::domain::Product;
use crate::repository::DataStore;
use serde::Serialize;

/// 产品所需物料行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSupplyRow {
    pub supply_id: RecordId,
    pub supply_name: String,
    pub unit: String,
    pub quantity_required: f64,
    pub unit_cost: f64,
}

/// 产品工序工时行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProcessRow {
    pub process_id: RecordId,
    pub process_name: String,
    pub minutes: f64,
    pub cost_per_minute: f64,
}

/// 产品详情（产品分析视图）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub supplies: Vec<ProductSupplyRow>,
    pub process_times: Vec<ProductProcessRow>,
}

// ==========================================
// ProductAnalysisEngine - 产品分析引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct ProductAnalysisEngine;

impl ProductAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// 产品物料清单（物料耗用 ⋈ 物料）
    ///
    /// 保持物料耗用表中的行顺序
    pub fn product_supplies(&self, store: &DataStore, product_id: &RecordId) -> Vec<ProductSupplyRow> {
        store
            .supply_consumption()
            .iter()
            .filter(|c| &c.product_id == product_id)
            .filter_map(|c| {
                let supply = store.supply(&c.supply_id)?;
                Some(ProductSupplyRow {
                    supply_id: supply.supply_id.clone(),
                    supply_name: supply.name.clone(),
                    unit: supply.unit.clone(),
                    quantity_required: c.quantity_required,
                    unit_cost: supply.unit_cost,
                })
            })
            .collect()
    }

    /// 产品工序工时（工序工时 ⋈ 工序）
    pub fn product_process_times(
        &self,
        store: &DataStore,
        product_id: &RecordId,
    ) -> Vec<ProductProcessRow> {
        store
            .process_times()
            .iter()
            .filter(|t| &t.product_id == product_id)
            .filter_map(|t| {
                let process = store.process(&t.process_id)?;
                Some(ProductProcessRow {
                    process_id: process.process_id.clone(),
                    process_name: process.name.clone(),
                    minutes: t.minutes,
                    cost_per_minute: process.cost_per_minute,
                })
            })
            .collect()
    }

    /// 产品详情；产品不存在时返回 None
    pub fn product_detail(&self, store: &DataStore, product_id: &RecordId) -> Option<ProductDetail> {
        let product = store.product(product_id)?.clone();
        tracing::debug!(product_id = %product_id, "计算产品详情");

        Some(ProductDetail {
            supplies: self.product_supplies(store, product_id),
            process_times: self.product_process_times(store, product_id),
            product,
        })
    }
}

impl Default for ProductAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
