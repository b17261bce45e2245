// ==========================================
// 纺织生产经营看板 - 需求与季节性引擎
// ==========================================
// 输入: 全部年度 Demand 表
// 输出: 产品月度需求序列 + 跨年季节性曲线
// 口径: 年份取自记录本身（来源工作表），不按行位置推断
// ==========================================

use crate::domain::types::{CalendarMonth, RecordId};
use crate::domain::DemandRecord;
use crate::repository::DataStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// 月度需求点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandPoint {
    pub year: i32,
    pub month: CalendarMonth,
    pub min_demand: f64,
    pub max_demand: f64,
    pub sale_price: f64,
}

/// 季节性曲线点（跨年均值）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalityPoint {
    pub month: CalendarMonth,
    pub mean_min_demand: f64,
    pub mean_max_demand: f64,
    /// 参与平均的记录数
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemandSeries {
    pub product_id: RecordId,
    /// 按日历月排序；同月内按年份升序
    pub points: Vec<DemandPoint>,
    pub seasonality: Vec<SeasonalityPoint>,
}

// ==========================================
// DemandAnalysisEngine - 需求分析引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct DemandAnalysisEngine;

impl DemandAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn demand_series(&self, store: &DataStore, product_id: &RecordId) -> DemandSeries {
        let mut records: Vec<&DemandRecord> = store
            .all_demand()
            .filter(|d| &d.product_id == product_id)
            .collect();
        // 稳定排序：月份为主键，年份为次键
        records.sort_by_key(|d| (d.month, d.year));

        tracing::debug!(product_id = %product_id, points = records.len(), "计算需求序列");

        DemandSeries {
            product_id: product_id.clone(),
            points: records
                .iter()
                .map(|d| DemandPoint {
                    year: d.year,
                    month: d.month,
                    min_demand: d.min_demand,
                    max_demand: d.max_demand,
                    sale_price: d.sale_price,
                })
                .collect(),
            seasonality: self.seasonality(&records),
        }
    }

    /// 跨年季节性曲线（无数据的月份不输出）
    fn seasonality(&self, records: &[&DemandRecord]) -> Vec<SeasonalityPoint> {
        let mut groups: BTreeMap<CalendarMonth, Vec<&DemandRecord>> = BTreeMap::new();
        for d in records {
            groups.entry(d.month).or_default().push(*d);
        }

        groups
            .into_iter()
            .map(|(month, group)| {
                let n = group.len() as f64;
                SeasonalityPoint {
                    month,
                    mean_min_demand: group.iter().map(|d| d.min_demand).sum::<f64>() / n,
                    mean_max_demand: group.iter().map(|d| d.max_demand).sum::<f64>() / n,
                    samples: group.len(),
                }
            })
            .collect()
    }
}

impl Default for DemandAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
