// ==========================================
// 纺织生产经营看板 - 总体概览引擎
// ==========================================
// 输出: 主数据规模、品类/产品线分布、生产时间分布（箱线图）
// ==========================================

use crate::domain::types::period_label;
use crate::engine::aggregation::{mean, quantile};
use crate::repository::DataStore;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 分类计数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountBucket {
    pub label: String,
    pub count: usize,
}

/// 数值分布（箱线图五数 + 均值）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl DistributionSummary {
    /// 空集合返回 None
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            count: sorted.len(),
            min: *sorted.first()?,
            q1: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q3: quantile(&sorted, 0.75)?,
            max: *sorted.last()?,
            mean: mean(sorted.iter().copied())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewSummary {
    pub total_products: usize,
    pub total_supplies: usize,
    pub total_processes: usize,
    pub total_categories: usize,
    pub period: String,
    pub products_by_category: Vec<CountBucket>,
    pub products_by_line: Vec<CountBucket>,
    /// 总生产时间分布；无产品时为 None
    pub production_time: Option<DistributionSummary>,
}

// ==========================================
// OverviewEngine - 总体概览引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct OverviewEngine;

impl OverviewEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, store: &DataStore) -> OverviewSummary {
        let products = store.products();

        let categories: BTreeSet<&str> = products.iter().map(|p| p.category.as_str()).collect();
        let production_minutes: Vec<f64> =
            products.iter().map(|p| p.total_production_min).collect();

        OverviewSummary {
            total_products: products.len(),
            total_supplies: store.supplies().len(),
            total_processes: store.processes().len(),
            total_categories: categories.len(),
            period: period_label(),
            products_by_category: count_by(products.iter().map(|p| p.category.as_str())),
            products_by_line: count_by(products.iter().map(|p| p.line.as_str())),
            production_time: DistributionSummary::from_values(&production_minutes),
        }
    }
}

impl Default for OverviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 计数（按数量降序，数量相同按名称升序）
fn count_by<'a, I>(labels: I) -> Vec<CountBucket>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut buckets: Vec<CountBucket> = counts
        .into_iter()
        .map(|(label, count)| CountBucket {
            label: label.to_string(),
            count,
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}
