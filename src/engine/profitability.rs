// ==========================================
// 纺织生产经营看板 - 成本与盈利引擎
// ==========================================
// 输入: Cost[year] ⋈ Demand[year] (product_id, month) ⋈ Product
// 输出: 月度均值 / 品类毛利率 / 产品盈利排行
// 口径:
// - margin = price - cost（可为负）
// - margin_pct = 100 × margin / price（price = 0 时无定义）
// - 分组键按键序输出；排行为稳定降序
// ==========================================

use crate::domain::types::{CalendarMonth, RecordId};
use crate::domain::DemandRecord;
use crate::engine::aggregation::{margin, margin_pct, top_n_by, MeanAccumulator};
use crate::repository::DataStore;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// 关联后的明细行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityRow {
    pub product_id: RecordId,
    pub product_name: String,
    pub category: String,
    pub month: CalendarMonth,
    pub cost: f64,
    pub price: f64,
    pub margin: f64,
    pub margin_pct: Option<f64>,
}

/// 年度整体均值（四个指标卡）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilitySummary {
    pub mean_cost: Option<f64>,
    pub mean_price: Option<f64>,
    pub mean_margin: Option<f64>,
    pub mean_margin_pct: Option<f64>,
}

/// 月度均值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProfitability {
    pub month: CalendarMonth,
    pub mean_cost: f64,
    pub mean_price: f64,
    pub mean_margin: f64,
}

/// 品类平均毛利率
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMargin {
    pub category: String,
    pub mean_margin_pct: Option<f64>,
}

/// 产品盈利
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductProfitability {
    pub product_id: RecordId,
    pub product_name: String,
    pub mean_margin_pct: Option<f64>,
    pub mean_margin: f64,
    pub mean_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyProfitability {
    pub year: i32,
    pub row_count: usize,
    pub summary: ProfitabilitySummary,
    pub monthly: Vec<MonthlyProfitability>,
    pub by_category: Vec<CategoryMargin>,
    pub by_product: Vec<ProductProfitability>,
    pub top_by_margin_pct: Vec<ProductProfitability>,
    pub top_by_margin: Vec<ProductProfitability>,
}

// ==========================================
// ProfitabilityEngine - 成本与盈利引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct ProfitabilityEngine {
    top_n: usize,
}

impl ProfitabilityEngine {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// 关联明细行（保持成本表行序；一对多匹配全部展开）
    pub fn joined_rows(&self, store: &DataStore, year: i32) -> Vec<ProfitabilityRow> {
        let mut demand_index: HashMap<(&RecordId, CalendarMonth), Vec<&DemandRecord>> =
            HashMap::new();
        for d in store.demand(year) {
            demand_index
                .entry((&d.product_id, d.month))
                .or_default()
                .push(d);
        }

        let mut rows = Vec::new();
        for cost in store.costs(year) {
            let Some(matches) = demand_index.get(&(&cost.product_id, cost.month)) else {
                continue;
            };
            let Some(product) = store.product(&cost.product_id) else {
                continue;
            };

            for demand in matches {
                rows.push(ProfitabilityRow {
                    product_id: product.product_id.clone(),
                    product_name: product.name.clone(),
                    category: product.category.clone(),
                    month: cost.month,
                    cost: cost.total_cost,
                    price: demand.sale_price,
                    margin: margin(demand.sale_price, cost.total_cost),
                    margin_pct: margin_pct(demand.sale_price, cost.total_cost),
                });
            }
        }
        rows
    }

    /// 年度盈利分析
    pub fn yearly_profitability(&self, store: &DataStore, year: i32) -> YearlyProfitability {
        let rows = self.joined_rows(store, year);
        tracing::debug!(year, rows = rows.len(), "计算年度盈利");

        let by_product = self.by_product(&rows);
        let top_by_margin_pct = top_n_by(&by_product, self.top_n, |p| p.mean_margin_pct);
        let top_by_margin = top_n_by(&by_product, self.top_n, |p| Some(p.mean_margin));

        YearlyProfitability {
            year,
            row_count: rows.len(),
            summary: self.summary(&rows),
            monthly: self.monthly(&rows),
            by_category: self.by_category(&rows),
            by_product,
            top_by_margin_pct,
            top_by_margin,
        }
    }

    fn summary(&self, rows: &[ProfitabilityRow]) -> ProfitabilitySummary {
        let mut cost = MeanAccumulator::new();
        let mut price = MeanAccumulator::new();
        let mut margin = MeanAccumulator::new();
        let mut margin_pct = MeanAccumulator::new();
        for row in rows {
            cost.push(row.cost);
            price.push(row.price);
            margin.push(row.margin);
            margin_pct.push_defined(row.margin_pct);
        }

        ProfitabilitySummary {
            mean_cost: cost.mean(),
            mean_price: price.mean(),
            mean_margin: margin.mean(),
            mean_margin_pct: margin_pct.mean(),
        }
    }

    fn monthly(&self, rows: &[ProfitabilityRow]) -> Vec<MonthlyProfitability> {
        let mut groups: BTreeMap<CalendarMonth, Vec<&ProfitabilityRow>> = BTreeMap::new();
        for row in rows {
            groups.entry(row.month).or_default().push(row);
        }

        groups
            .into_iter()
            .map(|(month, group)| MonthlyProfitability {
                month,
                mean_cost: group_mean(&group, |r| r.cost),
                mean_price: group_mean(&group, |r| r.price),
                mean_margin: group_mean(&group, |r| r.margin),
            })
            .collect()
    }

    fn by_category(&self, rows: &[ProfitabilityRow]) -> Vec<CategoryMargin> {
        let mut groups: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();
        for row in rows {
            groups
                .entry(row.category.as_str())
                .or_default()
                .push_defined(row.margin_pct);
        }

        groups
            .into_iter()
            .map(|(category, acc)| CategoryMargin {
                category: category.to_string(),
                mean_margin_pct: acc.mean(),
            })
            .collect()
    }

    fn by_product(&self, rows: &[ProfitabilityRow]) -> Vec<ProductProfitability> {
        let mut groups: BTreeMap<(&RecordId, &str), Vec<&ProfitabilityRow>> = BTreeMap::new();
        for row in rows {
            groups
                .entry((&row.product_id, row.product_name.as_str()))
                .or_default()
                .push(row);
        }

        groups
            .into_iter()
            .map(|((product_id, product_name), group)| {
                let mut margin_pct = MeanAccumulator::new();
                for row in &group {
                    margin_pct.push_defined(row.margin_pct);
                }
                ProductProfitability {
                    product_id: product_id.clone(),
                    product_name: product_name.to_string(),
                    mean_margin_pct: margin_pct.mean(),
                    mean_margin: group_mean(&group, |r| r.margin),
                    mean_cost: group_mean(&group, |r| r.cost),
                }
            })
            .collect()
    }
}

impl Default for ProfitabilityEngine {
    fn default() -> Self {
        Self::new(10)
    }
}

/// 非空分组的均值
fn group_mean<F>(group: &[&ProfitabilityRow], f: F) -> f64
where
    F: Fn(&ProfitabilityRow) -> f64,
{
    group.iter().map(|r| f(r)).sum::<f64>() / group.len() as f64
}
