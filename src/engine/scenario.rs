// ==========================================
// 纺织生产经营看板 - 情景模拟引擎
// ==========================================
// 输入: 基准(成本, 售价) + 四个杠杆
// 输出: 新成本/新售价/新毛利/新毛利率 + 相对基准的差值 + 总利润
// 口径:
// - 成本结构固定拆分：物料 supply_cost_share / 工序 process_cost_share
// - 拆分比例来自 SimulationPolicy，不从数据推导
// - 越界杠杆一律拒绝（截断在 API 层完成）
// ==========================================

use crate::config::SimulationPolicy;
use crate::domain::types::RecordId;
use crate::engine::aggregation::{defined_delta, margin, margin_pct, MeanAccumulator};
use crate::repository::DataStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// 错误类型
// ==========================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("基准值非法: {field} = {value}（必须为非负有限数）")]
    InvalidBaseline { field: &'static str, value: f64 },

    #[error("杠杆 {lever} 越界: {value}（允许范围 [{min}, {max}]）")]
    LeverOutOfRange {
        lever: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;

// ==========================================
// 输入
// ==========================================

/// 模拟基准
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub cost: f64,
    pub price: f64,
}

impl Baseline {
    pub fn new(cost: f64, price: f64) -> Self {
        Self { cost, price }
    }

    fn validate(&self) -> ScenarioResult<()> {
        for (field, value) in [("cost", self.cost), ("price", self.price)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScenarioError::InvalidBaseline { field, value });
            }
        }
        Ok(())
    }
}

/// 模拟杠杆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLevers {
    /// 物料成本降低 (%)
    pub supply_cost_reduction_pct: f64,
    /// 工序效率提升 (%)
    pub process_efficiency_gain_pct: f64,
    /// 售价提升 (%)
    pub price_increase_pct: f64,
    /// 生产量（件）
    pub production_volume: u32,
}

impl ScenarioLevers {
    /// 取策略中的界面初始值
    pub fn defaults_from(policy: &SimulationPolicy) -> Self {
        Self {
            supply_cost_reduction_pct: policy.supply_cost_reduction_pct.default,
            process_efficiency_gain_pct: policy.process_efficiency_gain_pct.default,
            price_increase_pct: policy.price_increase_pct.default,
            production_volume: policy.production_volume.default.round() as u32,
        }
    }
}

impl Default for ScenarioLevers {
    fn default() -> Self {
        Self::defaults_from(&SimulationPolicy::default())
    }
}

// ==========================================
// 输出
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub baseline_cost: f64,
    pub baseline_price: f64,
    pub baseline_margin: f64,
    pub baseline_margin_pct: Option<f64>,

    pub new_cost: f64,
    pub new_price: f64,
    pub new_margin: f64,
    pub new_margin_pct: Option<f64>,

    pub cost_delta: f64,
    pub margin_delta: f64,
    /// 任一侧无定义时为 None
    pub margin_pct_delta: Option<f64>,

    pub production_volume: u32,
    pub baseline_total_profit: f64,
    pub simulated_total_profit: f64,
    pub profit_delta: f64,
}

// ==========================================
// ScenarioSimulator - 情景模拟器
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数（策略只读）
pub struct ScenarioSimulator {
    policy: SimulationPolicy,
}

impl ScenarioSimulator {
    pub fn new(policy: SimulationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SimulationPolicy {
        &self.policy
    }

    /// 执行模拟
    ///
    /// # 错误
    /// - InvalidBaseline: 基准为负或非有限值
    /// - LeverOutOfRange: 任一杠杆不在策略区间内
    pub fn simulate(
        &self,
        baseline: Baseline,
        levers: &ScenarioLevers,
    ) -> ScenarioResult<ScenarioOutcome> {
        baseline.validate()?;
        self.check_levers(levers)?;

        let supply_share = self.policy.supply_cost_share * baseline.cost;
        let process_share = self.policy.process_cost_share * baseline.cost;
        let new_supply_cost = supply_share * (1.0 - levers.supply_cost_reduction_pct / 100.0);
        let new_process_cost =
            process_share * (1.0 - levers.process_efficiency_gain_pct / 100.0);
        let new_cost = new_supply_cost + new_process_cost;
        let new_price = baseline.price * (1.0 + levers.price_increase_pct / 100.0);

        let new_margin = margin(new_price, new_cost);
        let new_margin_pct = margin_pct(new_price, new_cost);
        let baseline_margin = margin(baseline.price, baseline.cost);
        let baseline_margin_pct = margin_pct(baseline.price, baseline.cost);

        let volume = f64::from(levers.production_volume);
        let baseline_total_profit = baseline_margin * volume;
        let simulated_total_profit = new_margin * volume;

        tracing::debug!(
            baseline_cost = baseline.cost,
            baseline_price = baseline.price,
            new_cost,
            new_price,
            "情景模拟完成"
        );

        Ok(ScenarioOutcome {
            baseline_cost: baseline.cost,
            baseline_price: baseline.price,
            baseline_margin,
            baseline_margin_pct,
            new_cost,
            new_price,
            new_margin,
            new_margin_pct,
            cost_delta: new_cost - baseline.cost,
            margin_delta: new_margin - baseline_margin,
            margin_pct_delta: defined_delta(new_margin_pct, baseline_margin_pct),
            production_volume: levers.production_volume,
            baseline_total_profit,
            simulated_total_profit,
            profit_delta: (new_margin - baseline_margin) * volume,
        })
    }

    fn check_levers(&self, levers: &ScenarioLevers) -> ScenarioResult<()> {
        let checks = [
            (
                "supply_cost_reduction_pct",
                levers.supply_cost_reduction_pct,
                &self.policy.supply_cost_reduction_pct,
            ),
            (
                "process_efficiency_gain_pct",
                levers.process_efficiency_gain_pct,
                &self.policy.process_efficiency_gain_pct,
            ),
            (
                "price_increase_pct",
                levers.price_increase_pct,
                &self.policy.price_increase_pct,
            ),
            (
                "production_volume",
                f64::from(levers.production_volume),
                &self.policy.production_volume,
            ),
        ];

        for (lever, value, bounds) in checks {
            if !bounds.contains(value) {
                return Err(ScenarioError::LeverOutOfRange {
                    lever,
                    value,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}

impl Default for ScenarioSimulator {
    fn default() -> Self {
        Self::new(SimulationPolicy::default())
    }
}

/// 模拟基准：指定年份该产品的平均成本与平均售价（两者分别求均值，不做关联）
///
/// 任一侧无记录时返回 None
pub fn simulation_baseline(
    store: &DataStore,
    product_id: &RecordId,
    year: i32,
) -> Option<Baseline> {
    let mut cost = MeanAccumulator::new();
    for c in store.costs(year).iter().filter(|c| &c.product_id == product_id) {
        cost.push(c.total_cost);
    }
    let mut price = MeanAccumulator::new();
    for d in store.demand(year).iter().filter(|d| &d.product_id == product_id) {
        price.push(d.sale_price);
    }

    Some(Baseline::new(cost.mean()?, price.mean()?))
}
