use serde::{Deserialize, Serialize};

/// 物料成本占比（固定成本结构假设）
pub const DEFAULT_SUPPLY_COST_SHARE: f64 = 0.6;

/// 工序成本占比（固定成本结构假设）
pub const DEFAULT_PROCESS_COST_SHARE: f64 = 0.4;

/// 杠杆取值区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeverBounds {
    pub min: f64,
    pub max: f64,
    /// 界面初始值
    pub default: f64,
}

impl LeverBounds {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// 是否在区间内（含端点；NaN 视为越界）
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// 截断到区间内
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn is_well_formed(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && self.contains(self.default)
    }
}

/// 杠杆校验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// 严格模式：越界即拒绝
    #[default]
    Strict,
    /// 截断模式：越界值截断到边界（记录告警）
    Clamp,
}

/// 情景模拟策略（成本结构 + 杠杆边界）
///
/// 存储位置：配置文件 `simulation` 节；缺省即为下列默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationPolicy {
    /// 成本中物料部分占比
    pub supply_cost_share: f64,

    /// 成本中工序部分占比
    pub process_cost_share: f64,

    /// 物料成本降低 (%)
    pub supply_cost_reduction_pct: LeverBounds,

    /// 工序效率提升 (%)
    pub process_efficiency_gain_pct: LeverBounds,

    /// 售价提升 (%)
    pub price_increase_pct: LeverBounds,

    /// 生产量 (件)
    pub production_volume: LeverBounds,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            supply_cost_share: DEFAULT_SUPPLY_COST_SHARE,
            process_cost_share: DEFAULT_PROCESS_COST_SHARE,
            supply_cost_reduction_pct: LeverBounds::new(0.0, 30.0, 0.0),
            process_efficiency_gain_pct: LeverBounds::new(0.0, 20.0, 0.0),
            price_increase_pct: LeverBounds::new(0.0, 25.0, 0.0),
            production_volume: LeverBounds::new(100.0, 5000.0, 1000.0),
        }
    }
}

impl SimulationPolicy {
    /// 校验策略自洽性
    ///
    /// # 返回
    /// - Err(String): 第一个不满足的约束
    pub fn validate(&self) -> Result<(), String> {
        let shares = [self.supply_cost_share, self.process_cost_share];
        if shares.iter().any(|s| !(0.0..=1.0).contains(s)) {
            return Err("成本占比必须位于 [0, 1]".to_string());
        }
        if (self.supply_cost_share + self.process_cost_share - 1.0).abs() > 1e-9 {
            return Err(format!(
                "成本占比之和必须为 1（当前 {} + {}）",
                self.supply_cost_share, self.process_cost_share
            ));
        }

        let levers = [
            ("supply_cost_reduction_pct", &self.supply_cost_reduction_pct),
            ("process_efficiency_gain_pct", &self.process_efficiency_gain_pct),
            ("price_increase_pct", &self.price_increase_pct),
            ("production_volume", &self.production_volume),
        ];
        for (name, bounds) in levers {
            if !bounds.is_well_formed() {
                return Err(format!(
                    "杠杆 {} 区间非法: min={}, max={}, default={}",
                    name, bounds.min, bounds.max, bounds.default
                ));
            }
        }

        if self.supply_cost_reduction_pct.max > 100.0 || self.process_efficiency_gain_pct.max > 100.0
        {
            return Err("成本降低类杠杆上限不能超过 100%".to_string());
        }
        let volume = &self.production_volume;
        if volume.min < 0.0 {
            return Err("生产量下限不能为负".to_string());
        }
        if volume.max > f64::from(u32::MAX) {
            return Err(format!("生产量上限过大: {}", volume.max));
        }
        // 生产量按整件计，区间端点与初始值都必须是整数
        if [volume.min, volume.max, volume.default]
            .iter()
            .any(|v| v.fract() != 0.0)
        {
            return Err(format!(
                "生产量区间必须为整数: min={}, max={}, default={}",
                volume.min, volume.max, volume.default
            ));
        }

        Ok(())
    }
}
