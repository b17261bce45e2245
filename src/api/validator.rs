// ==========================================
// 纺织生产经营看板 - 杠杆输入校验器
// ==========================================
// 职责: 情景模拟杠杆的区间校验
// 模式: Strict 越界即拒绝；Clamp 截断到边界并记录告警
// 红线: 非有限值（NaN/∞）在任何模式下都拒绝
// ==========================================

use crate::api::dto::LeverInput;
use crate::api::error::{ApiError, ApiResult, LeverViolation};
use crate::config::{LeverBounds, SimulationPolicy};
use crate::engine::ScenarioLevers;

pub use crate::config::ValidationMode;

// ==========================================
// LeverValidator - 杠杆校验器
// ==========================================

/// 杠杆校验器
///
/// 职责：
/// 1. 校验四个杠杆是否落在 SimulationPolicy 声明的区间内
/// 2. 根据 ValidationMode 决定拒绝或截断
/// 3. 生产量必须为整数件（截断模式下四舍五入）
pub struct LeverValidator<'a> {
    policy: &'a SimulationPolicy,
}

impl<'a> LeverValidator<'a> {
    pub fn new(policy: &'a SimulationPolicy) -> Self {
        Self { policy }
    }

    /// 校验并转换为模拟杠杆
    ///
    /// # 返回
    /// - Ok(ScenarioLevers): 全部杠杆合法（或已截断）
    /// - Err(ApiError::LeverValidationError): 含全部违规项
    pub fn validate(&self, input: &LeverInput, mode: ValidationMode) -> ApiResult<ScenarioLevers> {
        let mut violations = Vec::new();

        let supply = self.check(
            "supply_cost_reduction_pct",
            input.supply_cost_reduction_pct,
            &self.policy.supply_cost_reduction_pct,
            mode,
            &mut violations,
        );
        let process = self.check(
            "process_efficiency_gain_pct",
            input.process_efficiency_gain_pct,
            &self.policy.process_efficiency_gain_pct,
            mode,
            &mut violations,
        );
        let price = self.check(
            "price_increase_pct",
            input.price_increase_pct,
            &self.policy.price_increase_pct,
            mode,
            &mut violations,
        );
        let volume = self.check_volume(input.production_volume, mode, &mut violations);

        if !violations.is_empty() {
            return Err(ApiError::LeverValidationError {
                reason: format!("{}个杠杆输入非法", violations.len()),
                violations,
            });
        }

        Ok(ScenarioLevers {
            supply_cost_reduction_pct: supply,
            process_efficiency_gain_pct: process,
            price_increase_pct: price,
            production_volume: volume,
        })
    }

    fn check(
        &self,
        lever: &str,
        value: f64,
        bounds: &LeverBounds,
        mode: ValidationMode,
        violations: &mut Vec<LeverViolation>,
    ) -> f64 {
        if !value.is_finite() {
            violations.push(violation(lever, value, bounds, "输入不是有限数值"));
            return value;
        }
        if bounds.contains(value) {
            return value;
        }

        match mode {
            ValidationMode::Strict => {
                violations.push(violation(lever, value, bounds, "超出允许范围"));
                value
            }
            ValidationMode::Clamp => {
                let clamped = bounds.clamp(value);
                tracing::warn!(lever, value, clamped, "Clamp模式: 杠杆越界已截断");
                clamped
            }
        }
    }

    fn check_volume(
        &self,
        value: f64,
        mode: ValidationMode,
        violations: &mut Vec<LeverViolation>,
    ) -> u32 {
        let bounds = &self.policy.production_volume;
        let mut checked = self.check("production_volume", value, bounds, mode, violations);
        if !checked.is_finite() {
            return 0;
        }

        if checked.fract() != 0.0 {
            match mode {
                ValidationMode::Strict => {
                    violations.push(violation(
                        "production_volume",
                        value,
                        bounds,
                        "生产量必须为整数件",
                    ));
                }
                ValidationMode::Clamp => {
                    checked = bounds.clamp(checked.round());
                    tracing::warn!(value, rounded = checked, "Clamp模式: 生产量已取整");
                }
            }
        }

        // 区间已由策略校验保证非负
        checked.max(0.0) as u32
    }
}

fn violation(lever: &str, value: f64, bounds: &LeverBounds, reason: &str) -> LeverViolation {
    LeverViolation {
        lever: lever.to_string(),
        value,
        min: bounds.min,
        max: bounds.max,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(supply: f64, process: f64, price: f64, volume: f64) -> LeverInput {
        LeverInput {
            supply_cost_reduction_pct: supply,
            process_efficiency_gain_pct: process,
            price_increase_pct: price,
            production_volume: volume,
        }
    }

    #[test]
    fn test_strict_accepts_in_range() {
        let policy = SimulationPolicy::default();
        let validator = LeverValidator::new(&policy);
        let levers = validator
            .validate(&input(30.0, 20.0, 25.0, 5000.0), ValidationMode::Strict)
            .unwrap();
        assert_eq!(levers.supply_cost_reduction_pct, 30.0);
        assert_eq!(levers.production_volume, 5000);
    }

    #[test]
    fn test_strict_collects_all_violations() {
        let policy = SimulationPolicy::default();
        let validator = LeverValidator::new(&policy);
        let result = validator.validate(&input(45.0, -1.0, 10.0, 50.0), ValidationMode::Strict);
        match result {
            Err(ApiError::LeverValidationError { violations, .. }) => {
                let levers: Vec<&str> = violations.iter().map(|v| v.lever.as_str()).collect();
                assert_eq!(
                    levers,
                    vec![
                        "supply_cost_reduction_pct",
                        "process_efficiency_gain_pct",
                        "production_volume"
                    ]
                );
            }
            other => panic!("Expected LeverValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_clamp_mode_clamps_to_bounds() {
        let policy = SimulationPolicy::default();
        let validator = LeverValidator::new(&policy);
        let levers = validator
            .validate(&input(45.0, -1.0, 30.0, 9000.4), ValidationMode::Clamp)
            .unwrap();
        assert_eq!(levers.supply_cost_reduction_pct, 30.0);
        assert_eq!(levers.process_efficiency_gain_pct, 0.0);
        assert_eq!(levers.price_increase_pct, 25.0);
        assert_eq!(levers.production_volume, 5000);
    }

    #[test]
    fn test_non_finite_always_rejected() {
        let policy = SimulationPolicy::default();
        let validator = LeverValidator::new(&policy);
        for mode in [ValidationMode::Strict, ValidationMode::Clamp] {
            let result = validator.validate(&input(f64::NAN, 0.0, 0.0, 1000.0), mode);
            assert!(matches!(result, Err(ApiError::LeverValidationError { .. })));
        }
    }

    #[test]
    fn test_fractional_volume() {
        let policy = SimulationPolicy::default();
        let validator = LeverValidator::new(&policy);
        assert!(validator
            .validate(&input(0.0, 0.0, 0.0, 1000.5), ValidationMode::Strict)
            .is_err());
        let levers = validator
            .validate(&input(0.0, 0.0, 0.0, 1000.5), ValidationMode::Clamp)
            .unwrap();
        assert_eq!(levers.production_volume, 1001);
    }
}
