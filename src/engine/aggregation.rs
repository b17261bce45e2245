// ==========================================
// 纺织生产经营看板 - 聚合工具
// ==========================================
// 职责: 均值/毛利率/分位数/排行等公共计算
// 红线: 除零不抛错，统一以 None 表示"无定义"
// ==========================================

use std::cmp::Ordering;

// ==========================================
// MeanAccumulator - 均值累加器
// ==========================================
// 空集合的均值为 None（不补零）
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// 跳过无定义值
    pub fn push_defined(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.push(v);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// 序列均值
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut acc = MeanAccumulator::new();
    for v in values {
        acc.push(v);
    }
    acc.mean()
}

/// 毛利 = 售价 - 成本（可为负）
pub fn margin(price: f64, cost: f64) -> f64 {
    price - cost
}

/// 毛利率 (%) = 100 × 毛利 / 售价
///
/// 售价为 0 时无定义，返回 None
pub fn margin_pct(price: f64, cost: f64) -> Option<f64> {
    percent_of(margin(price, cost), price)
}

/// 100 × numerator / denominator；分母为 0 或结果非有限值时返回 None
pub fn percent_of(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = 100.0 * numerator / denominator;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// 两个可能无定义的值之差
pub fn defined_delta(after: Option<f64>, before: Option<f64>) -> Option<f64> {
    match (after, before) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    }
}

/// 分位数（线性插值，q ∈ [0, 1]，输入须已升序）
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// 降序比较（None 排在最后）
pub fn descending_defined(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 取前 N 名（稳定排序：相同值保持原有分组顺序）
pub fn top_n_by<T, F>(items: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<f64>,
{
    let mut ranked: Vec<T> = items.to_vec();
    ranked.sort_by(|a, b| descending_defined(key(a), key(b)));
    ranked.truncate(n);
    ranked
}
