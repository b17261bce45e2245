// ==========================================
// 纺织生产经营看板 - 工序产能引擎
// ==========================================
// 输出:
// - 年度工序产能（按工序名称取均值）
// - 工序单位成本
// - 工序总工时（工序工时按工序ID求和 ⋈ 工序）
// ==========================================

use crate::domain::types::RecordId;
use crate::domain::CapacityRecord;
use crate::repository::DataStore;
use serde::Serialize;
use std::collections::BTreeMap;

/// 工序平均产能
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCapacity {
    pub process_name: String,
    pub mean_available_minutes: f64,
    pub mean_available_operators: f64,
}

/// 工序单位成本
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessCost {
    pub process_id: RecordId,
    pub process_name: String,
    pub cost_per_minute: f64,
}

/// 工序总工时
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessTimeTotal {
    pub process_id: RecordId,
    pub process_name: String,
    pub total_minutes: f64,
}

// ==========================================
// ProcessAnalysisEngine - 工序分析引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct ProcessAnalysisEngine;

impl ProcessAnalysisEngine {
    pub fn new() -> Self {
        Self
    }

    /// 年度工序产能（按工序名称升序）
    pub fn process_capacity(&self, store: &DataStore, year: i32) -> Vec<ProcessCapacity> {
        let mut groups: BTreeMap<&str, Vec<&CapacityRecord>> = BTreeMap::new();
        for record in store.capacity(year) {
            groups
                .entry(record.process_name.as_str())
                .or_default()
                .push(record);
        }
        tracing::debug!(year, processes = groups.len(), "计算工序产能");

        groups
            .into_iter()
            .map(|(name, group)| {
                let n = group.len() as f64;
                ProcessCapacity {
                    process_name: name.to_string(),
                    mean_available_minutes: group.iter().map(|r| r.available_minutes).sum::<f64>()
                        / n,
                    mean_available_operators: group
                        .iter()
                        .map(|r| r.available_operators)
                        .sum::<f64>()
                        / n,
                }
            })
            .collect()
    }

    /// 工序单位成本（工序表行序）
    pub fn process_costs(&self, store: &DataStore) -> Vec<ProcessCost> {
        store
            .processes()
            .iter()
            .map(|p| ProcessCost {
                process_id: p.process_id.clone(),
                process_name: p.name.clone(),
                cost_per_minute: p.cost_per_minute,
            })
            .collect()
    }

    /// 工序总工时（按工序ID升序；工序表中不存在的ID剔除）
    pub fn process_time_totals(&self, store: &DataStore) -> Vec<ProcessTimeTotal> {
        let mut totals: BTreeMap<&RecordId, f64> = BTreeMap::new();
        for t in store.process_times() {
            *totals.entry(&t.process_id).or_insert(0.0) += t.minutes;
        }

        totals
            .into_iter()
            .filter_map(|(process_id, total_minutes)| {
                let process = store.process(process_id)?;
                Some(ProcessTimeTotal {
                    process_id: process_id.clone(),
                    process_name: process.name.clone(),
                    total_minutes,
                })
            })
            .collect()
    }
}

impl Default for ProcessAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
