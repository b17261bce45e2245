// ==========================================
// 纺织生产经营看板 - 内存数据仓
// ==========================================
// 职责: 持有加载后的全部数据表，进程生命周期内只读
// 红线: 加载后不可变；不含分析逻辑
// ==========================================

use crate::domain::types::RecordId;
use crate::domain::{
    CapacityRecord, CostRecord, DemandRecord, Process, ProcessTime, Product, Supply,
    SupplyConsumption,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

// ==========================================
// DataTables - 加载结果（构造 DataStore 的输入）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct DataTables {
    pub products: Vec<Product>,
    pub supplies: Vec<Supply>,
    pub processes: Vec<Process>,
    pub supply_consumption: Vec<SupplyConsumption>,
    pub process_times: Vec<ProcessTime>,
    pub demand: BTreeMap<i32, Vec<DemandRecord>>,
    pub capacity: BTreeMap<i32, Vec<CapacityRecord>>,
    pub costs: BTreeMap<i32, Vec<CostRecord>>,
}

/// 数据来源信息
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub path: Option<PathBuf>,
    pub loaded_at: DateTime<Utc>,
}

// ==========================================
// DataStore - 只读数据仓
// ==========================================
#[derive(Debug)]
pub struct DataStore {
    source: SourceInfo,
    tables: DataTables,

    // ===== 主键索引 (id → 行下标) =====
    product_index: HashMap<RecordId, usize>,
    supply_index: HashMap<RecordId, usize>,
    process_index: HashMap<RecordId, usize>,
}

impl DataStore {
    /// 由数据表构造（来源未知，测试/内存构造使用）
    pub fn from_tables(tables: DataTables) -> Self {
        Self::with_source(
            tables,
            SourceInfo {
                path: None,
                loaded_at: Utc::now(),
            },
        )
    }

    /// 由数据表与来源信息构造
    pub fn with_source(tables: DataTables, source: SourceInfo) -> Self {
        // 重复主键保留首次出现的行（与 inner join 取首行的展示口径一致）
        let mut product_index = HashMap::new();
        for (idx, p) in tables.products.iter().enumerate() {
            product_index.entry(p.product_id.clone()).or_insert(idx);
        }
        let mut supply_index = HashMap::new();
        for (idx, s) in tables.supplies.iter().enumerate() {
            supply_index.entry(s.supply_id.clone()).or_insert(idx);
        }
        let mut process_index = HashMap::new();
        for (idx, p) in tables.processes.iter().enumerate() {
            process_index.entry(p.process_id.clone()).or_insert(idx);
        }

        Self {
            source,
            tables,
            product_index,
            supply_index,
            process_index,
        }
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    // ==========================================
    // 主数据
    // ==========================================

    pub fn products(&self) -> &[Product] {
        &self.tables.products
    }

    pub fn supplies(&self) -> &[Supply] {
        &self.tables.supplies
    }

    pub fn processes(&self) -> &[Process] {
        &self.tables.processes
    }

    pub fn product(&self, product_id: &RecordId) -> Option<&Product> {
        self.product_index
            .get(product_id)
            .map(|idx| &self.tables.products[*idx])
    }

    pub fn supply(&self, supply_id: &RecordId) -> Option<&Supply> {
        self.supply_index
            .get(supply_id)
            .map(|idx| &self.tables.supplies[*idx])
    }

    pub fn process(&self, process_id: &RecordId) -> Option<&Process> {
        self.process_index
            .get(process_id)
            .map(|idx| &self.tables.processes[*idx])
    }

    /// 按名称查找产品（选择器按名称选择，映射为 ID；同名取首个）
    pub fn find_product_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.tables.products.iter().find(|p| p.name == name)
    }

    // ==========================================
    // 关联表
    // ==========================================

    pub fn supply_consumption(&self) -> &[SupplyConsumption] {
        &self.tables.supply_consumption
    }

    pub fn process_times(&self) -> &[ProcessTime] {
        &self.tables.process_times
    }

    // ==========================================
    // 年度事实表（年份不存在时返回空切片）
    // ==========================================

    pub fn demand(&self, year: i32) -> &[DemandRecord] {
        self.tables
            .demand
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn capacity(&self, year: i32) -> &[CapacityRecord] {
        self.tables
            .capacity
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn costs(&self, year: i32) -> &[CostRecord] {
        self.tables
            .costs
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 全部年度需求（年份升序）
    pub fn all_demand(&self) -> impl Iterator<Item = &DemandRecord> {
        self.tables.demand.values().flatten()
    }

    /// 已加载的需求年份（升序）
    pub fn demand_years(&self) -> Vec<i32> {
        self.tables.demand.keys().copied().collect()
    }

    /// 各表行数（日志用）
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("products", self.tables.products.len()),
            ("supplies", self.tables.supplies.len()),
            ("processes", self.tables.processes.len()),
            ("supply_consumption", self.tables.supply_consumption.len()),
            ("process_times", self.tables.process_times.len()),
            ("demand", self.tables.demand.values().map(Vec::len).sum()),
            ("capacity", self.tables.capacity.values().map(Vec::len).sum()),
            ("costs", self.tables.costs.values().map(Vec::len).sum()),
        ]
    }
}
