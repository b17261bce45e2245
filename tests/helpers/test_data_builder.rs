// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 提供行构造函数与一套小型样例数据集（4 产品 × 4 年 × 3 个月）
// ==========================================

use std::sync::Arc;

use textile_dashboard::domain::types::{CalendarMonth, RecordId, SUPPORTED_YEARS};
use textile_dashboard::domain::{
    CapacityRecord, CostRecord, DemandRecord, Process, ProcessTime, Product, Supply,
    SupplyConsumption,
};
use textile_dashboard::repository::{DataStore, DataTables};

// ==========================================
// 行构造
// ==========================================

pub fn product(id: &str, name: &str, category: &str, line: &str, minutes: f64) -> Product {
    Product {
        product_id: RecordId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        line: line.to_string(),
        total_production_min: minutes,
    }
}

pub fn supply(id: &str, name: &str, unit: &str, unit_cost: f64) -> Supply {
    Supply {
        supply_id: RecordId::new(id),
        name: name.to_string(),
        unit: unit.to_string(),
        unit_cost,
    }
}

pub fn process(id: &str, name: &str, cost_per_minute: f64) -> Process {
    Process {
        process_id: RecordId::new(id),
        name: name.to_string(),
        cost_per_minute,
    }
}

pub fn consumption(product_id: &str, supply_id: &str, quantity: f64) -> SupplyConsumption {
    SupplyConsumption {
        product_id: RecordId::new(product_id),
        supply_id: RecordId::new(supply_id),
        quantity_required: quantity,
    }
}

pub fn process_time(product_id: &str, process_id: &str, minutes: f64) -> ProcessTime {
    ProcessTime {
        product_id: RecordId::new(product_id),
        process_id: RecordId::new(process_id),
        minutes,
    }
}

pub fn demand(
    product_id: &str,
    month: CalendarMonth,
    year: i32,
    min_demand: f64,
    max_demand: f64,
    sale_price: f64,
) -> DemandRecord {
    DemandRecord {
        product_id: RecordId::new(product_id),
        month,
        year,
        min_demand,
        max_demand,
        sale_price,
    }
}

pub fn cost(product_id: &str, month: CalendarMonth, year: i32, total_cost: f64) -> CostRecord {
    CostRecord {
        product_id: RecordId::new(product_id),
        month,
        year,
        total_cost,
    }
}

pub fn capacity(
    process_name: &str,
    year: i32,
    month: CalendarMonth,
    minutes: f64,
    operators: f64,
) -> CapacityRecord {
    CapacityRecord {
        process_name: process_name.to_string(),
        year,
        month: Some(month),
        available_minutes: minutes,
        available_operators: operators,
    }
}

// ==========================================
// 样例数据集
// ==========================================

pub const SAMPLE_MONTHS: [CalendarMonth; 3] = [
    CalendarMonth::January,
    CalendarMonth::February,
    CalendarMonth::March,
];

/// (产品ID, 基准售价, 基准成本)
///
/// P003 成本高于售价（负毛利）
const SAMPLE_PRICING: [(&str, f64, f64); 4] = [
    ("P001", 35.0, 20.0),
    ("P002", 150.0, 110.0),
    ("P003", 90.0, 95.0),
    ("P004", 40.0, 25.0),
];

/// 样例数据表
///
/// - 物料耗用含一个不存在的物料 (I99)，工序工时含一个不存在的工序 (PR9)
/// - 售价 = 基准售价 + 2 × (年份 - 2021)
/// - 成本 = 基准成本 + 月份序号
pub fn sample_tables() -> DataTables {
    let mut tables = DataTables {
        products: vec![
            product("P001", "Polo Clásico", "Polos", "Línea Casual", 45.0),
            product("P002", "Casaca Denim", "Casacas", "Línea Urbana", 120.0),
            product("P003", "Buzo Deportivo", "Buzos", "Línea Casual", 80.0),
            product("P004", "Polo Sport", "Polos", "Línea Urbana", 50.0),
        ],
        supplies: vec![
            supply("I01", "Tela Algodón", "m", 12.5),
            supply("I02", "Hilo", "cono", 3.2),
            supply("I03", "Botón", "unidad", 0.15),
            supply("I04", "Cierre", "unidad", 1.8),
        ],
        processes: vec![
            process("PR1", "Corte", 0.5),
            process("PR2", "Confección", 0.8),
            process("PR3", "Acabado", 0.4),
        ],
        supply_consumption: vec![
            consumption("P001", "I01", 1.2),
            consumption("P001", "I02", 0.1),
            consumption("P001", "I03", 3.0),
            consumption("P002", "I01", 2.0),
            consumption("P002", "I99", 5.0),
            consumption("P002", "I04", 1.0),
            consumption("P003", "I01", 1.5),
            consumption("P003", "I04", 1.0),
            consumption("P004", "I01", 1.1),
        ],
        process_times: vec![
            process_time("P001", "PR1", 10.0),
            process_time("P001", "PR2", 25.0),
            process_time("P001", "PR3", 10.0),
            process_time("P002", "PR1", 30.0),
            process_time("P002", "PR2", 70.0),
            process_time("P002", "PR3", 20.0),
            process_time("P003", "PR1", 20.0),
            process_time("P003", "PR2", 45.0),
            process_time("P003", "PR3", 15.0),
            process_time("P004", "PR1", 12.0),
            process_time("P004", "PR2", 28.0),
            process_time("P004", "PR9", 5.0),
        ],
        ..Default::default()
    };

    for year in SUPPORTED_YEARS {
        let offset = f64::from(year - 2021);
        let mut demand_rows = Vec::new();
        let mut cost_rows = Vec::new();
        for (product_id, base_price, base_cost) in SAMPLE_PRICING {
            for month in SAMPLE_MONTHS {
                let m = f64::from(month.number());
                demand_rows.push(demand(
                    product_id,
                    month,
                    year,
                    100.0 + 10.0 * m + offset,
                    150.0 + 10.0 * m + offset,
                    base_price + 2.0 * offset,
                ));
                cost_rows.push(cost(product_id, month, year, base_cost + m));
            }
        }
        tables.demand.insert(year, demand_rows);
        tables.costs.insert(year, cost_rows);

        tables.capacity.insert(
            year,
            vec![
                capacity("Corte", year, CalendarMonth::January, 9600.0, 4.0),
                capacity("Corte", year, CalendarMonth::February, 8800.0, 4.0),
                capacity("Confección", year, CalendarMonth::January, 24000.0, 10.0),
                capacity("Confección", year, CalendarMonth::February, 21600.0, 9.0),
                capacity("Acabado", year, CalendarMonth::January, 7200.0, 3.0),
                capacity("Acabado", year, CalendarMonth::February, 7200.0, 3.0),
            ],
        );
    }

    tables
}

/// 样例数据仓（共享快照）
pub fn sample_store() -> Arc<DataStore> {
    Arc::new(DataStore::from_tables(sample_tables()))
}
