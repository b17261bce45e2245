// ==========================================
// 引擎集成测试
// ==========================================
// 测试范围:
// 1. 总体概览 / 产品分析 / 工序产能
// 2. 成本与盈利: 品类均值与手工复算一致、排行独立排序、幂等
// 3. 需求序列: 日历月排序、季节性均值
// 4. 售价为 0 时毛利率无定义
// ==========================================

mod helpers;

use std::collections::BTreeMap;

use helpers::test_data_builder::*;
use textile_dashboard::domain::types::{CalendarMonth, RecordId};
use textile_dashboard::engine::{
    simulation_baseline, DemandAnalysisEngine, OverviewEngine, ProcessAnalysisEngine,
    ProductAnalysisEngine, ProfitabilityEngine,
};
use textile_dashboard::repository::{DataStore, DataTables};

fn ids<T>(items: &[T], f: impl Fn(&T) -> &RecordId) -> Vec<String> {
    items.iter().map(|i| f(i).to_string()).collect()
}

// ==========================================
// 总体概览
// ==========================================

#[test]
fn test_overview_summary() {
    let store = sample_store();
    let summary = OverviewEngine::new().summarize(&store);

    assert_eq!(summary.total_products, 4);
    assert_eq!(summary.total_supplies, 4);
    assert_eq!(summary.total_processes, 3);
    assert_eq!(summary.total_categories, 3);
    assert_eq!(summary.period, "2021-2024");

    let categories: Vec<(&str, usize)> = summary
        .products_by_category
        .iter()
        .map(|b| (b.label.as_str(), b.count))
        .collect();
    assert_eq!(categories, vec![("Polos", 2), ("Buzos", 1), ("Casacas", 1)]);

    let lines: Vec<&str> = summary
        .products_by_line
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(lines, vec!["Línea Casual", "Línea Urbana"]);

    let dist = summary.production_time.expect("应有生产时间分布");
    assert_eq!(dist.min, 45.0);
    assert_eq!(dist.q1, 48.75);
    assert_eq!(dist.median, 65.0);
    assert_eq!(dist.max, 120.0);
    assert_eq!(dist.mean, 73.75);
}

#[test]
fn test_overview_empty_store() {
    let store = DataStore::from_tables(DataTables::default());
    let summary = OverviewEngine::new().summarize(&store);
    assert_eq!(summary.total_products, 0);
    assert!(summary.products_by_category.is_empty());
    assert!(summary.production_time.is_none());
}

// ==========================================
// 产品分析
// ==========================================

#[test]
fn test_product_supplies_inner_join() {
    let store = sample_store();
    let engine = ProductAnalysisEngine::new();

    // I99 在物料表中不存在，被剔除
    let rows = engine.product_supplies(&store, &RecordId::new("P002"));
    assert_eq!(ids(&rows, |r| &r.supply_id), vec!["I01", "I04"]);
    assert_eq!(rows[0].unit_cost, 12.5);
    assert_eq!(rows[0].quantity_required, 2.0);
    assert_eq!(rows[1].supply_name, "Cierre");

    // 结果恰为物料耗用表中该产品、且物料存在的行
    let expected: Vec<String> = store
        .supply_consumption()
        .iter()
        .filter(|c| c.product_id.as_str() == "P001")
        .filter(|c| store.supply(&c.supply_id).is_some())
        .map(|c| c.supply_id.to_string())
        .collect();
    let rows = engine.product_supplies(&store, &RecordId::new("P001"));
    assert_eq!(ids(&rows, |r| &r.supply_id), expected);
    for row in &rows {
        assert_eq!(row.unit_cost, store.supply(&row.supply_id).unwrap().unit_cost);
    }
}

#[test]
fn test_product_detail() {
    let store = sample_store();
    let engine = ProductAnalysisEngine::new();

    let detail = engine
        .product_detail(&store, &RecordId::new("P004"))
        .expect("产品存在");
    assert_eq!(detail.product.name, "Polo Sport");
    // PR9 不存在于工序表
    assert_eq!(ids(&detail.process_times, |r| &r.process_id), vec!["PR1", "PR2"]);
    assert_eq!(detail.process_times[1].cost_per_minute, 0.8);

    assert!(engine.product_detail(&store, &RecordId::new("P999")).is_none());
    assert!(engine
        .product_supplies(&store, &RecordId::new("P999"))
        .is_empty());
}

// ==========================================
// 工序产能
// ==========================================

#[test]
fn test_process_capacity_means_by_name() {
    let store = sample_store();
    let capacity = ProcessAnalysisEngine::new().process_capacity(&store, 2022);

    let names: Vec<&str> = capacity.iter().map(|c| c.process_name.as_str()).collect();
    assert_eq!(names, vec!["Acabado", "Confección", "Corte"]);
    assert_eq!(capacity[1].mean_available_minutes, 22800.0);
    assert_eq!(capacity[1].mean_available_operators, 9.5);
    assert_eq!(capacity[2].mean_available_minutes, 9200.0);

    assert!(ProcessAnalysisEngine::new()
        .process_capacity(&store, 2030)
        .is_empty());
}

#[test]
fn test_process_time_totals_and_costs() {
    let store = sample_store();
    let engine = ProcessAnalysisEngine::new();

    let totals = engine.process_time_totals(&store);
    let summary: Vec<(&str, f64)> = totals
        .iter()
        .map(|t| (t.process_name.as_str(), t.total_minutes))
        .collect();
    assert_eq!(
        summary,
        vec![("Corte", 72.0), ("Confección", 168.0), ("Acabado", 45.0)]
    );

    let costs = engine.process_costs(&store);
    assert_eq!(ids(&costs, |c| &c.process_id), vec!["PR1", "PR2", "PR3"]);
    assert_eq!(costs[2].cost_per_minute, 0.4);
}

// ==========================================
// 成本与盈利
// ==========================================

#[test]
fn test_category_margin_matches_manual_computation() {
    let store = sample_store();
    let yearly = ProfitabilityEngine::new(10).yearly_profitability(&store, 2023);

    // 手工复算: 成本 ⋈ 需求 (产品, 月份) ⋈ 产品
    let mut manual: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for c in store.costs(2023) {
        for d in store
            .demand(2023)
            .iter()
            .filter(|d| d.product_id == c.product_id && d.month == c.month)
        {
            let product = store.product(&c.product_id).unwrap();
            let pct = 100.0 * (d.sale_price - c.total_cost) / d.sale_price;
            let entry = manual.entry(product.category.clone()).or_insert((0.0, 0));
            entry.0 += pct;
            entry.1 += 1;
        }
    }

    assert_eq!(yearly.by_category.len(), manual.len());
    for (category_margin, (category, (sum, count))) in yearly.by_category.iter().zip(manual) {
        assert_eq!(category_margin.category, category);
        let expected = sum / count as f64;
        let actual = category_margin.mean_margin_pct.expect("毛利率应有定义");
        assert!((actual - expected).abs() < 1e-9, "{}: {} != {}", category, actual, expected);
    }
    assert_eq!(yearly.row_count, 12);
}

#[test]
fn test_top_lists_are_sorted_independently() {
    let store = sample_store();
    let yearly = ProfitabilityEngine::new(10).yearly_profitability(&store, 2024);

    let by_pct = ids(&yearly.top_by_margin_pct, |p| &p.product_id);
    let by_margin = ids(&yearly.top_by_margin, |p| &p.product_id);
    assert_eq!(by_pct, vec!["P001", "P004", "P002", "P003"]);
    // P001 与 P004 平均毛利相同，保持原有顺序
    assert_eq!(by_margin, vec!["P002", "P001", "P004", "P003"]);
    assert_ne!(by_pct, by_margin);

    // P003 成本高于售价，毛利为负但仍参与排行
    let p003 = yearly
        .by_product
        .iter()
        .find(|p| p.product_id.as_str() == "P003")
        .unwrap();
    assert!(p003.mean_margin < 0.0);

    let top2 = ProfitabilityEngine::new(2).yearly_profitability(&store, 2024);
    assert_eq!(top2.top_by_margin_pct.len(), 2);
    assert_eq!(top2.by_product.len(), 4);
}

#[test]
fn test_monthly_means_in_calendar_order() {
    let store = sample_store();
    let yearly = ProfitabilityEngine::default().yearly_profitability(&store, 2021);

    let months: Vec<CalendarMonth> = yearly.monthly.iter().map(|m| m.month).collect();
    assert_eq!(months, SAMPLE_MONTHS.to_vec());
    // 一月: 成本 (21 + 111 + 96 + 26) / 4
    assert_eq!(yearly.monthly[0].mean_cost, 63.5);
    assert_eq!(yearly.monthly[0].mean_price, 78.75);
}

#[test]
fn test_aggregations_are_idempotent() {
    let store = sample_store();
    let profitability = ProfitabilityEngine::new(10);
    assert_eq!(
        profitability.yearly_profitability(&store, 2022),
        profitability.yearly_profitability(&store, 2022)
    );

    let demand = DemandAnalysisEngine::new();
    let id = RecordId::new("P003");
    assert_eq!(demand.demand_series(&store, &id), demand.demand_series(&store, &id));

    assert_eq!(
        OverviewEngine::new().summarize(&store),
        OverviewEngine::new().summarize(&store)
    );
}

#[test]
fn test_zero_price_margin_pct_is_undefined() {
    let mut tables = DataTables {
        products: vec![product("P010", "Muestra", "Muestras", "Línea X", 10.0)],
        ..Default::default()
    };
    tables.demand.insert(
        2024,
        vec![demand("P010", CalendarMonth::May, 2024, 1.0, 2.0, 0.0)],
    );
    tables
        .costs
        .insert(2024, vec![cost("P010", CalendarMonth::May, 2024, 15.0)]);
    let store = DataStore::from_tables(tables);

    let yearly = ProfitabilityEngine::default().yearly_profitability(&store, 2024);
    assert_eq!(yearly.row_count, 1);
    assert_eq!(yearly.summary.mean_margin, Some(-15.0));
    assert_eq!(yearly.summary.mean_margin_pct, None);
    assert_eq!(yearly.by_category[0].mean_margin_pct, None);
    assert_eq!(yearly.top_by_margin_pct[0].mean_margin_pct, None);
}

#[test]
fn test_empty_year_yields_empty_outputs() {
    let store = DataStore::from_tables(DataTables::default());
    let yearly = ProfitabilityEngine::default().yearly_profitability(&store, 2022);
    assert_eq!(yearly.row_count, 0);
    assert!(yearly.monthly.is_empty());
    assert!(yearly.by_category.is_empty());
    assert_eq!(yearly.summary.mean_cost, None);
}

// ==========================================
// 需求与季节性
// ==========================================

#[test]
fn test_demand_series_calendar_order_and_seasonality() {
    let store = sample_store();
    let series = DemandAnalysisEngine::new().demand_series(&store, &RecordId::new("P001"));

    assert_eq!(series.points.len(), 12);
    let first: Vec<(CalendarMonth, i32)> = series
        .points
        .iter()
        .take(5)
        .map(|p| (p.month, p.year))
        .collect();
    assert_eq!(
        first,
        vec![
            (CalendarMonth::January, 2021),
            (CalendarMonth::January, 2022),
            (CalendarMonth::January, 2023),
            (CalendarMonth::January, 2024),
            (CalendarMonth::February, 2021),
        ]
    );

    assert_eq!(series.seasonality.len(), 3);
    let january = &series.seasonality[0];
    assert_eq!(january.month, CalendarMonth::January);
    assert_eq!(january.samples, 4);
    assert_eq!(january.mean_min_demand, 111.5);
    assert_eq!(january.mean_max_demand, 161.5);

    let unknown = DemandAnalysisEngine::new().demand_series(&store, &RecordId::new("P999"));
    assert!(unknown.points.is_empty());
    assert!(unknown.seasonality.is_empty());
}

// ==========================================
// 模拟基准
// ==========================================

#[test]
fn test_simulation_baseline_means() {
    let store = sample_store();
    let baseline = simulation_baseline(&store, &RecordId::new("P002"), 2024).unwrap();
    assert_eq!(baseline.cost, 112.0);
    assert_eq!(baseline.price, 156.0);

    assert!(simulation_baseline(&store, &RecordId::new("P999"), 2024).is_none());
}
