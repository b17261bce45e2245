// ==========================================
// 纺织生产经营看板 - 视图渲染
// ==========================================
// 职责: 把 DashboardView 渲染为终端表格或 JSON
// 口径: 无定义的数值（如售价为 0 的毛利率）显示为 n/a
// ==========================================

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::api::{DashboardView, ProcessesView, ProductOption, SimulationView};
use crate::domain::types::CalendarMonth;
use crate::engine::{DemandSeries, OverviewSummary, ProductDetail, YearlyProfitability};
use crate::i18n::{section_title, t, t_with_args};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// 渲染看板视图
pub fn render_view(view: &DashboardView, format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(view);
    }

    let title = section_title(view.section());
    let body = match view {
        DashboardView::Overview(summary) => render_overview(summary),
        DashboardView::ProductDetail(detail) => render_product_detail(detail),
        DashboardView::Profitability(yearly) => render_profitability(yearly),
        DashboardView::Demand(series) => render_demand(series),
        DashboardView::Processes(processes) => render_processes(processes),
        DashboardView::Simulator(simulation) => render_simulation(simulation),
    };
    Ok(format!("== {} ==\n{}", title, body))
}

/// 渲染产品选择项
pub fn render_products(options: &[ProductOption], format: OutputFormat) -> serde_json::Result<String> {
    if format == OutputFormat::Json {
        return to_json(&options);
    }
    let mut table = new_table(&["label.product_id", "label.product"]);
    for option in options {
        table.add_row(vec![option.product_id.to_string(), option.name.clone()]);
    }
    Ok(table.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

// ==========================================
// 数值格式
// ==========================================

fn num(value: f64) -> String {
    format!("{:.2}", value)
}

fn opt_num(value: Option<f64>) -> String {
    value.map(num).unwrap_or_else(|| "n/a".to_string())
}

fn month(value: CalendarMonth) -> String {
    value.spanish_name().to_string()
}

fn new_table(header_keys: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header_keys.iter().map(|key| Cell::new(t(key))));
    table
}

/// 指标卡（两列表格）
fn kpi_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = new_table(&["label.metric", "label.value"]);
    for (key, value) in rows {
        table.add_row(vec![t(key), value]);
    }
    table
}

// ==========================================
// 各分区
// ==========================================

fn render_overview(summary: &OverviewSummary) -> String {
    let kpis = kpi_table(vec![
        ("label.total_products", summary.total_products.to_string()),
        ("label.total_supplies", summary.total_supplies.to_string()),
        ("label.total_processes", summary.total_processes.to_string()),
        ("label.total_categories", summary.total_categories.to_string()),
        ("label.period", summary.period.clone()),
    ]);

    let mut categories = new_table(&["label.category", "label.count"]);
    for bucket in &summary.products_by_category {
        categories.add_row(vec![bucket.label.clone(), bucket.count.to_string()]);
    }

    let mut lines = new_table(&["label.line", "label.count"]);
    for bucket in &summary.products_by_line {
        lines.add_row(vec![bucket.label.clone(), bucket.count.to_string()]);
    }

    let mut out = format!("{}\n{}\n{}", kpis, categories, lines);
    if let Some(dist) = &summary.production_time {
        let box_plot = kpi_table(vec![
            ("label.min", num(dist.min)),
            ("label.q1", num(dist.q1)),
            ("label.median", num(dist.median)),
            ("label.q3", num(dist.q3)),
            ("label.max", num(dist.max)),
            ("label.mean", num(dist.mean)),
        ]);
        out.push_str(&format!("\n{}\n{}", t("label.production_time"), box_plot));
    }
    out
}

fn render_product_detail(detail: &ProductDetail) -> String {
    let product = &detail.product;
    let header = kpi_table(vec![
        ("label.product_id", product.product_id.to_string()),
        ("label.product", product.name.clone()),
        ("label.category", product.category.clone()),
        ("label.line", product.line.clone()),
        ("label.production_time", num(product.total_production_min)),
    ]);

    let mut supplies = new_table(&[
        "label.supply",
        "label.unit",
        "label.quantity",
        "label.unit_cost",
    ]);
    for row in &detail.supplies {
        supplies.add_row(vec![
            row.supply_name.clone(),
            row.unit.clone(),
            num(row.quantity_required),
            num(row.unit_cost),
        ]);
    }

    let mut processes = new_table(&["label.process", "label.minutes", "label.cost_per_minute"]);
    for row in &detail.process_times {
        processes.add_row(vec![
            row.process_name.clone(),
            num(row.minutes),
            num(row.cost_per_minute),
        ]);
    }

    format!("{}\n{}\n{}", header, supplies, processes)
}

fn render_profitability(yearly: &YearlyProfitability) -> String {
    let kpis = kpi_table(vec![
        ("label.year", yearly.year.to_string()),
        ("label.mean_cost", opt_num(yearly.summary.mean_cost)),
        ("label.mean_price", opt_num(yearly.summary.mean_price)),
        ("label.mean_margin", opt_num(yearly.summary.mean_margin)),
        ("label.mean_margin_pct", opt_num(yearly.summary.mean_margin_pct)),
    ]);

    let mut monthly = new_table(&["label.month", "label.cost", "label.price", "label.margin"]);
    for m in &yearly.monthly {
        monthly.add_row(vec![
            month(m.month),
            num(m.mean_cost),
            num(m.mean_price),
            num(m.mean_margin),
        ]);
    }

    let mut categories = new_table(&["label.category", "label.margin_pct"]);
    for c in &yearly.by_category {
        categories.add_row(vec![c.category.clone(), opt_num(c.mean_margin_pct)]);
    }

    let mut top_pct = new_table(&["label.product", "label.margin_pct"]);
    for p in &yearly.top_by_margin_pct {
        top_pct.add_row(vec![p.product_name.clone(), opt_num(p.mean_margin_pct)]);
    }

    let mut top_margin = new_table(&["label.product", "label.margin", "label.cost"]);
    for p in &yearly.top_by_margin {
        top_margin.add_row(vec![p.product_name.clone(), num(p.mean_margin), num(p.mean_cost)]);
    }

    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n{}",
        kpis,
        monthly,
        categories,
        t("label.top_by_margin_pct"),
        top_pct,
        t("label.top_by_margin"),
        top_margin
    )
}

fn render_demand(series: &DemandSeries) -> String {
    let mut points = new_table(&[
        "label.month",
        "label.year",
        "label.min_demand",
        "label.max_demand",
        "label.price",
    ]);
    for p in &series.points {
        points.add_row(vec![
            month(p.month),
            p.year.to_string(),
            num(p.min_demand),
            num(p.max_demand),
            num(p.sale_price),
        ]);
    }

    let mut seasonality = new_table(&["label.month", "label.min_demand", "label.max_demand"]);
    for s in &series.seasonality {
        seasonality.add_row(vec![
            month(s.month),
            num(s.mean_min_demand),
            num(s.mean_max_demand),
        ]);
    }

    format!(
        "{}\n{}\n{}",
        points,
        t("label.seasonality"),
        seasonality
    )
}

fn render_processes(view: &ProcessesView) -> String {
    let mut capacity = new_table(&["label.process", "label.minutes", "label.operators"]);
    for c in &view.capacity {
        capacity.add_row(vec![
            c.process_name.clone(),
            num(c.mean_available_minutes),
            num(c.mean_available_operators),
        ]);
    }

    let mut costs = new_table(&["label.process", "label.cost_per_minute"]);
    for c in &view.costs {
        costs.add_row(vec![c.process_name.clone(), num(c.cost_per_minute)]);
    }

    let mut totals = new_table(&["label.process", "label.total_minutes"]);
    for p in &view.time_totals {
        totals.add_row(vec![p.process_name.clone(), num(p.total_minutes)]);
    }

    let heading = t_with_args("label.year_heading", &[("year", &view.year.to_string())]);
    format!("{}\n{}\n{}\n{}", heading, capacity, costs, totals)
}

fn render_simulation(view: &SimulationView) -> String {
    let o = &view.outcome;
    let header = kpi_table(vec![
        ("label.product", view.product_name.clone()),
        ("label.year", view.baseline_year.to_string()),
        ("label.volume", view.levers.production_volume.to_string()),
    ]);

    let mut comparison = new_table(&["label.metric", "label.baseline", "label.scenario", "label.delta"]);
    comparison.add_row(vec![t("label.cost"), num(o.baseline_cost), num(o.new_cost), num(o.cost_delta)]);
    comparison.add_row(vec![
        t("label.price"),
        num(o.baseline_price),
        num(o.new_price),
        num(o.new_price - o.baseline_price),
    ]);
    comparison.add_row(vec![
        t("label.margin"),
        num(o.baseline_margin),
        num(o.new_margin),
        num(o.margin_delta),
    ]);
    comparison.add_row(vec![
        t("label.margin_pct"),
        opt_num(o.baseline_margin_pct),
        opt_num(o.new_margin_pct),
        opt_num(o.margin_pct_delta),
    ]);
    comparison.add_row(vec![
        t("label.total_profit"),
        num(o.baseline_total_profit),
        num(o.simulated_total_profit),
        num(o.profit_delta),
    ]);

    format!("{}\n{}", header, comparison)
}
