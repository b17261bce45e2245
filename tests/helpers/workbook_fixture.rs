// ==========================================
// 工作簿夹具 - 把 DataTables 写成 CSV 目录或 .xlsx
// ==========================================

use std::fs;
use std::path::Path;

use rust_xlsxwriter::Workbook;
use textile_dashboard::importer::sheet_catalog::{self, columns, sheets};
use textile_dashboard::repository::DataTables;

/// 单元格（数值写入 xlsx 时保持数值类型）
#[derive(Debug, Clone)]
pub enum FixtureCell {
    Text(String),
    Number(f64),
}

impl FixtureCell {
    fn as_csv(&self) -> String {
        match self {
            FixtureCell::Text(s) => s.clone(),
            FixtureCell::Number(n) => n.to_string(),
        }
    }
}

fn text(s: impl Into<String>) -> FixtureCell {
    FixtureCell::Text(s.into())
}

fn number(n: f64) -> FixtureCell {
    FixtureCell::Number(n)
}

/// 工作表夹具
#[derive(Debug, Clone)]
pub struct FixtureSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<FixtureCell>>,
}

impl FixtureSheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// 把数据表展开为 17 张工作表
pub fn fixture_sheets(tables: &DataTables) -> Vec<FixtureSheet> {
    let mut out = Vec::new();

    let mut products = FixtureSheet::new(
        sheets::PRODUCTS,
        &[
            columns::PRODUCT_ID,
            columns::PRODUCT_NAME,
            columns::CATEGORY,
            columns::LINE,
            columns::TOTAL_PRODUCTION_MIN,
        ],
    );
    for p in &tables.products {
        products.rows.push(vec![
            text(p.product_id.as_str()),
            text(&p.name),
            text(&p.category),
            text(&p.line),
            number(p.total_production_min),
        ]);
    }
    out.push(products);

    let mut supplies = FixtureSheet::new(
        sheets::SUPPLIES,
        &[
            columns::SUPPLY_ID,
            columns::SUPPLY_NAME,
            columns::UNIT,
            columns::UNIT_COST,
        ],
    );
    for s in &tables.supplies {
        supplies.rows.push(vec![
            text(s.supply_id.as_str()),
            text(&s.name),
            text(&s.unit),
            number(s.unit_cost),
        ]);
    }
    out.push(supplies);

    let mut processes = FixtureSheet::new(
        sheets::PROCESSES,
        &[
            columns::PROCESS_ID,
            columns::PROCESS_NAME,
            columns::COST_PER_MINUTE,
        ],
    );
    for p in &tables.processes {
        processes.rows.push(vec![
            text(p.process_id.as_str()),
            text(&p.name),
            number(p.cost_per_minute),
        ]);
    }
    out.push(processes);

    let mut consumption = FixtureSheet::new(
        sheets::SUPPLY_CONSUMPTION,
        &[
            columns::PRODUCT_ID,
            columns::SUPPLY_ID,
            columns::QUANTITY_REQUIRED,
        ],
    );
    for c in &tables.supply_consumption {
        consumption.rows.push(vec![
            text(c.product_id.as_str()),
            text(c.supply_id.as_str()),
            number(c.quantity_required),
        ]);
    }
    out.push(consumption);

    let mut times = FixtureSheet::new(
        sheets::PROCESS_TIMES,
        &[columns::PRODUCT_ID, columns::PROCESS_ID, columns::MINUTES],
    );
    for t in &tables.process_times {
        times.rows.push(vec![
            text(t.product_id.as_str()),
            text(t.process_id.as_str()),
            number(t.minutes),
        ]);
    }
    out.push(times);

    for (year, rows) in &tables.demand {
        let mut sheet = FixtureSheet::new(
            &sheet_catalog::demand_sheet(*year),
            &[
                columns::PRODUCT_ID,
                columns::MONTH,
                columns::MIN_DEMAND,
                columns::MAX_DEMAND,
                columns::SALE_PRICE,
            ],
        );
        for d in rows {
            sheet.rows.push(vec![
                text(d.product_id.as_str()),
                text(d.month.spanish_name()),
                number(d.min_demand),
                number(d.max_demand),
                number(d.sale_price),
            ]);
        }
        out.push(sheet);
    }

    for (year, rows) in &tables.capacity {
        let mut sheet = FixtureSheet::new(
            &sheet_catalog::capacity_sheet(*year),
            &[
                columns::PROCESS_NAME,
                columns::MONTH,
                columns::AVAILABLE_MINUTES,
                columns::AVAILABLE_OPERATORS,
            ],
        );
        for c in rows {
            let month = c.month.map(|m| m.spanish_name()).unwrap_or("Enero");
            sheet.rows.push(vec![
                text(&c.process_name),
                text(month),
                number(c.available_minutes),
                number(c.available_operators),
            ]);
        }
        out.push(sheet);
    }

    for (year, rows) in &tables.costs {
        let mut sheet = FixtureSheet::new(
            &sheet_catalog::cost_sheet(*year),
            &[columns::PRODUCT_ID, columns::MONTH, columns::TOTAL_COST],
        );
        for c in rows {
            sheet.rows.push(vec![
                text(c.product_id.as_str()),
                text(c.month.spanish_name()),
                number(c.total_cost),
            ]);
        }
        out.push(sheet);
    }

    out
}

/// 写入 CSV 目录（每张工作表一个 <SHEET>.csv）
pub fn write_csv_dir(sheets: &[FixtureSheet], dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for sheet in sheets {
        let mut writer = csv::Writer::from_path(dir.join(format!("{}.csv", sheet.name)))?;
        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row.iter().map(FixtureCell::as_csv))?;
        }
        writer.flush()?;
    }
    Ok(())
}

/// 写入 .xlsx 工作簿
pub fn write_xlsx(sheets: &[FixtureSheet], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    write_xlsx_from_row(sheets, path, 0)
}

/// 写入 .xlsx 工作簿，表头放在第 header_row 行（0 起），上方留空
pub fn write_xlsx_from_row(
    sheets: &[FixtureSheet],
    path: &Path,
    header_row: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string(header_row, col as u16, header)?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = header_row + (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    FixtureCell::Text(s) => worksheet.write_string(row_num, col as u16, s)?,
                    FixtureCell::Number(n) => worksheet.write_number(row_num, col as u16, *n)?,
                };
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}

/// 去掉指定工作表
pub fn without_sheet(sheets: Vec<FixtureSheet>, name: &str) -> Vec<FixtureSheet> {
    sheets.into_iter().filter(|s| s.name != name).collect()
}
