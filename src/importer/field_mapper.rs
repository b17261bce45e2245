// ==========================================
// 纺织生产经营看板 - 字段映射器实现
// ==========================================
// 阶段 1: 源列 → 领域实体 + 类型转换
// 红线: 任何缺列/空值/无法解析均返回错误（整体加载失败）
// ==========================================

use crate::domain::types::{CalendarMonth, RecordId};
use crate::domain::{
    CapacityRecord, CostRecord, DemandRecord, Process, ProcessTime, Product, Supply,
    SupplyConsumption,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, RawSheet};
use crate::importer::sheet_catalog::columns;

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 主数据表
    // ==========================================

    pub fn map_products(&self, sheet: &RawSheet) -> ImportResult<Vec<Product>> {
        self.require_columns(
            sheet,
            &[
                columns::PRODUCT_ID,
                columns::PRODUCT_NAME,
                columns::CATEGORY,
                columns::LINE,
                columns::TOTAL_PRODUCTION_MIN,
            ],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(Product {
                    product_id: self.parse_id(sheet, row, columns::PRODUCT_ID)?,
                    name: self.get_required(sheet, row, columns::PRODUCT_NAME)?,
                    category: self.get_required(sheet, row, columns::CATEGORY)?,
                    line: self.get_required(sheet, row, columns::LINE)?,
                    total_production_min: self.parse_f64(
                        sheet,
                        row,
                        columns::TOTAL_PRODUCTION_MIN,
                    )?,
                })
            })
            .collect()
    }

    pub fn map_supplies(&self, sheet: &RawSheet) -> ImportResult<Vec<Supply>> {
        self.require_columns(
            sheet,
            &[
                columns::SUPPLY_ID,
                columns::SUPPLY_NAME,
                columns::UNIT,
                columns::UNIT_COST,
            ],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(Supply {
                    supply_id: self.parse_id(sheet, row, columns::SUPPLY_ID)?,
                    name: self.get_required(sheet, row, columns::SUPPLY_NAME)?,
                    unit: self.get_required(sheet, row, columns::UNIT)?,
                    unit_cost: self.parse_f64(sheet, row, columns::UNIT_COST)?,
                })
            })
            .collect()
    }

    pub fn map_processes(&self, sheet: &RawSheet) -> ImportResult<Vec<Process>> {
        self.require_columns(
            sheet,
            &[
                columns::PROCESS_ID,
                columns::PROCESS_NAME,
                columns::COST_PER_MINUTE,
            ],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(Process {
                    process_id: self.parse_id(sheet, row, columns::PROCESS_ID)?,
                    name: self.get_required(sheet, row, columns::PROCESS_NAME)?,
                    cost_per_minute: self.parse_f64(sheet, row, columns::COST_PER_MINUTE)?,
                })
            })
            .collect()
    }

    // ==========================================
    // 关联表
    // ==========================================

    pub fn map_supply_consumption(&self, sheet: &RawSheet) -> ImportResult<Vec<SupplyConsumption>> {
        self.require_columns(
            sheet,
            &[
                columns::PRODUCT_ID,
                columns::SUPPLY_ID,
                columns::QUANTITY_REQUIRED,
            ],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(SupplyConsumption {
                    product_id: self.parse_id(sheet, row, columns::PRODUCT_ID)?,
                    supply_id: self.parse_id(sheet, row, columns::SUPPLY_ID)?,
                    quantity_required: self.parse_f64(sheet, row, columns::QUANTITY_REQUIRED)?,
                })
            })
            .collect()
    }

    pub fn map_process_times(&self, sheet: &RawSheet) -> ImportResult<Vec<ProcessTime>> {
        self.require_columns(
            sheet,
            &[columns::PRODUCT_ID, columns::PROCESS_ID, columns::MINUTES],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(ProcessTime {
                    product_id: self.parse_id(sheet, row, columns::PRODUCT_ID)?,
                    process_id: self.parse_id(sheet, row, columns::PROCESS_ID)?,
                    minutes: self.parse_f64(sheet, row, columns::MINUTES)?,
                })
            })
            .collect()
    }

    // ==========================================
    // 年度事实表（year 由调用方按工作表名传入）
    // ==========================================

    pub fn map_demand(&self, sheet: &RawSheet, year: i32) -> ImportResult<Vec<DemandRecord>> {
        self.require_columns(
            sheet,
            &[
                columns::PRODUCT_ID,
                columns::MONTH,
                columns::MIN_DEMAND,
                columns::MAX_DEMAND,
                columns::SALE_PRICE,
            ],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(DemandRecord {
                    product_id: self.parse_id(sheet, row, columns::PRODUCT_ID)?,
                    month: self.parse_month(sheet, row, columns::MONTH)?,
                    year,
                    min_demand: self.parse_f64(sheet, row, columns::MIN_DEMAND)?,
                    max_demand: self.parse_f64(sheet, row, columns::MAX_DEMAND)?,
                    sale_price: self.parse_f64(sheet, row, columns::SALE_PRICE)?,
                })
            })
            .collect()
    }

    pub fn map_capacity(&self, sheet: &RawSheet, year: i32) -> ImportResult<Vec<CapacityRecord>> {
        self.require_columns(
            sheet,
            &[
                columns::PROCESS_NAME,
                columns::AVAILABLE_MINUTES,
                columns::AVAILABLE_OPERATORS,
            ],
        )?;
        let has_month = sheet.has_column(columns::MONTH);

        sheet
            .records
            .iter()
            .map(|row| {
                let month = if has_month {
                    Some(self.parse_month(sheet, row, columns::MONTH)?)
                } else {
                    None
                };

                Ok(CapacityRecord {
                    process_name: self.get_required(sheet, row, columns::PROCESS_NAME)?,
                    year,
                    month,
                    available_minutes: self.parse_f64(sheet, row, columns::AVAILABLE_MINUTES)?,
                    available_operators: self.parse_f64(
                        sheet,
                        row,
                        columns::AVAILABLE_OPERATORS,
                    )?,
                })
            })
            .collect()
    }

    pub fn map_costs(&self, sheet: &RawSheet, year: i32) -> ImportResult<Vec<CostRecord>> {
        self.require_columns(
            sheet,
            &[columns::PRODUCT_ID, columns::MONTH, columns::TOTAL_COST],
        )?;

        sheet
            .records
            .iter()
            .map(|row| {
                Ok(CostRecord {
                    product_id: self.parse_id(sheet, row, columns::PRODUCT_ID)?,
                    month: self.parse_month(sheet, row, columns::MONTH)?,
                    year,
                    total_cost: self.parse_f64(sheet, row, columns::TOTAL_COST)?,
                })
            })
            .collect()
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 列名别名（兼容带重音的手工录入表头）
    fn aliases(key: &str) -> Vec<&str> {
        match key {
            columns::CATEGORY => vec![columns::CATEGORY, "Categoría"],
            columns::LINE => vec![columns::LINE, "Línea"],
            columns::UNIT => vec![columns::UNIT, "Unidad"],
            _ => vec![key],
        }
    }

    /// 校验必需列
    fn require_columns(&self, sheet: &RawSheet, required: &[&str]) -> ImportResult<()> {
        for column in required {
            let present = Self::aliases(column)
                .iter()
                .any(|alias| sheet.has_column(alias));
            if !present {
                return Err(ImportError::ColumnMissing {
                    sheet: sheet.name.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// 提取字段（空字符串视为缺失），支持别名
    fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        for alias in Self::aliases(key) {
            if let Some(v) = row.values.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 提取必填字段
    fn get_required(&self, sheet: &RawSheet, row: &RawRecord, key: &str) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::EmptyField {
            sheet: sheet.name.clone(),
            row: row.row_number,
            field: key.to_string(),
        })
    }

    /// 解析主键
    fn parse_id(&self, sheet: &RawSheet, row: &RawRecord, key: &str) -> ImportResult<RecordId> {
        self.get_required(sheet, row, key).map(RecordId::new)
    }

    /// 解析浮点数（非负性不在此校验，边际可为负属于业务结果）
    fn parse_f64(&self, sheet: &RawSheet, row: &RawRecord, key: &str) -> ImportResult<f64> {
        let value = self.get_required(sheet, row, key)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(ImportError::TypeConversionError {
                sheet: sheet.name.clone(),
                row: row.row_number,
                field: key.to_string(),
                message: format!("无法解析为数值: {}", value),
            }),
        }
    }

    /// 解析月份
    fn parse_month(
        &self,
        sheet: &RawSheet,
        row: &RawRecord,
        key: &str,
    ) -> ImportResult<CalendarMonth> {
        let value = self.get_required(sheet, row, key)?;
        value
            .parse::<CalendarMonth>()
            .map_err(|message| ImportError::TypeConversionError {
                sheet: sheet.name.clone(),
                row: row.row_number,
                field: key.to_string(),
                message,
            })
    }
}
