// ==========================================
// 纺织生产经营看板 - 工作簿导入器
// ==========================================
// 导入流程:
// 1. 文件读取与解析（17 张工作表，缺一即失败）
// 2. 字段映射与类型转换
// 3. 组装只读 DataStore
// 红线: 全有或全无，不做部分降级
// ==========================================

use crate::domain::types::SUPPORTED_YEARS;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::sheet_catalog::{self, sheets};
use crate::repository::data_store::{DataStore, DataTables, SourceInfo};
use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

pub struct WorkbookImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl Default for WorkbookImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }

    /// 加载工作簿为 DataStore
    ///
    /// # 参数
    /// - path: 工作簿文件（.xlsx 等）或 CSV 目录
    ///
    /// # 返回
    /// - Ok(DataStore): 全部 17 张表加载成功
    /// - Err(ImportError): 任一表缺失/缺列/无法解析
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ImportResult<DataStore> {
        let path = path.as_ref();
        let started = Instant::now();
        tracing::info!(path = %path.display(), "开始加载工作簿");

        let required = sheet_catalog::required_sheets();
        let parsed = self.parser.parse(path, &required)?;
        let mut by_name: HashMap<String, RawSheet> = parsed
            .into_iter()
            .map(|sheet| (sheet.name.clone(), sheet))
            .collect();

        let tables = self.map_tables(&mut by_name)?;
        let store = DataStore::with_source(
            tables,
            SourceInfo {
                path: Some(path.to_path_buf()),
                loaded_at: Utc::now(),
            },
        );

        for (table, rows) in store.row_counts() {
            tracing::debug!(table, rows, "数据表行数");
        }
        tracing::info!(
            path = %path.display(),
            products = store.products().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "工作簿加载完成"
        );

        Ok(store)
    }

    /// 映射全部工作表
    fn map_tables(&self, by_name: &mut HashMap<String, RawSheet>) -> ImportResult<DataTables> {
        let mut tables = DataTables {
            products: self.mapper.map_products(&take(by_name, sheets::PRODUCTS)?)?,
            supplies: self.mapper.map_supplies(&take(by_name, sheets::SUPPLIES)?)?,
            processes: self.mapper.map_processes(&take(by_name, sheets::PROCESSES)?)?,
            supply_consumption: self
                .mapper
                .map_supply_consumption(&take(by_name, sheets::SUPPLY_CONSUMPTION)?)?,
            process_times: self
                .mapper
                .map_process_times(&take(by_name, sheets::PROCESS_TIMES)?)?,
            ..Default::default()
        };

        for year in SUPPORTED_YEARS {
            let demand_sheet = take(by_name, &sheet_catalog::demand_sheet(year))?;
            tables
                .demand
                .insert(year, self.mapper.map_demand(&demand_sheet, year)?);

            let capacity_sheet = take(by_name, &sheet_catalog::capacity_sheet(year))?;
            tables
                .capacity
                .insert(year, self.mapper.map_capacity(&capacity_sheet, year)?);

            let cost_sheet = take(by_name, &sheet_catalog::cost_sheet(year))?;
            tables
                .costs
                .insert(year, self.mapper.map_costs(&cost_sheet, year)?);
        }

        Ok(tables)
    }
}

fn take(by_name: &mut HashMap<String, RawSheet>, name: &str) -> ImportResult<RawSheet> {
    by_name
        .remove(name)
        .ok_or_else(|| ImportError::SheetMissing(name.to_string()))
}
