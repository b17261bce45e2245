// ==========================================
// 纺织生产经营看板 - 导入层
// ==========================================
// 职责: 外部工作簿一次性导入,生成只读数据表
// 支持: Excel (.xlsx/.xlsm/.xls/.ods), CSV 目录
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod sheet_catalog;
pub mod workbook_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    CsvDirectoryParser, ExcelParser, FileParser, RawRecord, RawSheet, UniversalFileParser,
};
pub use workbook_importer::WorkbookImporter;
