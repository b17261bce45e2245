// ==========================================
// 纺织生产经营看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 原则: 加载失败即整体失败（不做部分降级）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xls/.ods 或 CSV 目录）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 结构错误 =====
    #[error("缺少工作表: {0}")]
    SheetMissing(String),

    #[error("工作表 {sheet} 缺少列: {column}")]
    ColumnMissing { sheet: String, column: String },

    // ===== 数据映射错误 =====
    #[error("字段为空 (工作表 {sheet}, 行 {row}, 字段 {field})")]
    EmptyField {
        sheet: String,
        row: usize,
        field: String,
    },

    #[error("类型转换失败 (工作表 {sheet}, 行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        sheet: String,
        row: usize,
        field: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
