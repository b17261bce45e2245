// ==========================================
// 纺织生产经营看板 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（多工作表）
// 支持: Excel (.xlsx/.xlsm/.xls/.ods) / CSV 目录（每张工作表一个 <SHEET>.csv）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawSheet - 原始工作表
// ==========================================
#[derive(Debug, Clone)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawSheet {
    /// 是否包含指定列
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// 原始行记录（列名 → 单元格文本）
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// 表格中的行号（表头为第 1 行）
    pub row_number: usize,
    pub values: HashMap<String, String>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 按名称读取多张工作表
// 实现者: ExcelParser, CsvDirectoryParser
pub trait FileParser: Send + Sync {
    /// 读取指定工作表
    ///
    /// # 参数
    /// - path: 工作簿文件或 CSV 目录
    /// - sheet_names: 需要读取的工作表名称
    ///
    /// # 返回
    /// - Ok(Vec<RawSheet>): 与 sheet_names 顺序一致
    /// - Err: 任一工作表缺失或无法解析
    fn parse_sheets(&self, path: &Path, sheet_names: &[String]) -> ImportResult<Vec<RawSheet>>;
}

/// 由表头与数据行构造原始表，跳过完全空白的行
///
/// first_data_row: 第一条数据在源表中的行号（1 起）
fn build_raw_sheet<I>(
    name: &str,
    headers: Vec<String>,
    rows: I,
    first_data_row: usize,
) -> RawSheet
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut records = Vec::new();
    for (idx, row) in rows.into_iter().enumerate() {
        let mut values = HashMap::new();
        for (col_idx, value) in row.into_iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                values.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.is_empty()) {
            continue;
        }

        records.push(RawRecord {
            row_number: first_data_row + idx,
            values,
        });
    }

    RawSheet {
        name: name.to_string(),
        headers,
        records,
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    const EXTENSIONS: [&'static str; 4] = ["xlsx", "xlsm", "xls", "ods"];

    pub fn supports(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| Self::EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

impl FileParser for ExcelParser {
    fn parse_sheets(&self, path: &Path, sheet_names: &[String]) -> ImportResult<Vec<RawSheet>> {
        // 检查文件存在
        if !path.is_file() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if !Self::supports(path) {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        // 打开工作簿（一次打开，读取全部所需工作表）
        let mut workbook = open_workbook_auto(path)?;
        let available = workbook.sheet_names().to_vec();

        let mut result = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            if !available.iter().any(|s| s == sheet_name) {
                return Err(ImportError::SheetMissing(sheet_name.clone()));
            }

            let range = workbook.worksheet_range(sheet_name)?;
            // 区间从首个非空单元格开始，行号需加上其偏移
            let header_row_number = range
                .start()
                .map(|(row, _)| row as usize + 1)
                .unwrap_or(1);

            // 提取表头（第一行）
            let mut rows = range.rows();
            let header_row = rows.next().ok_or_else(|| {
                ImportError::ExcelParseError(format!("工作表 {} 无表头", sheet_name))
            })?;
            let headers: Vec<String> = header_row
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            let data_rows = rows.map(|row| row.iter().map(|cell| cell.to_string()).collect());
            let sheet =
                build_raw_sheet(sheet_name, headers, data_rows, header_row_number + 1);

            tracing::debug!(
                sheet = %sheet_name,
                rows = sheet.records.len(),
                "工作表读取完成"
            );
            result.push(sheet);
        }

        Ok(result)
    }
}

// ==========================================
// CSV 目录 Parser 实现
// ==========================================
// 目录下每张工作表对应一个 <SHEET>.csv
pub struct CsvDirectoryParser;

impl CsvDirectoryParser {
    fn parse_file(&self, file_path: &Path, sheet_name: &str) -> ImportResult<RawSheet> {
        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.to_string()).collect::<Vec<_>>());
        }

        Ok(build_raw_sheet(sheet_name, headers, rows, 2))
    }
}

impl FileParser for CsvDirectoryParser {
    fn parse_sheets(&self, path: &Path, sheet_names: &[String]) -> ImportResult<Vec<RawSheet>> {
        if !path.is_dir() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut result = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let file_path = path.join(format!("{}.csv", sheet_name));
            if !file_path.is_file() {
                return Err(ImportError::SheetMissing(sheet_name.clone()));
            }

            let sheet = self.parse_file(&file_path, sheet_name)?;
            tracing::debug!(
                sheet = %sheet_name,
                rows = sheet.records.len(),
                "CSV 工作表读取完成"
            );
            result.push(sheet);
        }

        Ok(result)
    }
}

// ==========================================
// 通用文件解析器（根据路径自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(
        &self,
        path: P,
        sheet_names: &[String],
    ) -> ImportResult<Vec<RawSheet>> {
        let path = path.as_ref();

        if path.is_dir() {
            return CsvDirectoryParser.parse_sheets(path, sheet_names);
        }
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if ExcelParser::supports(path) {
            return ExcelParser.parse_sheets(path, sheet_names);
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        Err(ImportError::UnsupportedFormat(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, lines: &[&str]) {
        let mut file = File::create(dir.path().join(format!("{}.csv", name))).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_csv_directory_parser_valid_sheets() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "INSUMOS", &["ID_Insumo,Nombre_Insumo", "I01,Hilo", "I02,Tela"]);

        let sheets = CsvDirectoryParser
            .parse_sheets(dir.path(), &["INSUMOS".to_string()])
            .unwrap();

        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].records.len(), 2);
        assert_eq!(sheets[0].records[0].row_number, 2);
        assert_eq!(
            sheets[0].records[1].values.get("Nombre_Insumo"),
            Some(&"Tela".to_string())
        );
        assert!(sheets[0].has_column("ID_Insumo"));
    }

    #[test]
    fn test_csv_directory_parser_missing_sheet() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "INSUMOS", &["ID_Insumo", "I01"]);

        let result = CsvDirectoryParser.parse_sheets(
            dir.path(),
            &["INSUMOS".to_string(), "PROCESOS".to_string()],
        );
        assert!(matches!(result, Err(ImportError::SheetMissing(name)) if name == "PROCESOS"));
    }

    #[test]
    fn test_csv_directory_parser_skip_empty_rows() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "PROCESOS", &["ID_Proceso,Nombre_Proceso", "1,Corte", ",", "2,Costura"]);

        let sheets = CsvDirectoryParser
            .parse_sheets(dir.path(), &["PROCESOS".to_string()])
            .unwrap();
        assert_eq!(sheets[0].records.len(), 2);
        // 行号保留原始位置
        assert_eq!(sheets[0].records[1].row_number, 4);
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.txt");
        File::create(&path).unwrap();

        let result = UniversalFileParser.parse(&path, &["PRODUCTOS".to_string()]);
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_universal_parser_file_not_found() {
        let result =
            UniversalFileParser.parse("no_existe.xlsx", &["PRODUCTOS".to_string()]);
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
