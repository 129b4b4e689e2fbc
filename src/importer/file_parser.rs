// ==========================================
// 门店库存调拨 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 编码: CSV 优先 UTF-8，失败回退 Latin-1
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::{FileParser, RawTable};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let bytes = std::fs::read(path)?;
        self.parse_bytes(&path.display().to_string(), &bytes)
    }
}

impl CsvParser {
    /// 解析内存中的 CSV 字节
    ///
    /// # 说明
    /// - 非法 UTF-8 时按 Latin-1 解码后重试
    /// - 仍然失败 → UnreadableInput
    pub fn parse_bytes(&self, source: &str, bytes: &[u8]) -> ImportResult<RawTable> {
        let text = match std::str::from_utf8(bytes) {
            Ok(s) => s.trim_start_matches('\u{feff}').to_string(),
            Err(e) => {
                warn!(source = %source, error = %e, "UTF-8 解码失败，回退 Latin-1");
                decode_latin1(bytes)
            }
        };

        parse_csv_text(source, &text).map_err(|e| ImportError::unreadable(source, e))
    }
}

/// Latin-1 每个字节直接对应同码位字符
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn parse_csv_text(source: &str, text: &str) -> Result<RawTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(text.as_bytes());

    // 读取表头
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = RawTable::new(source, headers);
    for result in reader.records() {
        let record = result?;
        let mut row_map = HashMap::new();

        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = table.headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        table.rows.push(row_map);
    }

    debug!(source = %source, rows = table.rows.len(), "CSV 解析完成");
    Ok(table)
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;
        let source = path.display().to_string();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(source));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开工作簿（xlsx/xls 自动识别）
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_to_text(cell).trim().to_string())
            .collect();

        // 读取数据行
        let mut table = RawTable::new(source.clone(), headers);
        for data_row in rows {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = table.headers.get(col_idx) {
                    row_map.insert(header.clone(), cell_to_text(cell).trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            table.rows.push(row_map);
        }

        debug!(source = %source, sheet = %sheet_name, rows = table.rows.len(), "Excel 解析完成");
        Ok(table)
    }
}

/// 单元格转文本；整数值浮点不带小数部分（条码不能变成 "123.0"）
fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;
        let source = path.display().to_string();
        if !path.exists() {
            return Err(ImportError::FileNotFound(source));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xls" => match ExcelParser.parse_to_raw_table(path) {
                Ok(table) => Ok(table),
                Err(excel_err) => {
                    // 扩展名与内容不符时（如导出的 CSV 被命名为 .xls）按 CSV 重试
                    warn!(source = %source, error = %excel_err, "Excel 解析失败，尝试按 CSV 读取");
                    let bytes = std::fs::read(path)?;
                    CsvParser
                        .parse_bytes(&source, &bytes)
                        .map_err(|_| ImportError::unreadable(&source, excel_err))
                }
            },
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
