// ==========================================
// 跨店调货建议系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, ParsedSheet, RawRow};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装一行；完全空白的行返回 None
fn build_row<I>(headers: &[String], values: I, row_number: usize) -> Option<RawRow>
where
    I: IntoIterator<Item = String>,
{
    let mut cells = HashMap::new();
    for (col_idx, value) in values.into_iter().enumerate() {
        if let Some(header) = headers.get(col_idx) {
            if header.is_empty() {
                continue;
            }
            cells.insert(header.clone(), value.trim().to_string());
        }
    }

    if cells.values().all(|v| v.is_empty()) {
        return None;
    }

    Some(RawRow { row_number, cells })
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !ext.is_empty() && ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头占第 1 行
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            if let Some(row) = build_row(&headers, record.iter().map(str::to_string), row_number) {
                rows.push(row);
            }
        }

        Ok(ParsedSheet { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            let row_number = idx + 2;
            let values = data_row.iter().map(|cell| cell.to_string());
            if let Some(row) = build_row(&headers, values, row_number) {
                rows.push(row);
            }
        }

        Ok(ParsedSheet { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_raw_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_rows(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
