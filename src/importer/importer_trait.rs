// ==========================================
// 跨店调货建议系统 - 库存导入 Trait
// ==========================================
// 职责: 定义库存导入管道各阶段接口（不包含实现）
// 管道: 解析 → 映射 → 去重 → 清洗 → 校验 → 转换
// ==========================================

use crate::domain::inventory::{DqReport, DqSummary, DqViolation, ImportOutcome, RawInventoryRecord};
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 文件中的一行数据（表头 → 单元格文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 原始文件行号（表头为第 1 行）
    pub row_number: usize,
    pub cells: HashMap<String, String>,
}

/// 解析后的工作表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// InventoryImporter Trait
// ==========================================
// 实现者: InventoryImporterImpl
pub trait InventoryImporter {
    /// 导入库存文件（.xlsx / .xls / .csv）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 通过校验的记录 + DQ 报告（被阻断的行不在 records 中）
    /// - Err: 文件不可读或缺少必需栏位
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser {
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 实现者: FieldMapper
pub trait FieldMapper {
    /// 返回缺失的必需栏位（已考虑别名）
    fn missing_columns(&self, headers: &[String]) -> Vec<String>;

    fn map_to_raw_inventory(&self, row: &RawRow) -> ImportResult<RawInventoryRecord>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 实现者: DataCleaner
pub trait DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    fn normalize_null(&self, value: Option<String>) -> Option<String>;

    /// 货号标准化: 去除末尾 ".0",纯数字左补零至 12 位
    fn normalize_article(&self, value: &str) -> String;

    /// 就地清洗一条记录,返回清洗过程中产生的警告
    fn clean_record(&self, record: &mut RawInventoryRecord) -> Vec<DqViolation>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 实现者: DqValidator
pub trait DqValidator {
    fn validate_required_fields(&self, record: &RawInventoryRecord) -> Vec<DqViolation>;

    fn validate_formats(&self, record: &RawInventoryRecord) -> Vec<DqViolation>;

    fn validate_quantities(&self, record: &RawInventoryRecord) -> Vec<DqViolation>;

    /// (货号, 店铺) 重复校验
    fn validate_unique_keys(&self, records: &[RawInventoryRecord]) -> Vec<DqViolation>;

    fn generate_dq_report(
        &self,
        batch_id: String,
        summary: DqSummary,
        violations: Vec<DqViolation>,
    ) -> DqReport;
}
