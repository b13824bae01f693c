// ==========================================
// 跨店调货建议系统 - 库存数据导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到 InventoryRecord
// 流程: 解析 → 栏位检查 → 映射 → 去重 → 清洗 → 校验 → 转换
// ==========================================

use crate::domain::inventory::{
    DqLevel, DqSummary, DqViolation, ImportOutcome, InventoryRecord, InventoryStats,
    RawInventoryRecord,
};
use crate::domain::types::SiteType;
use crate::importer::data_cleaner::DataCleaner as StandardDataCleaner;
use crate::importer::dq_validator::DqValidator as StandardDqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as StandardFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{
    DataCleaner, DqValidator, FieldMapper, FileParser, InventoryImporter,
};
use chrono::Utc;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// InventoryImporterImpl - 库存数据导入器实现
// ==========================================
pub struct InventoryImporterImpl {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
}

impl InventoryImporterImpl {
    /// 使用自定义组件创建导入器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
            dq_validator,
        }
    }

    /// 标准组件组装（按扩展名选择解析器）
    pub fn standard() -> Self {
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(StandardFieldMapper),
            Box::new(StandardDataCleaner),
            Box::new(StandardDqValidator),
        )
    }
}

impl Default for InventoryImporterImpl {
    fn default() -> Self {
        Self::standard()
    }
}

impl InventoryImporter for InventoryImporterImpl {
    #[instrument(skip(self, file_path), fields(batch_id))]
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(batch_id = %batch_id, file_path = %file_path.display(), "开始导入库存数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let sheet = self.file_parser.parse_to_raw_rows(file_path)?;
        let total_rows = sheet.rows.len();
        info!(total_rows = total_rows, "文件解析完成");

        // === 步骤 2: 栏位检查 ===
        debug!("步骤 2: 栏位检查");
        let missing = self.field_mapper.missing_columns(&sheet.headers);
        if !missing.is_empty() {
            warn!(missing = ?missing, "缺少必需栏位");
            return Err(ImportError::MissingColumns(missing));
        }

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let mut violations: Vec<DqViolation> = Vec::new();
        let mut records: Vec<RawInventoryRecord> = Vec::with_capacity(total_rows);
        for row in &sheet.rows {
            match self.field_mapper.map_to_raw_inventory(row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(row_number = row.row_number, error = %e, "字段映射失败");
                    violations.push(DqViolation {
                        row_number: row.row_number,
                        article: row.cells.get("Article").cloned(),
                        site: row.cells.get("Site").cloned(),
                        level: DqLevel::Error,
                        field: match &e {
                            ImportError::TypeConversionError { field, .. } => field.clone(),
                            _ => String::new(),
                        },
                        message: e.to_string(),
                    });
                }
            }
        }
        info!(
            success = records.len(),
            failed = total_rows - records.len(),
            "字段映射完成"
        );

        // === 步骤 4: 完全重复行去重 ===
        debug!("步骤 4: 去重");
        let before_dedup = records.len();
        let mut seen_keys = HashSet::new();
        records.retain(|r| seen_keys.insert(r.dedup_key()));
        let duplicates_removed = before_dedup - records.len();
        if duplicates_removed > 0 {
            info!(duplicates_removed = duplicates_removed, "移除完全重复行");
        }

        // === 步骤 5: 数据清洗 ===
        debug!("步骤 5: 数据清洗");
        for record in &mut records {
            violations.extend(self.data_cleaner.clean_record(record));
        }

        // === 步骤 6: DQ 校验 ===
        debug!("步骤 6: DQ 校验");
        for record in &records {
            violations.extend(self.dq_validator.validate_required_fields(record));
            violations.extend(self.dq_validator.validate_formats(record));
            violations.extend(self.dq_validator.validate_quantities(record));
        }
        violations.extend(self.dq_validator.validate_unique_keys(&records));
        violations.sort_by_key(|v| v.row_number);

        let blocked_rows: BTreeSet<usize> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Error)
            .map(|v| v.row_number)
            .collect();
        let warning_rows: BTreeSet<usize> = violations
            .iter()
            .filter(|v| v.level == DqLevel::Warning)
            .map(|v| v.row_number)
            .collect();
        info!(
            blocked = blocked_rows.len(),
            warning = warning_rows.len(),
            "DQ 校验完成"
        );

        // === 步骤 7: 转换为 InventoryRecord ===
        debug!("步骤 7: 转换为 InventoryRecord");
        let inventory: Vec<InventoryRecord> = records
            .iter()
            .filter(|r| !blocked_rows.contains(&r.row_number))
            .filter_map(to_inventory_record)
            .collect();

        let summary = DqSummary {
            total_rows,
            success: inventory.len(),
            blocked: blocked_rows.len(),
            warning: warning_rows.len(),
            duplicates_removed,
        };
        let report = self
            .dq_validator
            .generate_dq_report(batch_id.clone(), summary, violations);
        let stats = InventoryStats::from_records(&inventory);
        let elapsed = start_time.elapsed();

        info!(
            batch_id = %batch_id,
            total = total_rows,
            success = inventory.len(),
            blocked = report.summary.blocked,
            elapsed_ms = elapsed.as_millis(),
            "库存数据导入完成"
        );

        Ok(ImportOutcome {
            batch_id,
            file_name: file_path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string),
            imported_at: Utc::now(),
            elapsed_ms: elapsed.as_millis(),
            records: inventory,
            report,
            stats,
        })
    }
}

impl ImportOutcome {
    /// 存在被阻断的行时返回错误
    pub fn ensure_clean(&self) -> ImportResult<()> {
        if self.report.summary.blocked > 0 {
            return Err(ImportError::DataQualityRejected {
                batch_id: self.batch_id.clone(),
                blocked: self.report.summary.blocked,
            });
        }
        Ok(())
    }
}

/// 已通过校验的记录转换为引擎输入；数值缺失按 0，小数截断
fn to_inventory_record(raw: &RawInventoryRecord) -> Option<InventoryRecord> {
    let qty = |v: Option<f64>| v.unwrap_or(0.0).trunc() as i64;

    Some(InventoryRecord {
        article: raw.article.clone()?,
        description: raw.description.clone().unwrap_or_default(),
        om: raw.om.clone()?,
        site: raw.site.clone()?,
        site_type: raw.site_type.as_deref()?.parse::<SiteType>().ok()?,
        moq: qty(raw.moq),
        net_stock: qty(raw.net_stock),
        pending_received: qty(raw.pending_received),
        safety_stock: qty(raw.safety_stock),
        last_month_sold: qty(raw.last_month_sold),
        mtd_sold: qty(raw.mtd_sold),
    })
}
