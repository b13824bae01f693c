// ==========================================
// 跨店调货建议系统 - 数据质量校验器实现
// ==========================================
// 职责: 必填 / 格式 / 数量 / 唯一键校验 + DQ 报告生成
// 红线: ERROR 阻断该行进入引擎,WARNING 仅记录
// ==========================================

use crate::domain::inventory::{
    is_valid_article, DqLevel, DqReport, DqSummary, DqViolation, RawInventoryRecord,
    MAX_QUANTITY,
};
use crate::domain::types::SiteType;
use crate::importer::field_mapper::{
    COL_ARTICLE, COL_LAST_MONTH_SOLD, COL_MOQ, COL_MTD_SOLD, COL_NET_STOCK, COL_OM,
    COL_PENDING_RECEIVED, COL_RP_TYPE, COL_SAFETY_STOCK, COL_SITE,
};
use crate::importer::importer_trait::DqValidator as DqValidatorTrait;
use std::collections::HashMap;

pub struct DqValidator;

fn violation(
    record: &RawInventoryRecord,
    level: DqLevel,
    field: &str,
    message: String,
) -> DqViolation {
    DqViolation {
        row_number: record.row_number,
        article: record.article.clone(),
        site: record.site.clone(),
        level,
        field: field.to_string(),
        message,
    }
}

impl DqValidatorTrait for DqValidator {
    /// 校验必填文本字段（货号 / OM / 店铺 / RP Type）
    fn validate_required_fields(&self, record: &RawInventoryRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        for (field, value) in [
            (COL_ARTICLE, &record.article),
            (COL_OM, &record.om),
            (COL_SITE, &record.site),
            (COL_RP_TYPE, &record.site_type),
        ] {
            if value.is_none() {
                violations.push(violation(
                    record,
                    DqLevel::Error,
                    field,
                    format!("{} 缺失", field),
                ));
            }
        }

        if record.description.is_none() {
            violations.push(violation(
                record,
                DqLevel::Info,
                "Article Description",
                "货品描述为空".to_string(),
            ));
        }

        violations
    }

    /// 校验货号与 RP Type 格式
    fn validate_formats(&self, record: &RawInventoryRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        if let Some(article) = &record.article {
            if !is_valid_article(article) || !article.chars().all(|c| c.is_ascii_digit()) {
                violations.push(violation(
                    record,
                    DqLevel::Error,
                    COL_ARTICLE,
                    format!("Article 必须是 12 位数字文本: {}", article),
                ));
            }
        }

        if let Some(site_type) = &record.site_type {
            if let Err(message) = site_type.parse::<SiteType>() {
                violations.push(violation(record, DqLevel::Error, COL_RP_TYPE, message));
            }
        }

        violations
    }

    /// 校验数量字段：缺失按 0 处理、小数截断（均为警告）；超出范围为错误
    fn validate_quantities(&self, record: &RawInventoryRecord) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        for (field, value) in [
            (COL_MOQ, record.moq),
            (COL_NET_STOCK, record.net_stock),
            (COL_PENDING_RECEIVED, record.pending_received),
            (COL_SAFETY_STOCK, record.safety_stock),
            (COL_LAST_MONTH_SOLD, record.last_month_sold),
            (COL_MTD_SOLD, record.mtd_sold),
        ] {
            match value {
                None => violations.push(violation(
                    record,
                    DqLevel::Warning,
                    field,
                    "数值为空，按 0 处理".to_string(),
                )),
                Some(v) if !v.is_finite() || v.abs() > MAX_QUANTITY as f64 => {
                    violations.push(violation(
                        record,
                        DqLevel::Error,
                        field,
                        format!("数值 {} 超出允许范围 (±{})", v, MAX_QUANTITY),
                    ))
                }
                Some(v) if v.fract() != 0.0 => violations.push(violation(
                    record,
                    DqLevel::Warning,
                    field,
                    format!("数值 {} 非整数，截断为 {}", v, v.trunc()),
                )),
                Some(_) => {}
            }
        }

        violations
    }

    /// 校验 (货号, 店铺) 唯一：首次出现的行保留，后续重复行阻断
    fn validate_unique_keys(&self, records: &[RawInventoryRecord]) -> Vec<DqViolation> {
        let mut violations = Vec::new();
        let mut seen: HashMap<(&str, &str), usize> = HashMap::new();

        for record in records {
            let (Some(article), Some(site)) = (&record.article, &record.site) else {
                continue;
            };

            match seen.get(&(article.as_str(), site.as_str())) {
                Some(first_row) => violations.push(violation(
                    record,
                    DqLevel::Error,
                    "Article,Site",
                    format!("货号与店铺重复（首次出现于第 {} 行）", first_row),
                )),
                None => {
                    seen.insert((article.as_str(), site.as_str()), record.row_number);
                }
            }
        }

        violations
    }

    fn generate_dq_report(
        &self,
        batch_id: String,
        summary: DqSummary,
        violations: Vec<DqViolation>,
    ) -> DqReport {
        DqReport {
            batch_id,
            summary,
            violations,
        }
    }
}
