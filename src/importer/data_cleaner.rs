// ==========================================
// 跨店调货建议系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / UPPER / NULL 标准化 / 货号补零 / 负库存截断
// 红线: 销量栏位允许为负（退货）,不做截断
// ==========================================

use crate::domain::inventory::{DqLevel, DqViolation, RawInventoryRecord, ARTICLE_WIDTH};
use crate::importer::field_mapper::{
    COL_MOQ, COL_NET_STOCK, COL_PENDING_RECEIVED, COL_SAFETY_STOCK,
};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn normalize_article(&self, value: &str) -> String {
        let trimmed = value.trim();
        // Excel 数值单元格会带出 ".0"
        let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);

        if !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
            && digits.len() <= ARTICLE_WIDTH
        {
            format!("{:0>width$}", digits, width = ARTICLE_WIDTH)
        } else {
            trimmed.to_string()
        }
    }

    fn clean_record(&self, record: &mut RawInventoryRecord) -> Vec<DqViolation> {
        record.article = self
            .normalize_null(record.article.take())
            .map(|a| self.normalize_article(&a));
        record.description = self.normalize_null(record.description.take());
        record.om = self.normalize_null(record.om.take());
        record.site = self.normalize_null(record.site.take());
        record.site_type = self
            .normalize_null(record.site_type.take())
            .map(|t| self.clean_text(&t, true));

        let mut warnings = Vec::new();
        let row_number = record.row_number;
        let article = record.article.clone();
        let site = record.site.clone();

        for (field, value) in [
            (COL_MOQ, &mut record.moq),
            (COL_NET_STOCK, &mut record.net_stock),
            (COL_PENDING_RECEIVED, &mut record.pending_received),
            (COL_SAFETY_STOCK, &mut record.safety_stock),
        ] {
            if let Some(v) = *value {
                if v < 0.0 {
                    warnings.push(DqViolation {
                        row_number,
                        article: article.clone(),
                        site: site.clone(),
                        level: DqLevel::Warning,
                        field: field.to_string(),
                        message: format!("负数 {} 已截断为 0", v),
                    });
                    *value = Some(0.0);
                }
            }
        }

        warnings
    }
}
