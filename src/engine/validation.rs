// ==========================================
// 跨店调货建议系统 - 引擎输入契约校验
// ==========================================
// 职责: 分类前校验记录,任一违规即拒绝整批
// 红线: 货号格式不在此校验,由质量检查报告
// ==========================================

use crate::domain::inventory::{InventoryRecord, MAX_QUANTITY};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashMap;
use tracing::warn;

/// 校验引擎输入
///
/// # 规则
/// 1. 货号 / 店铺 / OM 非空
/// 2. MOQ / 净库存 / 在途 / 安全库存 ≥ 0（销量允许为负）
/// 3. 全部数量字段绝对值 ≤ MAX_QUANTITY
/// 4. (货号, 店铺) 唯一
pub fn validate_records(records: &[InventoryRecord]) -> EngineResult<()> {
    let mut seen: HashMap<(&str, &str), usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        for (field, value) in [
            ("article", &record.article),
            ("site", &record.site),
            ("om", &record.om),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(index, record, field, "不能为空".to_string()));
            }
        }

        for (field, value) in [
            ("moq", record.moq),
            ("net_stock", record.net_stock),
            ("pending_received", record.pending_received),
            ("safety_stock", record.safety_stock),
        ] {
            if value < 0 {
                return Err(invalid(index, record, field, format!("不能为负数: {}", value)));
            }
        }

        for (field, value) in [
            ("moq", record.moq),
            ("net_stock", record.net_stock),
            ("pending_received", record.pending_received),
            ("safety_stock", record.safety_stock),
            ("last_month_sold", record.last_month_sold),
            ("mtd_sold", record.mtd_sold),
        ] {
            if value.unsigned_abs() > MAX_QUANTITY as u64 {
                return Err(invalid(index, record, field, format!("超出允许范围: {}", value)));
            }
        }

        if let Some(&first_index) = seen.get(&(record.article.as_str(), record.site.as_str())) {
            warn!(article = %record.article, site = %record.site, "重复的货号与店铺");
            return Err(EngineError::DuplicateRecord {
                article: record.article.clone(),
                site: record.site.clone(),
                first_index,
                index,
            });
        }
        seen.insert((record.article.as_str(), record.site.as_str()), index);
    }

    Ok(())
}

fn invalid(index: usize, record: &InventoryRecord, field: &str, message: String) -> EngineError {
    warn!(index = index, field = field, message = %message, "输入记录无效");
    EngineError::InvalidRecord {
        index,
        article: record.article.clone(),
        site: record.site.clone(),
        field: field.to_string(),
        message,
    }
}
