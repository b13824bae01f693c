// ==========================================
// 跨店调货建议系统 - 字段映射器实现
// ==========================================
// 职责: 源栏位 → 标准字段映射 + 类型转换
// ==========================================

use crate::domain::inventory::RawInventoryRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FieldMapper as FieldMapperTrait, RawRow};
use std::collections::HashMap;

// ===== 标准栏位名 =====
pub const COL_ARTICLE: &str = "Article";
pub const COL_DESCRIPTION: &str = "Article Description";
pub const COL_OM: &str = "OM";
pub const COL_RP_TYPE: &str = "RP Type";
pub const COL_SITE: &str = "Site";
pub const COL_MOQ: &str = "MOQ";
pub const COL_NET_STOCK: &str = "SaSa Net Stock";
pub const COL_PENDING_RECEIVED: &str = "Pending Received";
pub const COL_SAFETY_STOCK: &str = "Safety Stock";
pub const COL_LAST_MONTH_SOLD: &str = "Last Month Sold Qty";
pub const COL_MTD_SOLD: &str = "MTD Sold Qty";

/// 必需栏位（按源文件表头顺序）
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_ARTICLE,
    COL_DESCRIPTION,
    COL_OM,
    COL_RP_TYPE,
    COL_SITE,
    COL_MOQ,
    COL_NET_STOCK,
    COL_PENDING_RECEIVED,
    COL_SAFETY_STOCK,
    COL_LAST_MONTH_SOLD,
    COL_MTD_SOLD,
];

/// 栏位别名（第一个为标准名）
fn aliases(key: &str) -> &'static [&'static str] {
    match key {
        COL_DESCRIPTION => &["Article Description", "Article Long Text (60 Chars)"],
        COL_ARTICLE => &["Article"],
        COL_OM => &["OM"],
        COL_RP_TYPE => &["RP Type"],
        COL_SITE => &["Site"],
        COL_MOQ => &["MOQ"],
        COL_NET_STOCK => &["SaSa Net Stock"],
        COL_PENDING_RECEIVED => &["Pending Received"],
        COL_SAFETY_STOCK => &["Safety Stock"],
        COL_LAST_MONTH_SOLD => &["Last Month Sold Qty"],
        COL_MTD_SOLD => &["MTD Sold Qty"],
        _ => &[],
    }
}

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|col| {
                !aliases(col)
                    .iter()
                    .any(|alias| headers.iter().any(|h| h == alias))
            })
            .map(|col| col.to_string())
            .collect()
    }

    fn map_to_raw_inventory(&self, row: &RawRow) -> ImportResult<RawInventoryRecord> {
        let cells = &row.cells;
        let row_number = row.row_number;

        Ok(RawInventoryRecord {
            // 货品
            article: self.get_string(cells, COL_ARTICLE),
            description: self.get_string(cells, COL_DESCRIPTION),

            // 店铺
            om: self.get_string(cells, COL_OM),
            site_type: self.get_string(cells, COL_RP_TYPE),
            site: self.get_string(cells, COL_SITE),

            // 库存
            moq: self.parse_f64(cells, COL_MOQ, row_number)?,
            net_stock: self.parse_f64(cells, COL_NET_STOCK, row_number)?,
            pending_received: self.parse_f64(cells, COL_PENDING_RECEIVED, row_number)?,
            safety_stock: self.parse_f64(cells, COL_SAFETY_STOCK, row_number)?,

            // 销售
            last_month_sold: self.parse_f64(cells, COL_LAST_MONTH_SOLD, row_number)?,
            mtd_sold: self.parse_f64(cells, COL_MTD_SOLD, row_number)?,

            row_number,
        })
    }
}

impl FieldMapper {
    /// 提取字符串字段，依次尝试别名，空白视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for alias in aliases(key) {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// 解析数值（允许千分位逗号）
    fn parse_f64(
        &self,
        row: &HashMap<String, String>,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                let normalized = value.replace(',', "");
                normalized
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some)
                    .ok_or_else(|| ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("无法解析为数值: {}", value),
                    })
            }
        }
    }
}
