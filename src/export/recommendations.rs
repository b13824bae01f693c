// ==========================================
// 调货建议明细导出 (CSV)
// ==========================================
// 列顺序固定为 18 列；货号按 12 位文本原样写出
// 文件以 UTF-8 BOM 开头,便于 Excel 正确识别中文
// ==========================================

use crate::domain::transfer::TransferRecommendation;
use crate::export::error::ExportResult;
use csv::Writer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const RECOMMENDATION_COLUMNS: [&str; 18] = [
    "Article",
    "Product Desc",
    "Transfer OM",
    "Transfer Site",
    "Receive OM",
    "Receive Site",
    "Transfer Qty",
    "Transfer Site Original Stock",
    "Transfer Site After Transfer Stock",
    "Transfer Site Safety Stock",
    "Transfer Site MOQ",
    "Remark",
    "Transfer Site Last Month Sold Qty",
    "Transfer Site MTD Sold Qty",
    "Receive Site Last Month Sold Qty",
    "Receive Site MTD Sold Qty",
    "Receive Original Stock",
    "Notes",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn to_row(rec: &TransferRecommendation) -> [String; 18] {
    [
        rec.article.clone(),
        rec.product_desc.clone(),
        rec.transfer_om.clone(),
        rec.transfer_site.clone(),
        rec.receive_om.clone(),
        rec.receive_site.clone(),
        rec.transfer_qty.to_string(),
        rec.transfer_site_original_stock.to_string(),
        rec.transfer_site_after_stock.to_string(),
        rec.transfer_site_safety_stock.to_string(),
        rec.transfer_site_moq.to_string(),
        rec.remark.clone(),
        rec.transfer_site_last_month_sold.to_string(),
        rec.transfer_site_mtd_sold.to_string(),
        rec.receive_site_last_month_sold.to_string(),
        rec.receive_site_mtd_sold.to_string(),
        rec.receive_original_stock.to_string(),
        rec.notes.clone(),
    ]
}

/// 写出调货建议到任意 Writer（不含 BOM）
pub fn write_recommendations<W: Write>(writer: W, recommendations: &[TransferRecommendation]) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(RECOMMENDATION_COLUMNS)?;
    for rec in recommendations {
        wtr.write_record(to_row(rec))?;
    }
    wtr.flush()?;
    Ok(())
}

/// 写出调货建议 CSV 文件
pub fn write_recommendations_csv(path: &Path, recommendations: &[TransferRecommendation]) -> ExportResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;
    write_recommendations(&mut file, recommendations)?;
    file.flush()?;

    info!(
        path = %path.display(),
        rows = recommendations.len(),
        "调货建议已导出"
    );
    Ok(())
}
