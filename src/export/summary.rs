// ==========================================
// 调货统计汇总导出 (CSV / JSON)
// ==========================================
// JSON: 运行元数据 + 参数快照 + 统计 + 质量结果
// CSV : 分类 / 项目 / 建议数 / 数量 四列,标签随当前语言
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::transfer::{QualityViolation, TransferStatistics};
use crate::domain::types::TransferMode;
use crate::engine::TransferPlan;
use crate::export::error::{ExportError, ExportResult};
use crate::i18n::t;
use chrono::{DateTime, Utc};
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// 汇总（JSON 输出结构）
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: TransferMode,
    pub mode_title: String,
    pub config: AllocationConfig,
    pub article_count: usize,
    pub candidate_count: usize,
    pub need_count: usize,
    pub bumped_count: usize,
    pub statistics: TransferStatistics,
    pub quality_passed: bool,
    pub quality_violations: Vec<QualityViolation>,
}

impl RunSummary {
    pub fn from_plan(plan: &TransferPlan) -> Self {
        Self {
            run_id: plan.run_id,
            generated_at: plan.generated_at,
            mode: plan.mode,
            mode_title: plan.mode.title().to_string(),
            config: plan.config.clone(),
            article_count: plan.article_count,
            candidate_count: plan.candidate_count,
            need_count: plan.need_count,
            bumped_count: plan.bumped_count,
            statistics: plan.statistics.clone(),
            quality_passed: plan.quality.passed,
            quality_violations: plan.quality.violations.clone(),
        }
    }
}

/// 写出 JSON 汇总
pub fn write_summary_json(path: &Path, plan: &TransferPlan) -> ExportResult<()> {
    let summary = RunSummary::from_plan(plan);
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, &summary)?;
    file.flush()?;
    info!(path = %path.display(), run_id = %plan.run_id, "汇总 JSON 已导出");
    Ok(())
}

/// 写出 CSV 汇总到任意 Writer
pub fn write_summary_rows<W: Write>(writer: W, statistics: &TransferStatistics) -> ExportResult<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record([
        t("summary.category"),
        t("summary.item"),
        t("summary.count"),
        t("summary.quantity"),
    ])?;

    let overview = t("summary.overview");
    wtr.write_record([
        overview.clone(),
        t("summary.total"),
        statistics.total_recommendations.to_string(),
        statistics.total_transfer_quantity.to_string(),
    ])?;
    for (key, value) in [
        ("summary.unique_articles", statistics.unique_articles),
        ("summary.unique_transfer_sites", statistics.unique_transfer_sites),
        ("summary.unique_receive_sites", statistics.unique_receive_sites),
    ] {
        wtr.write_record([overview.clone(), t(key), value.to_string(), String::new()])?;
    }

    let by_type = t("summary.by_transfer_type");
    for (transfer_type, stat) in &statistics.transfer_type_stats {
        wtr.write_record([
            by_type.clone(),
            transfer_type.label().to_string(),
            stat.count.to_string(),
            stat.quantity.to_string(),
        ])?;
    }

    let by_need = t("summary.by_need_type");
    for (need_type, stat) in &statistics.need_type_stats {
        wtr.write_record([
            by_need.clone(),
            need_type.label().to_string(),
            stat.count.to_string(),
            stat.quantity.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// 写出 CSV 汇总
pub fn write_summary_csv(path: &Path, plan: &TransferPlan) -> ExportResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(b"\xEF\xBB\xBF")?;
    write_summary_rows(&mut file, &plan.statistics)?;
    file.flush()?;
    info!(path = %path.display(), "汇总 CSV 已导出");
    Ok(())
}

/// 按扩展名选择汇总格式
pub fn write_summary(path: &Path, plan: &TransferPlan) -> ExportResult<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => write_summary_json(path, plan),
        "csv" => write_summary_csv(path, plan),
        _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
    }
}
