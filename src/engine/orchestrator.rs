// ==========================================
// 跨店调货建议系统 - 引擎编排器
// ==========================================
// 用途: 协调分类 / 匹配 / 数量提升 / 质量检查 / 统计的执行顺序
// 流程: 校验 → 按货号分组(首次出现顺序) → 分类 → 匹配 → 拼接
//       → 数量提升 → 质量检查 → 统计
// 红线: 同一输入 + 同一模式 → 同一建议序列（含顺序）
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::transfer::{QualityReport, TransferRecommendation, TransferStatistics};
use crate::domain::types::TransferMode;
use crate::engine::classifier::Classifier;
use crate::engine::error::EngineResult;
use crate::engine::matcher::Matcher;
use crate::engine::quality::QualityChecker;
use crate::engine::statistics::summarize;
use crate::engine::validation::validate_records;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// TransferPlan - 单次计算结果
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct TransferPlan {
    // ===== 运行元数据 =====
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: TransferMode,
    pub config: AllocationConfig,

    // ===== 分类规模 =====
    pub article_count: usize,
    pub candidate_count: usize,
    pub need_count: usize,
    pub bumped_count: usize,

    // ===== 输出 =====
    pub recommendations: Vec<TransferRecommendation>,
    pub quality: QualityReport,
    pub statistics: TransferStatistics,
}

// ==========================================
// TransferPlanner - 引擎编排器
// ==========================================

pub struct TransferPlanner {
    config: AllocationConfig,
    classifier: Classifier,
    matcher: Matcher,
    quality: QualityChecker,
}

impl TransferPlanner {
    /// 创建编排器（参数先校验）
    pub fn new(config: AllocationConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: Classifier::new(config.clone()),
            matcher: Matcher::new(config.clone()),
            quality: QualityChecker::new(),
            config,
        })
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// 执行完整调货计算
    ///
    /// # 参数
    /// - `records`: 库存记录（任意顺序,(货号, 店铺) 唯一）
    /// - `mode`: 调货模式
    ///
    /// # 返回
    /// 调货结果；输入契约违规时返回错误且不产生任何建议
    #[instrument(skip(self, records), fields(mode = %mode, records = records.len()))]
    pub fn plan(&self, records: &[InventoryRecord], mode: TransferMode) -> EngineResult<TransferPlan> {
        info!(mode_title = mode.title(), "开始执行调货计算");

        // ==========================================
        // 步骤1: 输入契约校验
        // ==========================================
        debug!("步骤1: 校验输入记录");
        validate_records(records)?;

        // ==========================================
        // 步骤2: 按货号分组（首次出现顺序）
        // ==========================================
        debug!("步骤2: 按货号分组");
        let groups = group_by_article(records);

        // ==========================================
        // 步骤3: 逐货号分类 + 匹配
        // ==========================================
        debug!("步骤3: 逐货号分类与匹配");
        let mut recommendations = Vec::new();
        let mut candidate_count = 0;
        let mut need_count = 0;

        for indices in &groups {
            let (candidates, needs) = self.classifier.classify_article(mode, records, indices);
            candidate_count += candidates.len();
            need_count += needs.len();

            if candidates.is_empty() || needs.is_empty() {
                continue;
            }

            recommendations.extend(self.matcher.match_article(mode, records, candidates, needs));
        }

        info!(
            articles = groups.len(),
            candidates = candidate_count,
            needs = need_count,
            recommendations = recommendations.len(),
            "分类与匹配完成"
        );

        // ==========================================
        // 步骤4: 数量提升
        // ==========================================
        debug!("步骤4: 数量提升后处理");
        let bumped_count = self.matcher.apply_quantity_bump(&mut recommendations);

        // ==========================================
        // 步骤5: 质量检查
        // ==========================================
        debug!("步骤5: 质量检查");
        let quality = self.quality.check(&recommendations);

        // ==========================================
        // 步骤6: 统计
        // ==========================================
        debug!("步骤6: 汇总统计");
        let statistics = summarize(&recommendations);

        info!(
            recommendations = statistics.total_recommendations,
            total_qty = statistics.total_transfer_quantity,
            quality_passed = quality.passed,
            "调货计算完成"
        );

        Ok(TransferPlan {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            mode,
            config: self.config.clone(),
            article_count: groups.len(),
            candidate_count,
            need_count,
            bumped_count,
            recommendations,
            quality,
            statistics,
        })
    }
}

/// 按货号分组,组顺序与组内顺序均保持输入顺序
fn group_by_article(records: &[InventoryRecord]) -> Vec<Vec<usize>> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match position.get(record.article.as_str()) {
            Some(&g) => groups[g].push(index),
            None => {
                position.insert(record.article.as_str(), groups.len());
                groups.push(vec![index]);
            }
        }
    }

    groups
}
