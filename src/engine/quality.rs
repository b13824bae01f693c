// ==========================================
// 跨店调货建议系统 - 质量检查
// ==========================================
// 职责: 对最终建议集合做一次硬约束检查
// 规则: 货号一致 / 数量为正 / 累计不超过原始库存 / 店铺不同 / 货号 12 位
// 红线: 只标记,不删除、不修改任何建议
// ==========================================

use crate::domain::inventory::is_valid_article;
use crate::domain::transfer::{QualityReport, QualityRule, QualityViolation, TransferRecommendation};
use crate::i18n::t_with_args;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// QualityChecker - 质量检查器（无状态）
pub struct QualityChecker {}

impl QualityChecker {
    pub fn new() -> Self {
        Self {}
    }

    /// 检查建议集合
    ///
    /// # 返回
    /// 质量报告；`passed` 为 true 当且仅当无任何违规
    #[instrument(skip_all, fields(recommendations = recommendations.len()))]
    pub fn check(&self, recommendations: &[TransferRecommendation]) -> QualityReport {
        let mut violations = Vec::new();
        let mut cumulative: HashMap<(&str, &str), i64> = HashMap::new();

        for (index, rec) in recommendations.iter().enumerate() {
            let mut flag = |rule: QualityRule| {
                violations.push(self.violation(index, rec, rule));
            };

            if rec.article != rec.receive_article {
                flag(QualityRule::ArticleMismatch);
            }

            if rec.transfer_qty <= 0 {
                flag(QualityRule::NonPositiveQuantity);
            }

            let sent = cumulative
                .entry((rec.article.as_str(), rec.transfer_site.as_str()))
                .or_insert(0);
            *sent += rec.transfer_qty;
            if *sent > rec.transfer_site_original_stock {
                flag(QualityRule::ExceedsOriginalStock);
            }

            if rec.transfer_site == rec.receive_site {
                flag(QualityRule::SameSite);
            }

            if !is_valid_article(&rec.article) {
                flag(QualityRule::ArticleFormat);
            }
        }

        let passed = violations.is_empty();
        if passed {
            info!(checked = recommendations.len(), "质量检查通过");
        } else {
            warn!(
                checked = recommendations.len(),
                violations = violations.len(),
                "质量检查发现违规"
            );
        }

        QualityReport {
            passed,
            checked: recommendations.len(),
            violations,
        }
    }

    fn violation(
        &self,
        index: usize,
        rec: &TransferRecommendation,
        rule: QualityRule,
    ) -> QualityViolation {
        let number = (index + 1).to_string();
        let qty = rec.transfer_qty.to_string();
        let original = rec.transfer_site_original_stock.to_string();
        let message = t_with_args(
            rule.message_key(),
            &[
                ("index", number.as_str()),
                ("article", rec.article.as_str()),
                ("receive_article", rec.receive_article.as_str()),
                ("transfer_site", rec.transfer_site.as_str()),
                ("receive_site", rec.receive_site.as_str()),
                ("qty", qty.as_str()),
                ("original", original.as_str()),
            ],
        );

        QualityViolation {
            index,
            article: rec.article.clone(),
            transfer_site: rec.transfer_site.clone(),
            receive_site: rec.receive_site.clone(),
            rule,
            message,
        }
    }
}

impl Default for QualityChecker {
    fn default() -> Self {
        Self::new()
    }
}
