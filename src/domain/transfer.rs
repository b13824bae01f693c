// ==========================================
// 跨店调货建议系统 - 调货领域模型
// ==========================================
// 职责: 转出候选 / 接收需求 / 调货建议 / 质量报告 / 统计
// 红线: 候选与需求数量永不为负,数量为 0 的条目不再参与匹配
// ==========================================

use crate::domain::types::{NeedType, TransferType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// OutboundCandidate - 转出候选
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundCandidate {
    pub record_index: usize, // 在输入记录中的位置
    pub article: String,
    pub site: String,
    pub om: String,
    pub transfer_type: TransferType,
    pub available: i64,      // 剩余可转出（匹配过程中递减）
    pub original_stock: i64, // 原始净库存（不可变）
    pub same_om_only: bool,  // C 模式: 仅允许同 OM 接收
}

impl OutboundCandidate {
    pub fn priority_rank(&self) -> u8 {
        self.transfer_type.rank()
    }

    pub fn is_exhausted(&self) -> bool {
        self.available <= 0
    }

    /// 扣减可转出数量，不低于 0
    pub fn consume(&mut self, qty: i64) {
        self.available = (self.available - qty).max(0);
    }
}

// ==========================================
// InboundNeed - 接收需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundNeed {
    pub record_index: usize,
    pub article: String,
    pub site: String,
    pub om: String,
    pub need_type: NeedType,
    pub demand: i64, // 剩余需求（匹配过程中递减）
}

impl InboundNeed {
    pub fn priority_rank(&self) -> u8 {
        self.need_type.rank()
    }

    pub fn is_satisfied(&self) -> bool {
        self.demand <= 0
    }

    pub fn consume(&mut self, qty: i64) {
        self.demand = (self.demand - qty).max(0);
    }
}

// ==========================================
// TransferRecommendation - 调货建议
// ==========================================
// 一条建议 = 一次 (转出店铺 → 接收店铺) 的货号移动
// 创建后仅允许数量提升后处理修改 transfer_qty / transfer_site_after_stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecommendation {
    // ===== 货品 =====
    pub article: String,
    pub receive_article: String,
    pub product_desc: String,

    // ===== 路线 =====
    pub transfer_om: String,
    pub transfer_site: String,
    pub receive_om: String,
    pub receive_site: String,

    // ===== 数量 =====
    pub transfer_qty: i64,
    pub transfer_site_original_stock: i64,
    pub transfer_site_after_stock: i64,
    pub transfer_site_safety_stock: i64,
    pub transfer_site_moq: i64,

    // ===== 销售参考 =====
    pub transfer_site_last_month_sold: i64,
    pub transfer_site_mtd_sold: i64,
    pub receive_site_last_month_sold: i64,
    pub receive_site_mtd_sold: i64,
    pub receive_original_stock: i64,

    // ===== 分类与说明 =====
    pub transfer_type: TransferType,
    pub need_type: NeedType,
    pub remark: String,
    pub notes: String,
}

// ==========================================
// QualityRule - 质量规则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityRule {
    ArticleMismatch,      // 转出与接收货号不一致
    NonPositiveQuantity,  // 调货数量必须为正整数
    ExceedsOriginalStock, // 累计转出超过原始库存
    SameSite,             // 转出与接收店铺相同
    ArticleFormat,        // 货号不是 12 位文本
}

impl QualityRule {
    /// i18n 消息键
    pub fn message_key(&self) -> &'static str {
        match self {
            QualityRule::ArticleMismatch => "quality.article_mismatch",
            QualityRule::NonPositiveQuantity => "quality.non_positive_quantity",
            QualityRule::ExceedsOriginalStock => "quality.exceeds_original_stock",
            QualityRule::SameSite => "quality.same_site",
            QualityRule::ArticleFormat => "quality.article_format",
        }
    }
}

impl fmt::Display for QualityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            QualityRule::ArticleMismatch => "ARTICLE_MISMATCH",
            QualityRule::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            QualityRule::ExceedsOriginalStock => "EXCEEDS_ORIGINAL_STOCK",
            QualityRule::SameSite => "SAME_SITE",
            QualityRule::ArticleFormat => "ARTICLE_FORMAT",
        };
        write!(f, "{}", code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityViolation {
    pub index: usize, // 建议序号（0 起）
    pub article: String,
    pub transfer_site: String,
    pub receive_site: String,
    pub rule: QualityRule,
    pub message: String,
}

// ==========================================
// QualityReport - 质量检查报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub passed: bool,
    pub checked: usize,
    pub violations: Vec<QualityViolation>,
}

impl QualityReport {
    pub fn violations_of(&self, rule: QualityRule) -> impl Iterator<Item = &QualityViolation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}

// ==========================================
// TransferStatistics - 调货统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub count: usize,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStatistics {
    pub total_recommendations: usize,
    pub total_transfer_quantity: i64,
    pub unique_articles: usize,
    pub unique_transfer_sites: usize,
    pub unique_receive_sites: usize,
    pub transfer_type_stats: BTreeMap<TransferType, CategoryStat>,
    pub need_type_stats: BTreeMap<NeedType, CategoryStat>,
}
