// ==========================================
// 跨店调货建议系统 - 库存领域模型
// ==========================================
// 职责: 单店单货号库存记录 + 导入中间结构 + 数据质量报告
// 红线: InventoryRecord 一经导入即不可变,引擎只读
// ==========================================

use crate::domain::types::SiteType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 货号固定位数（文本格式）
pub const ARTICLE_WIDTH: usize = 12;

/// 数量字段绝对值上限；超出视为脏数据
pub const MAX_QUANTITY: i64 = 1_000_000_000;

// ==========================================
// InventoryRecord - 库存记录
// ==========================================
// 一条记录 = 一个 (Article, Site)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    // ===== 货品 =====
    pub article: String,     // 货号（12位文本）
    pub description: String, // 货品描述

    // ===== 店铺 =====
    pub om: String,          // 所属 OM 组
    pub site: String,        // 店铺代码
    pub site_type: SiteType, // RP Type（ND / RF）

    // ===== 库存 =====
    pub moq: i64,              // 最小订货量
    pub net_stock: i64,        // SaSa Net Stock
    pub pending_received: i64, // 在途数量
    pub safety_stock: i64,     // 安全库存

    // ===== 销售 =====
    pub last_month_sold: i64, // 上月销量
    pub mtd_sold: i64,        // 本月至今销量
}

impl InventoryRecord {
    /// 有效销量 = 上月销量 + 本月销量
    pub fn effective_sold(&self) -> i64 {
        self.last_month_sold + self.mtd_sold
    }

    /// 总库存 = 净库存 + 在途
    pub fn total_stock(&self) -> i64 {
        self.net_stock + self.pending_received
    }

    /// 店铺代码前两位（用于店铺类别判定）
    pub fn site_prefix(&self) -> &str {
        site_prefix(&self.site)
    }
}

/// 取店铺代码前两位，不足两位返回空串
pub fn site_prefix(site: &str) -> &str {
    match site.char_indices().nth(2) {
        Some((idx, _)) => &site[..idx],
        None if site.chars().count() == 2 => site,
        None => "",
    }
}

/// 货号是否为 12 位文本
pub fn is_valid_article(article: &str) -> bool {
    article.chars().count() == ARTICLE_WIDTH && !article.trim().is_empty()
}

// ==========================================
// RawInventoryRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 字段映射 → 此结构）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRecord {
    pub article: Option<String>,
    pub description: Option<String>,
    pub om: Option<String>,
    pub site_type: Option<String>,
    pub site: Option<String>,
    pub moq: Option<f64>,
    pub net_stock: Option<f64>,
    pub pending_received: Option<f64>,
    pub safety_stock: Option<f64>,
    pub last_month_sold: Option<f64>,
    pub mtd_sold: Option<f64>,

    // 元信息
    pub row_number: usize, // 原始文件行号（用于 DQ 报告）
}

impl RawInventoryRecord {
    /// 去重键（整行内容完全一致视为重复）
    pub fn dedup_key(&self) -> String {
        format!(
            "{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}|{:?}",
            self.article,
            self.description,
            self.om,
            self.site_type,
            self.site,
            self.moq,
            self.net_stock,
            self.pending_received,
            self.safety_stock,
            self.last_month_sold,
            self.mtd_sold
        )
    }
}

// ==========================================
// DqLevel - 数据质量级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Error,   // 错误（阻断导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,       // 原始文件行号
    pub article: Option<String>, // 货号（如果可解析）
    pub site: Option<String>,    // 店铺（如果可解析）
    pub level: DqLevel,          // 违规级别
    pub field: String,           // 违规字段
    pub message: String,         // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,         // 总行数
    pub success: usize,            // 进入引擎的记录数
    pub blocked: usize,            // 阻断（ERROR）
    pub warning: usize,            // 警告（WARNING）
    pub duplicates_removed: usize, // 完全重复被移除的行
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DqReport {
    pub batch_id: String,             // 批次 ID
    pub summary: DqSummary,           // 汇总统计
    pub violations: Vec<DqViolation>, // 违规明细
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.level == DqLevel::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DqViolation> {
        self.violations.iter().filter(|v| v.level == DqLevel::Error)
    }
}

// ==========================================
// InventoryStats - 导入数据概况
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_rows: usize,
    pub unique_articles: usize,
    pub unique_sites: usize,
    pub nd_sites: usize,
    pub rf_sites: usize,
    pub total_stock: i64,
    pub total_safety_stock: i64,
}

impl InventoryStats {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        let articles: HashSet<&str> = records.iter().map(|r| r.article.as_str()).collect();
        let sites: HashSet<&str> = records.iter().map(|r| r.site.as_str()).collect();
        let nd_sites: HashSet<&str> = records
            .iter()
            .filter(|r| r.site_type == SiteType::Nd)
            .map(|r| r.site.as_str())
            .collect();
        let rf_sites: HashSet<&str> = records
            .iter()
            .filter(|r| r.site_type == SiteType::Rf)
            .map(|r| r.site.as_str())
            .collect();

        Self {
            total_rows: records.len(),
            unique_articles: articles.len(),
            unique_sites: sites.len(),
            nd_sites: nd_sites.len(),
            rf_sites: rf_sites.len(),
            total_stock: records.iter().map(|r| r.net_stock).sum(),
            total_safety_stock: records.iter().map(|r| r.safety_stock).sum(),
        }
    }
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    pub records: Vec<InventoryRecord>,
    pub report: DqReport,
    pub stats: InventoryStats,
}
