// ==========================================
// 跨店调货建议系统 - 调货统计
// ==========================================
// 职责: 汇总建议集合（总量 / 去重计数 / 按转出类型与接收类型分组）
// ==========================================

use crate::domain::transfer::{CategoryStat, TransferRecommendation, TransferStatistics};
use crate::domain::types::{NeedType, TransferType};
use std::collections::HashSet;

/// 计算调货统计
///
/// 全部转出类型与接收类型都会出现在分组中（无建议时计数为 0）
pub fn summarize(recommendations: &[TransferRecommendation]) -> TransferStatistics {
    let mut stats = TransferStatistics {
        total_recommendations: recommendations.len(),
        transfer_type_stats: TransferType::all()
            .into_iter()
            .map(|t| (t, CategoryStat::default()))
            .collect(),
        need_type_stats: NeedType::all()
            .into_iter()
            .map(|n| (n, CategoryStat::default()))
            .collect(),
        ..TransferStatistics::default()
    };

    let mut articles = HashSet::new();
    let mut transfer_sites = HashSet::new();
    let mut receive_sites = HashSet::new();

    for rec in recommendations {
        stats.total_transfer_quantity += rec.transfer_qty;
        articles.insert(rec.article.as_str());
        transfer_sites.insert(rec.transfer_site.as_str());
        receive_sites.insert(rec.receive_site.as_str());

        let by_type = stats.transfer_type_stats.entry(rec.transfer_type).or_default();
        by_type.count += 1;
        by_type.quantity += rec.transfer_qty;

        let by_need = stats.need_type_stats.entry(rec.need_type).or_default();
        by_need.count += 1;
        by_need.quantity += rec.transfer_qty;
    }

    stats.unique_articles = articles.len();
    stats.unique_transfer_sites = transfer_sites.len();
    stats.unique_receive_sites = receive_sites.len();
    stats
}
