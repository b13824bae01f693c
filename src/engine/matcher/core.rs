use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::transfer::{InboundNeed, OutboundCandidate, TransferRecommendation};
use crate::domain::types::{NeedType, TransferMode, TransferType};
use crate::engine::site_group::{RouteEnd, SiteGroupResolver};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

use super::remark::{bump_note, RemarkContext};

// ==========================================
// 匹配优先级表
// ==========================================
// 固定顺序: 转出类型优先,同一转出类型内紧急缺货优先
pub const MATCHING_PRIORITY: [(TransferType, NeedType); 8] = [
    (TransferType::NdTransfer, NeedType::UrgentShortage),
    (TransferType::NdTransfer, NeedType::PotentialShortage),
    (TransferType::RfSurplus, NeedType::UrgentShortage),
    (TransferType::RfSurplus, NeedType::PotentialShortage),
    (TransferType::RfEnhanced, NeedType::UrgentShortage),
    (TransferType::RfEnhanced, NeedType::PotentialShortage),
    (TransferType::CComplete, NeedType::UrgentShortage),
    (TransferType::CComplete, NeedType::PotentialShortage),
];

// ==========================================
// ArticleArena - 单货号匹配工作区
// ==========================================
// 候选与需求的剩余数量只在此处递减,货号处理完即丢弃
struct ArticleArena {
    candidates: Vec<OutboundCandidate>,
    needs: Vec<InboundNeed>,
    // 每个候选已承诺的转出数量（与 candidates 同下标）
    committed: Vec<i64>,
}

impl ArticleArena {
    fn new(candidates: Vec<OutboundCandidate>, needs: Vec<InboundNeed>) -> Self {
        let committed = vec![0; candidates.len()];
        Self {
            candidates,
            needs,
            committed,
        }
    }
}

// ==========================================
// Matcher - 贪心匹配引擎
// ==========================================
pub struct Matcher {
    config: AllocationConfig,
    resolver: SiteGroupResolver,
}

impl Matcher {
    pub fn new(config: AllocationConfig) -> Self {
        let resolver = SiteGroupResolver::new(config.clone());
        Self { config, resolver }
    }

    // ==========================================
    // 贪心匹配
    // ==========================================

    /// 对单个货号执行匹配
    ///
    /// # 参数
    /// - `mode`: 调货模式（仅用于说明文本）
    /// - `records`: 全部输入记录（候选/需求通过 record_index 引用）
    /// - `candidates` / `needs`: 该货号的分类结果（输入顺序）
    ///
    /// # 返回
    /// 按生成顺序排列的调货建议
    #[instrument(skip_all, fields(candidates = candidates.len(), needs = needs.len()))]
    pub fn match_article(
        &self,
        mode: TransferMode,
        records: &[InventoryRecord],
        candidates: Vec<OutboundCandidate>,
        needs: Vec<InboundNeed>,
    ) -> Vec<TransferRecommendation> {
        let mut arena = ArticleArena::new(candidates, needs);
        let mut recommendations = Vec::new();

        for (transfer_type, need_type) in MATCHING_PRIORITY {
            for ci in 0..arena.candidates.len() {
                if arena.candidates[ci].transfer_type != transfer_type {
                    continue;
                }

                for ni in 0..arena.needs.len() {
                    if arena.candidates[ci].is_exhausted() {
                        break;
                    }

                    let need = &arena.needs[ni];
                    if need.need_type != need_type || need.is_satisfied() {
                        continue;
                    }

                    let candidate = &arena.candidates[ci];
                    let decision = self.resolver.check(
                        RouteEnd {
                            site: &candidate.site,
                            om: &candidate.om,
                        },
                        RouteEnd {
                            site: &need.site,
                            om: &need.om,
                        },
                        candidate.same_om_only,
                    );

                    if !decision.permitted {
                        debug!(
                            article = %candidate.article,
                            from = %candidate.site,
                            to = %need.site,
                            reason = %decision.reason,
                            "路线不允许"
                        );
                        continue;
                    }

                    let qty = candidate.available.min(need.demand);
                    arena.candidates[ci].consume(qty);
                    arena.needs[ni].consume(qty);
                    arena.committed[ci] += qty;

                    let recommendation = self.build_recommendation(
                        mode,
                        records,
                        &arena.candidates[ci],
                        &arena.needs[ni],
                        qty,
                        arena.committed[ci],
                    );

                    debug!(
                        article = %recommendation.article,
                        from = %recommendation.transfer_site,
                        to = %recommendation.receive_site,
                        qty = qty,
                        reason = %decision.reason,
                        "生成调货建议"
                    );
                    recommendations.push(recommendation);
                }
            }
        }

        recommendations
    }

    fn build_recommendation(
        &self,
        mode: TransferMode,
        records: &[InventoryRecord],
        candidate: &OutboundCandidate,
        need: &InboundNeed,
        qty: i64,
        committed: i64,
    ) -> TransferRecommendation {
        let sender = &records[candidate.record_index];
        let receiver = &records[need.record_index];

        let ctx = RemarkContext {
            config: &self.config,
            mode,
            transfer_type: candidate.transfer_type,
            need_type: need.need_type,
            sender,
            receiver,
        };

        let product_desc = if sender.description.is_empty() {
            receiver.description.clone()
        } else {
            sender.description.clone()
        };

        TransferRecommendation {
            article: sender.article.clone(),
            receive_article: receiver.article.clone(),
            product_desc,
            transfer_om: sender.om.clone(),
            transfer_site: sender.site.clone(),
            receive_om: receiver.om.clone(),
            receive_site: receiver.site.clone(),
            transfer_qty: qty,
            transfer_site_original_stock: candidate.original_stock,
            transfer_site_after_stock: candidate.original_stock - committed,
            transfer_site_safety_stock: sender.safety_stock,
            transfer_site_moq: sender.moq,
            transfer_site_last_month_sold: sender.last_month_sold,
            transfer_site_mtd_sold: sender.mtd_sold,
            receive_site_last_month_sold: receiver.last_month_sold,
            receive_site_mtd_sold: receiver.mtd_sold,
            receive_original_stock: receiver.net_stock,
            transfer_type: candidate.transfer_type,
            need_type: need.need_type,
            remark: ctx.remark(),
            notes: ctx.notes(),
        }
    }

    // ==========================================
    // 数量提升后处理
    // ==========================================

    /// 把数量为 1 的建议提升到 bump_target（原始库存足够时）
    ///
    /// 按生成顺序处理；每次提升后同一 (货号, 转出店铺) 的累计承诺同步增加。
    /// 处理完毕后重算全部建议的转出后库存。
    ///
    /// # 返回
    /// 被提升的建议数量
    #[instrument(skip_all, fields(recommendations = recommendations.len()))]
    pub fn apply_quantity_bump(&self, recommendations: &mut [TransferRecommendation]) -> usize {
        let mut bumped = 0;

        if self.config.quantity_bump_enabled {
            let mut committed: HashMap<(String, String), i64> = HashMap::new();
            for rec in recommendations.iter() {
                *committed
                    .entry((rec.article.clone(), rec.transfer_site.clone()))
                    .or_insert(0) += rec.transfer_qty;
            }

            let target = self.config.bump_target;
            for rec in recommendations.iter_mut() {
                if rec.transfer_qty != 1 {
                    continue;
                }

                let extra = target - rec.transfer_qty;
                let key = (rec.article.clone(), rec.transfer_site.clone());
                let total = committed.get(&key).copied().unwrap_or(0);

                if rec.transfer_site_original_stock - (total + extra) < 0 {
                    debug!(
                        article = %rec.article,
                        site = %rec.transfer_site,
                        committed = total,
                        original = rec.transfer_site_original_stock,
                        "原始库存不足,不提升数量"
                    );
                    continue;
                }

                committed.insert(key, total + extra);
                rec.transfer_qty = target;
                rec.notes = format!("{} | {}", rec.notes, bump_note(1, target));
                bumped += 1;
            }
        }

        recompute_after_stock(recommendations);

        if bumped > 0 {
            info!(bumped = bumped, "数量提升完成");
        }
        bumped
    }
}

/// 按生成顺序重算转出后库存
///
/// 转出后库存 = 原始库存 − 截至当前建议（含）的同 (货号, 转出店铺) 累计转出
pub fn recompute_after_stock(recommendations: &mut [TransferRecommendation]) {
    let mut running: HashMap<(String, String), i64> = HashMap::new();
    for rec in recommendations.iter_mut() {
        let sent = running
            .entry((rec.article.clone(), rec.transfer_site.clone()))
            .or_insert(0);
        *sent += rec.transfer_qty;
        rec.transfer_site_after_stock = rec.transfer_site_original_stock - *sent;
    }
}
