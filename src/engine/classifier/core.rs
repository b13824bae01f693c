use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::transfer::{InboundNeed, OutboundCandidate};
use crate::domain::types::{NeedType, SiteType, TransferMode, TransferType};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// ArticleContext - 同货号分组统计
// ==========================================
// 规则中的 "最大/最小销量" 均在此计算
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleContext {
    /// 同货号 RF 店铺的最大有效销量
    pub max_rf_sold: Option<i64>,
    /// 同货号同 OM 的 ND 店铺最小有效销量
    pub min_nd_sold_by_om: HashMap<String, i64>,
    /// 同货号同 OM 的 RF 店铺最小有效销量
    pub min_rf_sold_by_om: HashMap<String, i64>,
}

impl ArticleContext {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        let mut ctx = Self::default();

        for record in records {
            let sold = record.effective_sold();
            match record.site_type {
                SiteType::Rf => {
                    ctx.max_rf_sold = Some(ctx.max_rf_sold.map_or(sold, |m| m.max(sold)));
                    ctx.min_rf_sold_by_om
                        .entry(record.om.clone())
                        .and_modify(|m| *m = (*m).min(sold))
                        .or_insert(sold);
                }
                SiteType::Nd => {
                    ctx.min_nd_sold_by_om
                        .entry(record.om.clone())
                        .and_modify(|m| *m = (*m).min(sold))
                        .or_insert(sold);
                }
            }
        }

        ctx
    }

    fn is_rf_max(&self, record: &InventoryRecord) -> bool {
        self.max_rf_sold == Some(record.effective_sold())
    }

    fn is_om_min(&self, record: &InventoryRecord) -> bool {
        let group = match record.site_type {
            SiteType::Nd => &self.min_nd_sold_by_om,
            SiteType::Rf => &self.min_rf_sold_by_om,
        };
        group.get(&record.om) == Some(&record.effective_sold())
    }
}

/// 单条记录的分类结果（至多一个候选 + 至多一个需求）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub candidate: Option<OutboundCandidate>,
    pub need: Option<InboundNeed>,
}

// ==========================================
// Classifier - 分类引擎
// ==========================================
pub struct Classifier {
    config: AllocationConfig,
}

impl Classifier {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 对同一货号的记录分类
    ///
    /// # 参数
    /// - `mode`: 调货模式
    /// - `records`: 全部输入记录
    /// - `indices`: 属于该货号的记录下标（输入顺序）
    ///
    /// # 返回
    /// (转出候选, 接收需求)，均保持输入顺序
    #[instrument(skip(self, records, indices), fields(mode = %mode, records = indices.len()))]
    pub fn classify_article(
        &self,
        mode: TransferMode,
        records: &[InventoryRecord],
        indices: &[usize],
    ) -> (Vec<OutboundCandidate>, Vec<InboundNeed>) {
        let ctx = ArticleContext::build(indices.iter().map(|&i| &records[i]));

        let mut candidates = Vec::new();
        let mut needs = Vec::new();

        for &index in indices {
            let classification = self.classify_record(mode, index, &records[index], &ctx);
            candidates.extend(classification.candidate);
            needs.extend(classification.need);
        }

        debug!(
            candidates = candidates.len(),
            needs = needs.len(),
            "货号分类完成"
        );

        (candidates, needs)
    }

    /// 对单条记录分类
    pub fn classify_record(
        &self,
        mode: TransferMode,
        index: usize,
        record: &InventoryRecord,
        ctx: &ArticleContext,
    ) -> Classification {
        let candidate = self
            .outbound(mode, record, ctx)
            .filter(|(_, amount, _)| *amount > 0)
            .map(|(transfer_type, amount, same_om_only)| OutboundCandidate {
                record_index: index,
                article: record.article.clone(),
                site: record.site.clone(),
                om: record.om.clone(),
                transfer_type,
                available: amount,
                original_stock: record.net_stock,
                same_om_only,
            });

        let need = self
            .inbound(record, ctx)
            .filter(|(_, demand)| *demand > 0)
            .map(|(need_type, demand)| InboundNeed {
                record_index: index,
                article: record.article.clone(),
                site: record.site.clone(),
                om: record.om.clone(),
                need_type,
                demand,
            });

        Classification { candidate, need }
    }

    // ==========================================
    // 转出规则
    // ==========================================

    /// 返回 (转出类型, 可转出数量, 是否仅限同 OM)
    fn outbound(
        &self,
        mode: TransferMode,
        record: &InventoryRecord,
        ctx: &ArticleContext,
    ) -> Option<(TransferType, i64, bool)> {
        match (record.site_type, mode) {
            // ND 转出：全部净库存；C 模式需为同 OM 最小销量且仅限同 OM
            (SiteType::Nd, TransferMode::C) => ctx
                .is_om_min(record)
                .then_some((TransferType::NdTransfer, record.net_stock, true)),
            (SiteType::Nd, _) => Some((TransferType::NdTransfer, record.net_stock, false)),

            (SiteType::Rf, TransferMode::A) => self.rf_surplus(record, ctx),
            (SiteType::Rf, TransferMode::B) => self.rf_enhanced(record, ctx),
            (SiteType::Rf, TransferMode::C) => self.rf_complete(record, ctx),
        }
    }

    /// A 模式: 保留安全库存的过剩转出
    fn rf_surplus(
        &self,
        record: &InventoryRecord,
        ctx: &ArticleContext,
    ) -> Option<(TransferType, i64, bool)> {
        let total = record.total_stock();
        if total <= record.safety_stock || ctx.is_rf_max(record) {
            return None;
        }

        let base = total - record.safety_stock;
        let amount = self.capped_amount(total, base, self.config.rf_surplus_cap_ratio, record);

        // 转出后剩余须不低于安全库存
        if total - amount < record.safety_stock {
            return None;
        }

        Some((TransferType::RfSurplus, amount, false))
    }

    /// B 模式: 以 MOQ 为底线的加强转出
    fn rf_enhanced(
        &self,
        record: &InventoryRecord,
        ctx: &ArticleContext,
    ) -> Option<(TransferType, i64, bool)> {
        let total = record.total_stock();
        if total <= record.moq || ctx.is_rf_max(record) {
            return None;
        }

        let base = total - record.moq;
        let amount = self.capped_amount(total, base, self.config.rf_enhanced_cap_ratio, record);

        let transfer_type = if total - amount >= record.safety_stock {
            TransferType::RfSurplus
        } else {
            TransferType::RfEnhanced
        };

        Some((transfer_type, amount, false))
    }

    /// C 模式: 同 OM 最小销量且零销量的店铺全量转出
    fn rf_complete(
        &self,
        record: &InventoryRecord,
        ctx: &ArticleContext,
    ) -> Option<(TransferType, i64, bool)> {
        if !ctx.is_om_min(record) || record.effective_sold() != 0 {
            return None;
        }
        Some((TransferType::CComplete, record.net_stock, true))
    }

    /// ⌊min(基础可转出, max(总库存 × 比例, 最少出货))⌋，且不超过净库存
    fn capped_amount(&self, total: i64, base: i64, ratio: f64, record: &InventoryRecord) -> i64 {
        let upper = (total as f64 * ratio).max(self.config.min_shipment_floor as f64);
        let amount = (base as f64).min(upper).floor() as i64;
        amount.min(record.net_stock).max(0)
    }

    // ==========================================
    // 接收规则（与模式无关）
    // ==========================================

    fn inbound(&self, record: &InventoryRecord, ctx: &ArticleContext) -> Option<(NeedType, i64)> {
        if record.site_type != SiteType::Rf {
            return None;
        }

        let total = record.total_stock();
        let sold = record.effective_sold();

        if total == 0 && sold > 0 {
            return Some((NeedType::UrgentShortage, record.safety_stock));
        }

        if total < record.safety_stock && ctx.is_rf_max(record) {
            return Some((NeedType::PotentialShortage, record.safety_stock - total));
        }

        None
    }
}
