// ==========================================
// 调货建议的备注 (Remark) 与说明 (Notes) 文本
// ==========================================
// 备注: 转出类型 → 接收店铺组 的一句话摘要
// 说明: 类型 | 转出逻辑 | 接收逻辑 | 需求计算 | 转出计算 | 优先级
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::types::{NeedType, SiteClass, TransferMode, TransferType};

/// 备注与说明的生成上下文
pub struct RemarkContext<'a> {
    pub config: &'a AllocationConfig,
    pub mode: TransferMode,
    pub transfer_type: TransferType,
    pub need_type: NeedType,
    pub sender: &'a InventoryRecord,
    pub receiver: &'a InventoryRecord,
}

impl RemarkContext<'_> {
    fn is_hd(&self, record: &InventoryRecord) -> bool {
        self.config.classify_site(&record.site) == SiteClass::Hd
    }

    /// 备注是否标记澳门优先：ND 看转出方，其余看接收方
    fn hd_priority_remark(&self) -> bool {
        match self.transfer_type {
            TransferType::NdTransfer => self.is_hd(self.sender),
            _ => self.is_hd(self.receiver),
        }
    }

    /// 备注
    pub fn remark(&self) -> String {
        let label = self.transfer_type.label();

        if self.hd_priority_remark() {
            let hd = &self.config.hd_site_prefix;
            let detail = match self.transfer_type {
                TransferType::NdTransfer => format!("{}店铺为主要目标", hd),
                TransferType::RfSurplus => "库存充足转出".to_string(),
                TransferType::RfEnhanced => "加强转出支援".to_string(),
                TransferType::CComplete => "全量转出支援".to_string(),
            };
            return format!("{} → {}店铺：澳门优先，{}", label, hd, detail);
        }

        let detail = match self.transfer_type {
            TransferType::NdTransfer | TransferType::RfSurplus => "标准转出",
            TransferType::RfEnhanced => "标准加强转出",
            TransferType::CComplete => "标准全量转出",
        };
        format!("{} → {}店铺：{}", label, self.receiver.site_prefix(), detail)
    }

    /// 说明
    pub fn notes(&self) -> String {
        [
            format!("{} → {}", self.transfer_type.label(), self.need_type.label()),
            self.transfer_logic().to_string(),
            self.receive_logic().to_string(),
            self.receive_calc(),
            self.transfer_calc(),
            self.priority_note().to_string(),
        ]
        .join(" | ")
    }

    fn transfer_logic(&self) -> &'static str {
        match self.transfer_type {
            TransferType::NdTransfer => "ND店铺转出：ND类型店铺可转出全部净库存，适合关闭或调整店铺",
            TransferType::RfSurplus => "RF过剩转出：库存充足的RF店铺，转出后剩余库存不低于安全库存",
            TransferType::RfEnhanced => "RF加强转出：库存超过MOQ的RF店铺，转出后可能低于安全库存",
            TransferType::CComplete => "C模式全量转出：同OM同Article中销量最少的店铺可转出全部库存",
        }
    }

    fn receive_logic(&self) -> &'static str {
        match self.need_type {
            NeedType::UrgentShortage => "紧急缺货补货：完全无库存+在途且曾有销售记录的RF店铺",
            NeedType::PotentialShortage => "潜在缺货补货：库存不足且有效销量为最高值的RF店铺",
        }
    }

    fn receive_calc(&self) -> String {
        let safety = self.receiver.safety_stock;
        match self.need_type {
            NeedType::UrgentShortage => format!("需求数量 = 安全库存 {}", safety),
            NeedType::PotentialShortage => {
                let total = self.receiver.total_stock();
                format!("需求数量 = 安全库存 {} - 总库存 {} = {}", safety, total, safety - total)
            }
        }
    }

    fn transfer_calc(&self) -> String {
        let sender = self.sender;
        match self.transfer_type {
            TransferType::NdTransfer | TransferType::CComplete => {
                format!("转出数量 = 全部净库存 {}", sender.net_stock)
            }
            TransferType::RfSurplus | TransferType::RfEnhanced => {
                let total = sender.total_stock();
                let (base, ratio) = match self.mode {
                    TransferMode::B => (total - sender.moq, self.config.rf_enhanced_cap_ratio),
                    _ => (total - sender.safety_stock, self.config.rf_surplus_cap_ratio),
                };
                let cap = (total as f64 * ratio).max(self.config.min_shipment_floor as f64);
                format!("转出数量 = min(基础可转出{}, 上限控制{})", base, cap.floor() as i64)
            }
        }
    }

    fn priority_note(&self) -> &'static str {
        if self.is_hd(self.sender) || self.is_hd(self.receiver) {
            "澳门优先：HD店铺为澳门地区重点支援对象，优先考虑其库存需求和销售特点"
        } else {
            "标准调货：按常规优先级处理"
        }
    }
}

/// 数量提升说明（附加在 Notes 末尾）
pub fn bump_note(from: i64, to: i64) -> String {
    format!("数量提升：{} → {}", from, to)
}
