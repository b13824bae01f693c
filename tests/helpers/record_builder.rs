// ==========================================
// 库存记录构建器 - 用于集成测试
// ==========================================

use stock_transfer::domain::inventory::InventoryRecord;
use stock_transfer::domain::types::SiteType;

pub struct RecordBuilder {
    record: InventoryRecord,
}

impl RecordBuilder {
    fn new(article: &str, site: &str, om: &str, site_type: SiteType) -> Self {
        Self {
            record: InventoryRecord {
                article: article.to_string(),
                description: format!("货品 {}", article),
                om: om.to_string(),
                site: site.to_string(),
                site_type,
                moq: 0,
                net_stock: 0,
                pending_received: 0,
                safety_stock: 0,
                last_month_sold: 0,
                mtd_sold: 0,
            },
        }
    }

    /// RF 店铺
    pub fn rf(article: &str, site: &str, om: &str) -> Self {
        Self::new(article, site, om, SiteType::Rf)
    }

    /// ND 店铺
    pub fn nd(article: &str, site: &str, om: &str) -> Self {
        Self::new(article, site, om, SiteType::Nd)
    }

    pub fn stock(mut self, net_stock: i64) -> Self {
        self.record.net_stock = net_stock;
        self
    }

    pub fn pending(mut self, pending_received: i64) -> Self {
        self.record.pending_received = pending_received;
        self
    }

    pub fn safety(mut self, safety_stock: i64) -> Self {
        self.record.safety_stock = safety_stock;
        self
    }

    pub fn moq(mut self, moq: i64) -> Self {
        self.record.moq = moq;
        self
    }

    /// 上月销量
    pub fn sold(mut self, last_month_sold: i64) -> Self {
        self.record.last_month_sold = last_month_sold;
        self
    }

    pub fn mtd(mut self, mtd_sold: i64) -> Self {
        self.record.mtd_sold = mtd_sold;
        self
    }

    pub fn build(self) -> InventoryRecord {
        self.record
    }
}
