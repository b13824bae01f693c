// ==========================================
// 跨店调货建议系统 - 领域模型层
// ==========================================
// 职责: 定义库存记录、调货候选、建议与报告类型
// 红线: 不含文件读写逻辑,不含分配引擎逻辑
// ==========================================

pub mod inventory;
pub mod transfer;
pub mod types;

// 重导出核心类型
pub use inventory::{
    DqLevel, DqReport, DqSummary, DqViolation, ImportOutcome, InventoryRecord, InventoryStats,
    RawInventoryRecord,
};
pub use transfer::{
    CategoryStat, InboundNeed, OutboundCandidate, QualityReport, QualityRule, QualityViolation,
    TransferRecommendation, TransferStatistics,
};
pub use types::{NeedType, SiteClass, SiteType, TransferMode, TransferType};
