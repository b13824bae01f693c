// ==========================================
// 跨店调货建议系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统（输出调货建议,由人工最终执行）
// 流程: 库存表导入 → 分类 → 匹配 → 质量检查 → 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 分配参数
pub mod config;

// 导入层 - 外部库存表
pub mod importer;

// 引擎层 - 分配规则
pub mod engine;

// 导出层 - 建议明细与汇总
pub mod export;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{NeedType, SiteClass, SiteType, TransferMode, TransferType};

// 领域实体
pub use domain::{
    DqReport, ImportOutcome, InventoryRecord, QualityReport, QualityRule, TransferRecommendation,
    TransferStatistics,
};

// 配置
pub use config::{AllocationConfig, ConfigManager};

// 导入
pub use importer::{ImportError, InventoryImporter, InventoryImporterImpl};

// 引擎
pub use engine::{EngineError, TransferPlan, TransferPlanner};

// 导出
pub use export::ExportError;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "跨店调货建议系统";
