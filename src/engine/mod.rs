// ==========================================
// 跨店调货建议系统 - 引擎层
// ==========================================
// 职责: 分类 → 店铺组约束 → 匹配 → 数量提升 → 质量检查 → 统计
// 红线: 引擎内无 I/O,同步、单线程、纯计算
// 红线: 所有路线判定必须输出原因代码
// ==========================================

pub mod classifier;
pub mod error;
pub mod matcher;
pub mod orchestrator;
pub mod quality;
pub mod site_group;
pub mod statistics;
pub mod validation;

// 重导出核心引擎
pub use classifier::{ArticleContext, Classification, Classifier};
pub use error::{EngineError, EngineResult};
pub use matcher::{recompute_after_stock, Matcher, RemarkContext, MATCHING_PRIORITY};
pub use orchestrator::{TransferPlan, TransferPlanner};
pub use quality::QualityChecker;
pub use site_group::{RouteDecision, RouteEnd, RouteReason, SiteGroupResolver};
pub use statistics::summarize;
pub use validation::validate_records;
