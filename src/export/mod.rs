// ==========================================
// 跨店调货建议系统 - 导出层
// ==========================================
// 职责: 调货建议明细 (18 列 CSV) 与统计汇总 (CSV / JSON) 输出
// 红线: 只读计算结果,不修改任何建议
// ==========================================

pub mod error;
pub mod recommendations;
pub mod summary;

pub use error::{ExportError, ExportResult};
pub use recommendations::{write_recommendations, write_recommendations_csv, RECOMMENDATION_COLUMNS};
pub use summary::{
    write_summary, write_summary_csv, write_summary_json, write_summary_rows, RunSummary,
};
