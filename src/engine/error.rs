// ==========================================
// 跨店调货建议系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 质量规则违规不是错误,只进入质量报告
// ==========================================

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("输入记录无效 (序号 {index}, 货号 {article}, 店铺 {site}, 字段 {field}): {message}")]
    InvalidRecord {
        index: usize,
        article: String,
        site: String,
        field: String,
        message: String,
    },

    #[error("重复记录 (货号 {article}, 店铺 {site}): 序号 {first_index} 与 {index}")]
    DuplicateRecord {
        article: String,
        site: String,
        first_index: usize,
        index: usize,
    },

    #[error("分配参数无效: {0}")]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;
