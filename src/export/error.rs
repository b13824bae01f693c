// ==========================================
// 跨店调货建议系统 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("导出格式不支持: {0}（仅支持 .csv/.json）")]
    UnsupportedFormat(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
