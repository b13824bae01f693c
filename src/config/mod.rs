// ==========================================
// 跨店调货建议系统 - 配置层
// ==========================================
// 职责: 配置加载与分配参数组装
// 存储: JSON 键值文件（可选）,缺省取内置默认值
// ==========================================

pub mod allocation_profile;
pub mod config_manager;
pub mod error;
pub mod transfer_config_trait;

// 重导出核心配置类型
pub use allocation_profile::AllocationConfig;
pub use config_manager::{config_keys, default_config_path, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use transfer_config_trait::TransferConfigReader;
