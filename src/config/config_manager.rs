// ==========================================
// 跨店调货建议系统 - 配置管理器
// ==========================================
// 职责: 配置加载与查询
// 存储: JSON 键值文件 (global scope)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::transfer_config_trait::TransferConfigReader;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 默认配置目录名（位于系统配置目录下）
const CONFIG_DIR_NAME: &str = "stock-transfer";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径，内容为 JSON 对象 `{"key": value}`
    ///
    /// # 说明
    /// - 字符串值原样保存
    /// - 数组值按逗号拼接（如 `["HA","HB"]` → `HA,HB`）
    /// - 其余标量值取 JSON 文本
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: shown.clone(),
            message: e.to_string(),
        })?;

        let root: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::FileFormatError {
                path: shown.clone(),
                message: e.to_string(),
            })?;

        let object = root.as_object().ok_or_else(|| ConfigError::FileFormatError {
            path: shown.clone(),
            message: "顶层必须是 JSON 对象".to_string(),
        })?;

        let values: BTreeMap<String, String> = object
            .iter()
            .map(|(k, v)| (k.clone(), flatten_value(v)))
            .collect();

        info!(path = %shown, keys = values.len(), "配置文件加载完成");

        Ok(Self {
            values,
            source: Some(path.to_path_buf()),
        })
    }

    /// 加载系统配置目录下的默认配置文件；文件不存在时返回空配置
    pub fn load_default() -> ConfigResult<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                debug!(path = %path.display(), "默认配置文件不存在，使用内置默认值");
                Ok(Self::new())
            }
            None => {
                warn!("无法定位系统配置目录，使用内置默认值");
                Ok(Self::new())
            }
        }
    }

    /// 从键值对构造（测试与程序内覆写使用）
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: None,
        }
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 配置来源文件（内存配置为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_config_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_global_config_value(key).unwrap_or(default)
    }

    fn parse_value<T>(&self, key: &str, default: &str) -> ConfigResult<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.get_config_or_default(key, default);
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            })
    }
}

/// 系统配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

// ==========================================
// TransferConfigReader Trait 实现
// ==========================================
impl TransferConfigReader for ConfigManager {
    fn get_rf_surplus_cap_ratio(&self) -> ConfigResult<f64> {
        self.parse_value(config_keys::RF_SURPLUS_CAP_RATIO, "0.4")
    }

    fn get_rf_enhanced_cap_ratio(&self) -> ConfigResult<f64> {
        self.parse_value(config_keys::RF_ENHANCED_CAP_RATIO, "0.8")
    }

    fn get_min_shipment_floor(&self) -> ConfigResult<i64> {
        self.parse_value(config_keys::MIN_SHIPMENT_FLOOR, "2")
    }

    fn get_quantity_bump_enabled(&self) -> ConfigResult<bool> {
        let raw = self.get_config_or_default(config_keys::QUANTITY_BUMP_ENABLED, "true");
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ConfigValueError {
                key: config_keys::QUANTITY_BUMP_ENABLED.to_string(),
                value: raw.to_string(),
                message: "期望布尔值".to_string(),
            }),
        }
    }

    fn get_bump_target(&self) -> ConfigResult<i64> {
        self.parse_value(config_keys::BUMP_TARGET, "2")
    }

    fn get_hd_site_prefix(&self) -> ConfigResult<String> {
        let value = self
            .get_config_or_default(config_keys::HD_SITE_PREFIX, "HD")
            .trim()
            .to_uppercase();
        if value.is_empty() {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::HD_SITE_PREFIX.to_string(),
                value,
                message: "店铺前缀不能为空".to_string(),
            });
        }
        Ok(value)
    }

    fn get_feeder_site_prefixes(&self) -> ConfigResult<Vec<String>> {
        let value = self.get_config_or_default(config_keys::FEEDER_SITE_PREFIXES, "HA,HB,HC");

        let prefixes: Vec<String> = value
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        if prefixes.is_empty() {
            Ok(vec!["HA".to_string(), "HB".to_string(), "HC".to_string()])
        } else {
            Ok(prefixes)
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // RF 转出上限比例
    pub const RF_SURPLUS_CAP_RATIO: &str = "rf_surplus_cap_ratio";
    pub const RF_ENHANCED_CAP_RATIO: &str = "rf_enhanced_cap_ratio";

    // 最少出货件数
    pub const MIN_SHIPMENT_FLOOR: &str = "min_shipment_floor";

    // 数量提升后处理
    pub const QUANTITY_BUMP_ENABLED: &str = "quantity_bump_enabled";
    pub const BUMP_TARGET: &str = "bump_target";

    // 店铺方向分组
    pub const HD_SITE_PREFIX: &str = "hd_site_prefix";
    pub const FEEDER_SITE_PREFIXES: &str = "feeder_site_prefixes";
}
