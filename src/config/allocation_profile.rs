// ==========================================
// 跨店调货建议系统 - 分配参数配置
// ==========================================
// 职责: 汇总分配引擎使用的全部阈值,引擎内不出现阈值字面量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::transfer_config_trait::TransferConfigReader;
use crate::domain::inventory::site_prefix;
use crate::domain::types::SiteClass;
use serde::{Deserialize, Serialize};

/// 分配引擎参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// A 模式上限比例
    pub rf_surplus_cap_ratio: f64,

    /// B 模式上限比例
    pub rf_enhanced_cap_ratio: f64,

    /// 上限控制的最少出货件数
    pub min_shipment_floor: i64,

    /// 是否启用 1 → bump_target 的数量提升
    pub quantity_bump_enabled: bool,

    pub bump_target: i64,

    pub hd_site_prefix: String,

    pub feeder_site_prefixes: Vec<String>,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            rf_surplus_cap_ratio: 0.40,
            rf_enhanced_cap_ratio: 0.80,
            min_shipment_floor: 2,
            quantity_bump_enabled: true,
            bump_target: 2,
            hd_site_prefix: "HD".to_string(),
            feeder_site_prefixes: vec!["HA".to_string(), "HB".to_string(), "HC".to_string()],
        }
    }
}

impl AllocationConfig {
    /// 从配置读取器组装参数并校验
    pub fn from_reader<R: TransferConfigReader + ?Sized>(reader: &R) -> ConfigResult<Self> {
        let config = Self {
            rf_surplus_cap_ratio: reader.get_rf_surplus_cap_ratio()?,
            rf_enhanced_cap_ratio: reader.get_rf_enhanced_cap_ratio()?,
            min_shipment_floor: reader.get_min_shipment_floor()?,
            quantity_bump_enabled: reader.get_quantity_bump_enabled()?,
            bump_target: reader.get_bump_target()?,
            hd_site_prefix: reader.get_hd_site_prefix()?,
            feeder_site_prefixes: reader.get_feeder_site_prefixes()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 参数合法性校验
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, ratio) in [
            ("rf_surplus_cap_ratio", self.rf_surplus_cap_ratio),
            ("rf_enhanced_cap_ratio", self.rf_enhanced_cap_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(invalid(key, ratio.to_string(), "比例必须在 (0, 1] 范围内"));
            }
        }

        if self.min_shipment_floor < 0 {
            return Err(invalid(
                "min_shipment_floor",
                self.min_shipment_floor.to_string(),
                "最少出货件数不能为负",
            ));
        }

        if self.bump_target < 2 {
            return Err(invalid(
                "bump_target",
                self.bump_target.to_string(),
                "提升目标件数至少为 2",
            ));
        }

        if self
            .feeder_site_prefixes
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&self.hd_site_prefix))
        {
            return Err(invalid(
                "feeder_site_prefixes",
                self.feeder_site_prefixes.join(","),
                "出货店铺组不能包含 HD 前缀",
            ));
        }

        Ok(())
    }

    /// 按店铺代码前缀判定店铺类别
    pub fn classify_site(&self, site: &str) -> SiteClass {
        let prefix = site_prefix(site);
        if prefix.is_empty() {
            return SiteClass::Other;
        }
        if prefix.eq_ignore_ascii_case(&self.hd_site_prefix) {
            SiteClass::Hd
        } else if self
            .feeder_site_prefixes
            .iter()
            .any(|p| prefix.eq_ignore_ascii_case(p))
        {
            SiteClass::Feeder
        } else {
            SiteClass::Other
        }
    }
}

fn invalid(key: &str, value: String, message: &str) -> ConfigError {
    ConfigError::ConfigValueError {
        key: key.to_string(),
        value,
        message: message.to_string(),
    }
}
