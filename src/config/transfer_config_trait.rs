// ==========================================
// 跨店调货建议系统 - 调货配置读取 Trait
// ==========================================
// 职责: 定义分配引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;

// ==========================================
// TransferConfigReader Trait
// ==========================================
// 实现者: ConfigManager（JSON 键值文件）
pub trait TransferConfigReader {
    // ===== RF 转出阈值 =====

    /// A 模式上限比例: (库存+在途) × ratio
    ///
    /// # 默认值
    /// - 0.40
    fn get_rf_surplus_cap_ratio(&self) -> ConfigResult<f64>;

    /// B 模式上限比例
    ///
    /// # 默认值
    /// - 0.80
    fn get_rf_enhanced_cap_ratio(&self) -> ConfigResult<f64>;

    /// 最少出货件数（上限控制的下限）
    ///
    /// # 默认值
    /// - 2
    fn get_min_shipment_floor(&self) -> ConfigResult<i64>;

    // ===== 数量提升 =====

    /// 是否启用 1 → 2 件提升后处理
    ///
    /// # 默认值
    /// - true
    fn get_quantity_bump_enabled(&self) -> ConfigResult<bool>;

    /// 提升目标件数
    ///
    /// # 默认值
    /// - 2
    fn get_bump_target(&self) -> ConfigResult<i64>;

    // ===== 店铺方向分组 =====

    /// HD 店铺代码前缀
    ///
    /// # 默认值
    /// - "HD"
    fn get_hd_site_prefix(&self) -> ConfigResult<String>;

    /// 可向 HD 出货的店铺前缀组
    ///
    /// # 默认值
    /// - ["HA", "HB", "HC"]
    fn get_feeder_site_prefixes(&self) -> ConfigResult<Vec<String>>;
}
