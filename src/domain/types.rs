// ==========================================
// 跨店调货建议系统 - 领域类型定义
// ==========================================
// 职责: 调货模式 / 店铺类型 / 转出类型 / 接收类型 / 店铺类别
// 红线: 转出类型与接收类型是分类制,不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 调货模式 (Transfer Mode)
// ==========================================
// A: 保守转货 / B: 加强转货 / C: 全量转货
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferMode {
    A,
    B,
    C,
}

impl TransferMode {
    /// 模式中文名称
    pub fn title(&self) -> &'static str {
        match self {
            TransferMode::A => "保守转货",
            TransferMode::B => "加强转货",
            TransferMode::C => "全量转货",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::A => write!(f, "A"),
            TransferMode::B => write!(f, "B"),
            TransferMode::C => write!(f, "C"),
        }
    }
}

impl FromStr for TransferMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(TransferMode::A),
            "B" => Ok(TransferMode::B),
            "C" => Ok(TransferMode::C),
            other => Err(format!("不支持的调货模式: {}（仅支持 A/B/C）", other)),
        }
    }
}

// ==========================================
// 店铺补货类型 (RP Type)
// ==========================================
// ND: 不补货店铺（可全量转出）/ RF: 常规补货店铺
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    #[serde(rename = "ND")]
    Nd,
    #[serde(rename = "RF")]
    Rf,
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Nd => write!(f, "ND"),
            SiteType::Rf => write!(f, "RF"),
        }
    }
}

impl FromStr for SiteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ND" => Ok(SiteType::Nd),
            "RF" => Ok(SiteType::Rf),
            other => Err(format!("RP Type 只能是 ND 或 RF，实际为: {}", other)),
        }
    }
}

// ==========================================
// 转出类型 (Transfer Type)
// ==========================================
// 声明顺序即转出优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransferType {
    #[serde(rename = "ND转出")]
    NdTransfer,
    #[serde(rename = "RF过剩转出")]
    RfSurplus,
    #[serde(rename = "RF加强转出")]
    RfEnhanced,
    #[serde(rename = "C模式全量转出")]
    CComplete,
}

impl TransferType {
    /// 中文标签（与导出报表一致）
    pub fn label(&self) -> &'static str {
        match self {
            TransferType::NdTransfer => "ND转出",
            TransferType::RfSurplus => "RF过剩转出",
            TransferType::RfEnhanced => "RF加强转出",
            TransferType::CComplete => "C模式全量转出",
        }
    }

    /// 优先级序号（越小越优先）
    pub fn rank(&self) -> u8 {
        match self {
            TransferType::NdTransfer => 0,
            TransferType::RfSurplus => 1,
            TransferType::RfEnhanced => 2,
            TransferType::CComplete => 3,
        }
    }

    pub fn all() -> [TransferType; 4] {
        [
            TransferType::NdTransfer,
            TransferType::RfSurplus,
            TransferType::RfEnhanced,
            TransferType::CComplete,
        ]
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 接收类型 (Need Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NeedType {
    #[serde(rename = "紧急缺货")]
    UrgentShortage,
    #[serde(rename = "潜在缺货")]
    PotentialShortage,
}

impl NeedType {
    pub fn label(&self) -> &'static str {
        match self {
            NeedType::UrgentShortage => "紧急缺货",
            NeedType::PotentialShortage => "潜在缺货",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            NeedType::UrgentShortage => 0,
            NeedType::PotentialShortage => 1,
        }
    }

    pub fn all() -> [NeedType; 2] {
        [NeedType::UrgentShortage, NeedType::PotentialShortage]
    }
}

impl fmt::Display for NeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 店铺类别 (Site Class)
// ==========================================
// 由店铺代码前缀派生
// Hd: 重点支援店铺 / Feeder: 可向 HD 出货的店铺组 / Other: 不受方向限制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiteClass {
    Hd,
    Feeder,
    Other,
}

impl fmt::Display for SiteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteClass::Hd => write!(f, "HD"),
            SiteClass::Feeder => write!(f, "FEEDER"),
            SiteClass::Other => write!(f, "OTHER"),
        }
    }
}
