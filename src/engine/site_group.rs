// ==========================================
// 跨店调货建议系统 - 店铺组约束判定
// ==========================================
// 职责: 判定 (转出店铺, 接收店铺) 路线是否允许
// 规则: 按顺序首个命中即生效
//   1. 同店铺 → 禁止
//   2. HD → 出货组 → 禁止（任何模式）
//   3. C 模式候选 → 仅同 OM
//   4. 接收方为 HD → 允许（不限 OM）
//   5. 出货组 ↔ 出货组 → 仅同 OM
//   6. 其余 → 允许（A/B 模式可跨 OM）
// 红线: 纯函数,无状态,每个判定带原因代码
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::types::SiteClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 路线判定原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteReason {
    SameSite,
    ModeCSameOm,
    ModeCCrossOm,
    HdToFeederForbidden,
    ToHd,
    FeederSameOm,
    FeederCrossOm,
    Unrestricted,
}

impl fmt::Display for RouteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RouteReason::SameSite => "SAME_SITE",
            RouteReason::ModeCSameOm => "MODE_C_SAME_OM",
            RouteReason::ModeCCrossOm => "MODE_C_CROSS_OM",
            RouteReason::HdToFeederForbidden => "HD_TO_FEEDER_FORBIDDEN",
            RouteReason::ToHd => "TO_HD",
            RouteReason::FeederSameOm => "FEEDER_SAME_OM",
            RouteReason::FeederCrossOm => "FEEDER_CROSS_OM",
            RouteReason::Unrestricted => "UNRESTRICTED",
        };
        write!(f, "{}", code)
    }
}

/// 路线判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDecision {
    pub permitted: bool,
    pub reason: RouteReason,
}

impl RouteDecision {
    fn permit(reason: RouteReason) -> Self {
        Self {
            permitted: true,
            reason,
        }
    }

    fn forbid(reason: RouteReason) -> Self {
        Self {
            permitted: false,
            reason,
        }
    }
}

/// 路线一端（店铺 + OM）
#[derive(Debug, Clone, Copy)]
pub struct RouteEnd<'a> {
    pub site: &'a str,
    pub om: &'a str,
}

/// SiteGroupResolver - 店铺组约束判定器
pub struct SiteGroupResolver {
    config: AllocationConfig,
}

impl SiteGroupResolver {
    pub fn new(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// 判定一条路线
    ///
    /// # 参数
    /// - `sender`: 转出店铺
    /// - `receiver`: 接收店铺
    /// - `same_om_only`: 候选是否带 C 模式同 OM 限制
    pub fn check(&self, sender: RouteEnd<'_>, receiver: RouteEnd<'_>, same_om_only: bool) -> RouteDecision {
        if sender.site == receiver.site {
            return RouteDecision::forbid(RouteReason::SameSite);
        }

        let same_om = sender.om == receiver.om;
        let sender_class = self.config.classify_site(sender.site);
        let receiver_class = self.config.classify_site(receiver.site);

        if (sender_class, receiver_class) == (SiteClass::Hd, SiteClass::Feeder) {
            return RouteDecision::forbid(RouteReason::HdToFeederForbidden);
        }

        // C 模式限制只在剩余路线上收窄
        if same_om_only {
            return if same_om {
                RouteDecision::permit(RouteReason::ModeCSameOm)
            } else {
                RouteDecision::forbid(RouteReason::ModeCCrossOm)
            };
        }

        match (sender_class, receiver_class) {
            (_, SiteClass::Hd) => RouteDecision::permit(RouteReason::ToHd),
            (SiteClass::Feeder, SiteClass::Feeder) if same_om => {
                RouteDecision::permit(RouteReason::FeederSameOm)
            }
            (SiteClass::Feeder, SiteClass::Feeder) => RouteDecision::forbid(RouteReason::FeederCrossOm),
            _ => RouteDecision::permit(RouteReason::Unrestricted),
        }
    }
}
