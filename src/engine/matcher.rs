// ==========================================
// 跨店调货建议系统 - 调货匹配引擎
// ==========================================
// 职责: 按固定优先级表贪心配对转出候选与接收需求
// 输入: 单货号的转出候选 + 接收需求（输入顺序）
// 输出: 调货建议（生成顺序）
// ==========================================
// 红线: 每对数量 = min(剩余可转出, 剩余需求),两侧同步扣减
// 红线: 路线须经店铺组约束判定放行
// 红线: 数量提升只看原始库存,提升后重算转出后库存
// ==========================================

mod core;
mod remark;

#[cfg(test)]
mod tests;

pub use self::core::{recompute_after_stock, Matcher, MATCHING_PRIORITY};
pub use self::remark::RemarkContext;
