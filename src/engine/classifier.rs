// ==========================================
// 跨店调货建议系统 - 转出/接收分类引擎
// ==========================================
// 职责: 按调货模式把每条 (货号, 店铺) 记录分类为转出候选和/或接收需求
// 输入: 同一货号的全部记录 + 调货模式
// 输出: 转出候选列表 + 接收需求列表（保持输入顺序）
// ==========================================
// 红线: 规则按顺序首个命中即生效,数量为 0 不产生条目
// 红线: 并列的最小/最大销量店铺各自独立入选
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use self::core::{ArticleContext, Classification, Classifier};
