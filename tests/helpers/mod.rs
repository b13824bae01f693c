// ==========================================
// 集成测试共享辅助模块
// ==========================================

#![allow(dead_code)]

pub mod record_builder;

pub use record_builder::RecordBuilder;
