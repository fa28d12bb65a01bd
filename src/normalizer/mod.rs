// ==========================================
// 差旅数据分析系统 - 规范化层
// ==========================================
// 职责: 松类型原始表 → 强类型规范记录
// 原则: 行级脏数据就地降级并计数,只有表级缺列才报错
// ==========================================

pub mod field_cleaner;
pub mod quality;
pub mod record_mapper;
pub mod table;

// 重导出核心类型
pub use field_cleaner::FieldCleaner;
pub use quality::QualityReport;
pub use record_mapper::RecordMapper;
pub use table::{cell, RawRow, RawTable};
