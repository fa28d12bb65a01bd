// ==========================================
// 差旅数据分析系统 - 引擎层
// ==========================================
// 职责: 合并 / 聚合 / 交叉验证 / 预订行为 / Dashboard 装配
// 红线: 纯内存计算,无 I/O,无共享可变状态
// ==========================================

pub mod booking;
pub mod cost_aggregator;
pub mod cross_validator;
pub mod dashboard;
pub mod top_n;
pub mod unifier;

// 重导出核心引擎
pub use booking::BookingAnalyzer;
pub use cost_aggregator::{CostAggregator, ProjectCostRollup};
pub use cross_validator::CrossValidator;
pub use dashboard::{AnalysisInputs, TravelAnalyzer};
pub use top_n::{mean, round2, top_n_with_others, OTHERS_LABEL};
pub use unifier::{RecordUnifier, AMOUNT_TOLERANCE};
