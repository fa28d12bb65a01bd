// ==========================================
// 差旅数据分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含清洗逻辑,不含聚合逻辑
// ==========================================

pub mod expense;
pub mod metrics;
pub mod types;

// 重导出核心类型
pub use expense::{AttendanceRecord, UnifiedExpenseRecord};
pub use metrics::{
    Anomaly, BookingBehaviorStat, DashboardData, DashboardKpi, DepartmentMetric,
    OverStandardBreakdown, ProjectCostSummary,
};
pub use types::{AnomalyKind, AttendanceStatus, SourceKind, TravelType, UNKNOWN};
