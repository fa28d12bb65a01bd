// ==========================================
// 差旅数据分析系统 - 核心库
// ==========================================
// 定位: 规范化、合并与分析引擎
// 边界: 输入为四张松类型表,输出为结构化分析结果;
//       上传/存储/展示均为外部协作方,不在本库范围内
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 规范化层 - 字段清洗与记录映射
pub mod normalizer;

// 引擎层 - 合并、聚合与交叉验证
pub mod engine;

// 配置层 - 分析参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AnomalyKind, AttendanceStatus, SourceKind, TravelType, UNKNOWN};

// 领域实体与结果
pub use domain::{
    Anomaly, AttendanceRecord, BookingBehaviorStat, DashboardData, DashboardKpi,
    DepartmentMetric, OverStandardBreakdown, ProjectCostSummary, UnifiedExpenseRecord,
};

// 规范化层
pub use normalizer::{FieldCleaner, QualityReport, RawRow, RawTable, RecordMapper};

// 引擎
pub use engine::{
    AnalysisInputs, BookingAnalyzer, CostAggregator, CrossValidator, RecordUnifier,
    TravelAnalyzer,
};

// 配置与错误
pub use config::AnalysisConfig;
pub use error::{AnalysisError, AnalysisResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "差旅数据分析系统";
