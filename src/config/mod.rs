// ==========================================
// 差旅数据分析系统 - 配置层
// ==========================================
// 职责: 分析引擎可调参数
// 原则: 所有阈值经配置传入,引擎内不硬编码
// ==========================================

pub mod analysis_config;

pub use analysis_config::AnalysisConfig;
