// ==========================================
// 差旅数据分析系统 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 原则: 行级脏数据就地降级(哨兵/零值),只有表级结构问题才返回错误
// ==========================================

use crate::domain::types::SourceKind;
use thiserror::Error;

/// 分析引擎错误类型
#[derive(Error, Debug)]
pub enum AnalysisError {
    // ===== 结构性错误 =====
    #[error("数据源 {source_kind} 缺少必要列: {columns:?}")]
    MissingRequiredColumns {
        source_kind: SourceKind,
        columns: Vec<String>,
    },

    #[error("机票/酒店/火车票数据均为空，无法生成分析结果")]
    AllSourcesEmpty,

    #[error("数据源 {source_kind} 无法解析: {message}")]
    UnparseableSource {
        source_kind: SourceKind,
        message: String,
    },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type AnalysisResult<T> = Result<T, AnalysisError>;
