// ==========================================
// 差旅数据分析系统 - 原始表结构
// ==========================================
// 职责: 松类型表格行的统一访问 + 列级结构契约
// 约定: 键缺失与空白值均视为"缺失",由清洗层降级处理
// ==========================================

use crate::domain::types::SourceKind;
use crate::error::{AnalysisError, AnalysisResult};
use serde_json::Value;
use std::collections::HashMap;

/// 单行原始数据,列名 → 文本值
pub type RawRow = HashMap<String, String>;

/// 一张松类型的原始表（考勤/机票/酒店/火车票）
///
/// 行保持输入顺序；列按名访问,可整列缺失。
/// 空表等价于"数据源缺失",上游允许不提供某张表。
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    rows: Vec<RawRow>,
}

impl RawTable {
    /// 创建空表（数据源缺失时的占位）
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    /// 从行序列创建
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// 从 JSON 数组创建（demo 入口与外部采集层使用）
    ///
    /// 期望形如 `[{"列名": 值, ...}, ...]`；数值/布尔值转为文本,
    /// null 视为缺失。非对象数组返回结构性错误 UnparseableSource。
    pub fn from_json(source_kind: SourceKind, value: &Value) -> AnalysisResult<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| AnalysisError::UnparseableSource {
                source_kind,
                message: "期望 JSON 数组".to_string(),
            })?;

        let mut rows = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or_else(|| AnalysisError::UnparseableSource {
                    source_kind,
                    message: format!("第 {} 行不是 JSON 对象", idx + 1),
                })?;

            let mut row = RawRow::new();
            for (key, val) in obj {
                let text = match val {
                    Value::Null => continue,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                row.insert(key.clone(), text);
            }
            rows.push(row);
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列是否存在（任意一行出现该键即视为存在）
    pub fn has_column(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.contains_key(name))
    }

    /// 列级结构契约: 非空表必须具备指定列,否则返回结构性错误
    ///
    /// 空表直接通过（缺失的数据源贡献零行,不是错误）。
    pub fn require_columns(&self, source_kind: SourceKind, columns: &[&str]) -> AnalysisResult<()> {
        if self.is_empty() {
            return Ok(());
        }

        let missing: Vec<String> = columns
            .iter()
            .filter(|col| !self.has_column(col))
            .map(|col| col.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::MissingRequiredColumns {
                source_kind,
                columns: missing,
            })
        }
    }
}

/// 读取行内单元格,空白值视为缺失
pub fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(|v| v.trim()).filter(|v| !v.is_empty())
}
