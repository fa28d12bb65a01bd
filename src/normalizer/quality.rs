// ==========================================
// 差旅数据分析系统 - 数据质量报告
// ==========================================
// 职责: 清洗阶段降级事件的结构化计数
// 原则: 质量信号随返回值携带,日志只是旁路,不影响计算结果
// ==========================================

use serde::{Deserialize, Serialize};

/// 清洗阶段的数据质量计数
///
/// 每个计数对应一种"就地降级"事件: 行数据未被丢弃,
/// 但相应字段已退化为 0.0 / None / "未知"。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// 金额缺失或解析失败（已降级为 0.0）的行数
    pub invalid_amounts: u64,
    /// 日期解析失败（已降级为 None）的行数
    pub invalid_dates: u64,
    /// 项目代码为"未知"的差旅行数
    pub unknown_projects: u64,
    /// "未知"项目行的金额合计（被排除在项目成本表外,但计入 KPI 总额）
    pub unknown_project_amount: f64,
    /// 姓名/部门降级为"未知"的字段数
    pub unknown_identifiers: u64,
}

impl QualityReport {
    /// 合并另一份报告的计数（按数据源分段清洗后汇总）
    pub fn merge(&mut self, other: &QualityReport) {
        self.invalid_amounts += other.invalid_amounts;
        self.invalid_dates += other.invalid_dates;
        self.unknown_projects += other.unknown_projects;
        self.unknown_project_amount += other.unknown_project_amount;
        self.unknown_identifiers += other.unknown_identifiers;
    }

    /// 是否全部清洁（无任何降级事件）
    pub fn is_clean(&self) -> bool {
        self.invalid_amounts == 0
            && self.invalid_dates == 0
            && self.unknown_projects == 0
            && self.unknown_identifiers == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_accumulates() {
        let mut a = QualityReport {
            invalid_amounts: 1,
            invalid_dates: 2,
            unknown_projects: 1,
            unknown_project_amount: 100.0,
            unknown_identifiers: 0,
        };
        let b = QualityReport {
            invalid_amounts: 2,
            invalid_dates: 0,
            unknown_projects: 3,
            unknown_project_amount: 50.5,
            unknown_identifiers: 4,
        };
        a.merge(&b);
        assert_eq!(a.invalid_amounts, 3);
        assert_eq!(a.invalid_dates, 2);
        assert_eq!(a.unknown_projects, 4);
        assert!((a.unknown_project_amount - 150.5).abs() < 1e-9);
        assert_eq!(a.unknown_identifiers, 4);
        assert!(!a.is_clean());
    }

    #[test]
    fn test_default_is_clean() {
        assert!(QualityReport::default().is_clean());
    }
}
