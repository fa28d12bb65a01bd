// ==========================================
// 差旅数据分析系统 - 分析配置
// ==========================================
// 职责: 阈值与上限的集中定义 + JSON 反序列化
// ==========================================

use serde::{Deserialize, Serialize};

/// 分析引擎配置
///
/// 每个字段带默认值,调用方可整体使用 `Default`,
/// 也可从 JSON 局部覆写（缺省字段回落到默认值）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 紧急预订判定阈值（提前天数 ≤ 此值视为紧急）
    #[serde(default = "default_urgent_threshold_days")]
    pub urgent_threshold_days: i64,

    /// 标准月工时（8 小时/天 × 22 天/月）
    #[serde(default = "default_standard_monthly_hours")]
    pub standard_monthly_hours: f64,

    /// NoExpense 规则的差旅查找时间窗（± 天数）
    #[serde(default = "default_no_expense_window_days")]
    pub no_expense_window_days: i64,

    /// 项目成本展示条数上限（超出部分汇总到"其他"）
    #[serde(default = "default_project_top_n")]
    pub project_top_n: usize,

    /// 部门指标展示条数上限（超出部分汇总到"其他"）
    #[serde(default = "default_department_top_n")]
    pub department_top_n: usize,

    /// 异常列表返回上限（保序截断）
    #[serde(default = "default_anomaly_list_cap")]
    pub anomaly_list_cap: usize,

    /// 是否启用 NoExpense 规则
    ///
    /// 业务规则默认关闭: 出差不一定产生系统内差旅消费
    /// （对方承担交通住宿、本地出差等）。规则逻辑保留,由此开关控制。
    #[serde(default)]
    pub enable_no_expense_rule: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            urgent_threshold_days: default_urgent_threshold_days(),
            standard_monthly_hours: default_standard_monthly_hours(),
            no_expense_window_days: default_no_expense_window_days(),
            project_top_n: default_project_top_n(),
            department_top_n: default_department_top_n(),
            anomaly_list_cap: default_anomaly_list_cap(),
            enable_no_expense_rule: false,
        }
    }
}

fn default_urgent_threshold_days() -> i64 {
    2
}

fn default_standard_monthly_hours() -> f64 {
    176.0
}

fn default_no_expense_window_days() -> i64 {
    3
}

fn default_project_top_n() -> usize {
    20
}

fn default_department_top_n() -> usize {
    15
}

fn default_anomaly_list_cap() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AnalysisConfig::default();
        assert_eq!(config.urgent_threshold_days, 2);
        assert_eq!(config.standard_monthly_hours, 176.0);
        assert_eq!(config.no_expense_window_days, 3);
        assert_eq!(config.project_top_n, 20);
        assert_eq!(config.department_top_n, 15);
        assert_eq!(config.anomaly_list_cap, 100);
        assert!(!config.enable_no_expense_rule);
    }

    #[test]
    fn test_partial_json_override() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"urgent_threshold_days": 5, "enable_no_expense_rule": true}"#)
                .expect("配置解析失败");
        assert_eq!(config.urgent_threshold_days, 5);
        assert!(config.enable_no_expense_rule);
        // 未覆写字段回落到默认值
        assert_eq!(config.project_top_n, 20);
        assert_eq!(config.standard_monthly_hours, 176.0);
    }
}
