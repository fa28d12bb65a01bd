// ==========================================
// 差旅数据分析系统 - 核心记录实体
// ==========================================
// 职责: 统一差旅记录 / 考勤记录的规范化结构
// 红线: 实体只承载数据,清洗与聚合逻辑不在此处
// ==========================================

use crate::domain::types::{AttendanceStatus, TravelType, UNKNOWN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 统一差旅记录 (Unified Expense Record)
// ==========================================

/// 三类差旅数据规范化后的统一行
///
/// 不变式:
/// - 每条记录恰好属于一种差旅类型
/// - amount 永远是非负数值,解析失败时为 0.0,保证求和总是良定义
/// - consumption_date 解析失败时为 None,不会中断流水线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedExpenseRecord {
    /// 差旅人员姓名（缺失时为哨兵"未知"）
    pub person: String,

    /// 一级部门（缺失时为哨兵"未知"）
    pub department: String,

    /// 原始"项目"字段全文,用于提取展示名
    pub project_raw: Option<String>,

    /// 提取的项目代码（非数字开头/缺失时为"未知"）
    pub project_code: String,

    /// 授信金额（清洗后,解析失败为 0.0）
    pub amount: f64,

    /// 统一消费日期（机票/火车票取出发日期,酒店取入住日期）
    pub consumption_date: Option<NaiveDate>,

    /// 差旅类型
    pub travel_type: TravelType,

    /// 提前预定天数（非数字时为 0）
    pub advance_days: i64,

    /// 是否超标（按类型专属规则在规范化时判定）
    pub over_standard: bool,
}

impl UnifiedExpenseRecord {
    /// 项目代码是否为哨兵"未知"
    pub fn has_unknown_project(&self) -> bool {
        self.project_code == UNKNOWN
    }
}

// ==========================================
// 考勤记录 (Attendance Record)
// ==========================================

/// 规范化后的单日考勤行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// 姓名（缺失时为"未知"）
    pub person: String,

    /// 一级部门（缺失时为"未知"）
    pub department: String,

    /// 考勤日期（解析失败为 None）
    pub date: Option<NaiveDate>,

    /// 原始"当日状态判断"文本
    pub status_raw: String,

    /// 归类后的状态
    pub status: AttendanceStatus,

    /// 工时（非数字时为 0）
    pub work_hours: f64,
}
